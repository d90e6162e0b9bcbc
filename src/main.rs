use std::io;

use commerce_chat::controller::PageController;
use commerce_chat::prompts::system_instructions_from_env;
use commerce_chat::{providers, repl};
use tracing_subscriber::EnvFilter;
use transcript_store::{transcript_root, TranscriptStore};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let provider = providers::provider_from_env().map_err(io::Error::other)?;
    let profile = provider.profile();
    tracing::info!(
        provider = %profile.provider_id,
        model = %profile.model_id,
        "provider initialized"
    );

    let cwd = std::env::current_dir().map_err(io::Error::other)?;
    let store = TranscriptStore::new(transcript_root(&cwd));

    let mut controller = PageController::new(provider, store, system_instructions_from_env());
    repl::run(&mut controller)
}
