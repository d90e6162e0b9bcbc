use std::path::{Path, PathBuf};

use chat_provider::{Message, Role};

pub const TRANSCRIPT_DIR: &str = "conversations";

const TITLE_SOURCE_CHARS: usize = 50;
const TITLE_CHARS: usize = 30;
const FALLBACK_TITLE: &str = "New Conversation";

#[must_use]
pub fn transcript_root(base: &Path) -> PathBuf {
    base.join(TRANSCRIPT_DIR)
}

/// Derives a record title from the first user message.
///
/// The first user message is truncated to 30 characters with a trailing
/// ellipsis, and path separators are replaced so the title stays safe to
/// embed in a file name. Conversations without a user message fall back to
/// a fixed placeholder title.
#[must_use]
pub fn derive_title(messages: &[Message]) -> String {
    let source = messages
        .iter()
        .find(|message| message.role == Role::User)
        .map(|message| message.content.chars().take(TITLE_SOURCE_CHARS).collect())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    let cleaned: String = source
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            _ => c,
        })
        .take(TITLE_CHARS)
        .collect();

    format!("{cleaned}...")
}

#[must_use]
pub fn sanitize_title_for_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            _ => c,
        })
        .collect()
}

#[must_use]
pub fn record_file_name(timestamp: &str, title: &str) -> String {
    format!("{timestamp}_{}.json", sanitize_title_for_filename(title))
}

#[must_use]
pub(crate) fn record_file_name_with_suffix(timestamp: &str, title: &str, suffix: u32) -> String {
    format!(
        "{timestamp}_{}_{suffix}.json",
        sanitize_title_for_filename(title)
    )
}
