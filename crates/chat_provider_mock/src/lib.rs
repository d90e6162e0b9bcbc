//! Deterministic mock implementation of the shared `chat_provider` contract.
//!
//! This crate contains no transport logic and is intended for local
//! development and contract-level integration testing.

use std::sync::{Mutex, MutexGuard};

use chat_provider::{CompletionError, CompletionProvider, CompletionRequest, ProviderProfile};

/// Stable provider identifier used for explicit startup selection.
pub const MOCK_PROVIDER_ID: &str = "mock";

/// Deterministic mock provider used by `commerce_chat` tests and local runs.
///
/// Replies are served in order and the last reply repeats once the script is
/// exhausted, so any number of turns stays deterministic.
#[derive(Debug)]
pub struct MockProvider {
    replies: Vec<String>,
    next_reply: Mutex<usize>,
}

impl MockProvider {
    /// Creates a mock provider with caller-provided scripted replies.
    #[must_use]
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            replies: sanitize_replies(replies),
            next_reply: Mutex::new(0),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(vec![
            "Happy to help! Could you tell me a bit more about what you are shopping for?"
                .to_string(),
            "Here are a few options worth comparing. Do any of these fit your budget?"
                .to_string(),
            "You can check order status from your account page, or share the order number here."
                .to_string(),
        ])
    }
}

impl CompletionProvider for MockProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: MOCK_PROVIDER_ID.to_string(),
            model_id: "mock".to_string(),
        }
    }

    fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
        let mut next_reply = lock_unpoisoned(&self.next_reply);
        let index = (*next_reply).min(self.replies.len() - 1);
        *next_reply += 1;

        Ok(self.replies[index].clone())
    }
}

fn sanitize_replies(replies: Vec<String>) -> Vec<String> {
    let mut sanitized: Vec<String> = replies
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .collect();

    if sanitized.is_empty() {
        sanitized.push("Happy to help with your shopping!".to_string());
    }

    sanitized
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
