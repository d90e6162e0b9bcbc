//! Minimal provider-agnostic contract for producing one chat completion.
//!
//! This crate intentionally defines only the shared conversation message
//! model, the bounded context window handed to completion providers, and the
//! blocking completion contract. It excludes provider transport details and
//! persistence concerns.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default bound on the number of recent turns sent as completion context.
pub const DEFAULT_WINDOW_TURNS: usize = 5;

/// Speaker tag for one conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn's worth of text in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Error returned while constructing/configuring a provider before any
/// completion is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInitError {
    message: String,
}

impl ProviderInitError {
    /// Creates a new provider initialization error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProviderInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProviderInitError {}

impl From<String> for ProviderInitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ProviderInitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Error returned by a provider for one failed completion request.
///
/// Callers treat this as terminal for the turn: there is no retry contract
/// at this seam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionError {
    message: String,
}

impl CompletionError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CompletionError {}

/// Input required to request one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// System instructions prepended ahead of the windowed history.
    pub instructions: String,
    /// Bounded most-recent conversation context, oldest first, ending with
    /// the new user message.
    pub messages: Vec<Message>,
}

/// Immutable metadata describing a completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub provider_id: String,
    pub model_id: String,
}

/// Provider interface for executing one blocking completion request.
pub trait CompletionProvider: Send + Sync + 'static {
    /// Returns provider/model identity metadata.
    fn profile(&self) -> ProviderProfile;

    /// Produces one assistant reply for the given context, blocking until
    /// the collaborator responds or fails.
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

impl fmt::Debug for dyn CompletionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn CompletionProvider")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct WindowTurn {
    user: Message,
    assistant: Option<Message>,
}

/// Bounded sliding window over the most recent conversation turns.
///
/// One turn is one user message plus its assistant reply. Assistant messages
/// without a preceding open turn (the seeded greeting) are not tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    capacity: usize,
    turns: VecDeque<WindowTurn>,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_TURNS)
    }
}

impl ContextWindow {
    /// Creates a window retaining at most `capacity` turns. A zero capacity
    /// is clamped to one so the newest turn always survives.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            turns: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of turns currently retained.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Tracks one message. User messages open a new turn; assistant messages
    /// complete the newest open turn and are otherwise dropped.
    ///
    /// The newest open turn rides outside the bound, so the window holds up
    /// to `capacity` completed turns plus the message awaiting its reply.
    /// The oldest turn is evicted once a reply closes the extra turn.
    pub fn push(&mut self, message: Message) {
        match message.role {
            Role::User => {
                self.turns.push_back(WindowTurn {
                    user: message,
                    assistant: None,
                });
                while self.turns.len() > self.capacity + 1 {
                    self.turns.pop_front();
                }
            }
            Role::Assistant => {
                if let Some(turn) = self.turns.back_mut() {
                    if turn.assistant.is_none() {
                        turn.assistant = Some(message);
                    }
                }
                while self.turns.len() > self.capacity {
                    self.turns.pop_front();
                }
            }
        }
    }

    /// Drops all retained turns.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Rebuilds the window from a full message history, retaining only the
    /// most recent turns within the bound.
    pub fn rebuild_from(&mut self, messages: &[Message]) {
        self.clear();
        for message in messages {
            self.push(message.clone());
        }
    }

    /// Returns the windowed messages oldest-first.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.turns.len() * 2);
        for turn in &self.turns {
            messages.push(turn.user.clone());
            if let Some(assistant) = &turn.assistant {
                messages.push(assistant.clone());
            }
        }
        messages
    }
}
