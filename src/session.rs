//! Owned session state: transcript, bounded context window, persistence flags.

use chat_provider::{ContextWindow, Message, DEFAULT_WINDOW_TURNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Idle,
    AwaitingCompletion,
}

/// The record a running conversation is currently persisted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRecord {
    pub id: String,
    pub title: String,
}

/// One live conversation.
///
/// The transcript holds every message for display and persistence. The
/// context window tracks only the most recent exchange turns and is what the
/// completion provider sees; the seeded greeting never enters it.
#[derive(Debug)]
pub struct ChatSession {
    pub mode: SessionMode,
    pub auto_save: bool,
    messages: Vec<Message>,
    window: ContextWindow,
    active_record: Option<ActiveRecord>,
}

impl ChatSession {
    #[must_use]
    pub fn new(greeting: &str) -> Self {
        let mut session = Self {
            mode: SessionMode::Idle,
            auto_save: true,
            messages: Vec::new(),
            window: ContextWindow::new(DEFAULT_WINDOW_TURNS),
            active_record: None,
        };
        session.seed_greeting(greeting);
        session
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the windowed messages handed to the completion provider.
    #[must_use]
    pub fn window_messages(&self) -> Vec<Message> {
        self.window.messages()
    }

    #[must_use]
    pub fn active_record(&self) -> Option<&ActiveRecord> {
        self.active_record.as_ref()
    }

    pub fn set_active_record(&mut self, id: impl Into<String>, title: impl Into<String>) {
        self.active_record = Some(ActiveRecord {
            id: id.into(),
            title: title.into(),
        });
    }

    /// True once the conversation holds more than the seeded greeting.
    #[must_use]
    pub fn is_nontrivial(&self) -> bool {
        self.messages.len() > 1
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        let message = Message::user(text);
        self.window.push(message.clone());
        self.messages.push(message);
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        let message = Message::assistant(text);
        self.window.push(message.clone());
        self.messages.push(message);
    }

    /// Resets to a fresh conversation seeded with `greeting`.
    pub fn reset(&mut self, greeting: &str) {
        self.messages.clear();
        self.window.clear();
        self.active_record = None;
        self.mode = SessionMode::Idle;
        self.seed_greeting(greeting);
    }

    /// Replaces the transcript wholesale with a loaded conversation.
    ///
    /// The context window is refilled from the loaded history so the first
    /// completion after a load already sees the restored context.
    pub fn load_from(
        &mut self,
        record_id: impl Into<String>,
        title: impl Into<String>,
        messages: Vec<Message>,
    ) {
        self.window.rebuild_from(&messages);
        self.messages = messages;
        self.active_record = Some(ActiveRecord {
            id: record_id.into(),
            title: title.into(),
        });
        self.mode = SessionMode::Idle;
    }

    fn seed_greeting(&mut self, greeting: &str) {
        self.messages.push(Message::assistant(greeting));
    }
}
