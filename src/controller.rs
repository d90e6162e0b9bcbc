//! Page controller: turns discrete UI events into session and store updates.
//!
//! Store and completion failures are rendered as notices and never terminate
//! the session; only provider bootstrap failures are fatal, and those happen
//! before the controller exists.

use std::sync::Arc;

use chat_provider::{CompletionProvider, CompletionRequest, Message};
use transcript_store::{derive_title, TranscriptStore};

use crate::prompts::{FALLBACK_REPLY, GREETING, RETURN_GREETING};
use crate::session::{ChatSession, SessionMode};

const HISTORY_PANEL_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    ProductSearch,
    OrderSupport,
    FindDeals,
    ProductCompare,
    Returns,
}

impl QuickAction {
    /// The canned user message the action stands for.
    #[must_use]
    pub fn canned_message(self) -> &'static str {
        match self {
            Self::ProductSearch => {
                "I'm looking for product recommendations. Can you help me find something specific?"
            }
            Self::OrderSupport => "I need help with my order status or tracking information.",
            Self::FindDeals => "What are the best deals and discounts available right now?",
            Self::ProductCompare => "I want to compare different products. Can you help me?",
            Self::Returns => "I need information about returns, exchanges, or refund policies.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    UserInput(String),
    QuickAction(QuickAction),
    NewChat,
    SaveChat,
    LoadChat(String),
    DeleteChat(String),
    ListChats,
    ToggleAutoSave,
    ClearHistory,
}

pub struct PageController {
    session: ChatSession,
    store: TranscriptStore,
    provider: Arc<dyn CompletionProvider>,
    system_instructions: String,
    notices: Vec<String>,
    rendered: usize,
}

impl PageController {
    #[must_use]
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        store: TranscriptStore,
        system_instructions: String,
    ) -> Self {
        Self {
            session: ChatSession::new(GREETING),
            store,
            provider,
            system_instructions,
            notices: Vec::new(),
            rendered: 0,
        }
    }

    #[must_use]
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn dispatch(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::UserInput(text) => self.on_user_input(text),
            SessionEvent::QuickAction(action) => {
                self.on_user_input(action.canned_message().to_string());
            }
            SessionEvent::NewChat => self.on_new_chat(),
            SessionEvent::SaveChat => self.on_save_chat(),
            SessionEvent::LoadChat(id) => self.on_load_chat(&id),
            SessionEvent::DeleteChat(id) => self.on_delete_chat(&id),
            SessionEvent::ListChats => self.on_list_chats(),
            SessionEvent::ToggleAutoSave => self.on_toggle_auto_save(),
            SessionEvent::ClearHistory => self.on_clear_history(),
        }
    }

    /// Transcript messages appended (or re-exposed) since the last call.
    ///
    /// Resets and loads rewind the watermark so the fresh greeting or the
    /// loaded conversation is rendered in full.
    pub fn take_new_messages(&mut self) -> Vec<Message> {
        let new = self.session.messages()[self.rendered..].to_vec();
        self.rendered = self.session.messages().len();
        new
    }

    pub fn drain_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    fn on_user_input(&mut self, text: String) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        self.session.push_user(text);
        self.session.mode = SessionMode::AwaitingCompletion;

        let request = CompletionRequest {
            instructions: self.system_instructions.clone(),
            messages: self.session.window_messages(),
        };

        match self.provider.complete(&request) {
            Ok(reply) => {
                self.session.push_assistant(reply);
                if self.session.auto_save && self.session.messages().len() > 2 {
                    self.save_current();
                }
            }
            Err(error) => {
                tracing::warn!(%error, "completion request failed");
                self.push_notice(format!("Error generating response: {error}"));
                self.session.push_assistant(FALLBACK_REPLY);
            }
        }

        self.session.mode = SessionMode::Idle;
    }

    fn on_new_chat(&mut self) {
        if self.session.is_nontrivial() && self.session.auto_save {
            self.save_current();
        }

        self.session.reset(GREETING);
        self.rendered = 0;
    }

    fn on_save_chat(&mut self) {
        if !self.session.is_nontrivial() {
            self.push_notice("No conversation to save!");
            return;
        }

        if self.save_current().is_some() {
            self.push_notice("Conversation saved!");
        }
    }

    fn on_load_chat(&mut self, id: &str) {
        if id.is_empty() {
            self.push_notice("Usage: /load <id> (see /list for saved conversation ids)");
            return;
        }

        match self.store.load(id) {
            Ok(record) => {
                let title = record.title.clone();
                self.session.load_from(id, record.title, record.messages);
                self.rendered = 0;
                self.push_notice(format!("Loaded: {title}"));
            }
            Err(error) => {
                tracing::warn!(%error, id, "failed to load conversation");
                self.push_notice(format!("Error loading conversation: {error}"));
            }
        }
    }

    fn on_delete_chat(&mut self, id: &str) {
        if id.is_empty() {
            self.push_notice("Usage: /delete <id> (see /list for saved conversation ids)");
            return;
        }

        match self.store.delete(id) {
            Ok(()) => self.push_notice("Conversation deleted."),
            Err(error) => {
                tracing::warn!(%error, id, "failed to delete conversation");
                self.push_notice(format!("Error deleting conversation: {error}"));
            }
        }
    }

    fn on_list_chats(&mut self) {
        let summaries = match self.store.list() {
            Ok(summaries) => summaries,
            Err(error) => {
                tracing::warn!(%error, "failed to list conversations");
                self.push_notice(format!("Error loading conversations: {error}"));
                return;
            }
        };

        if summaries.is_empty() {
            self.push_notice("No saved conversations yet");
            return;
        }

        self.push_notice("Saved conversations:");
        for summary in summaries.iter().take(HISTORY_PANEL_LIMIT) {
            self.push_notice(format!("  {}  [{}]", summary.display_title(), summary.id));
        }

        if summaries.len() > HISTORY_PANEL_LIMIT {
            self.push_notice(format!(
                "  ... and {} more conversations",
                summaries.len() - HISTORY_PANEL_LIMIT
            ));
        }
    }

    fn on_toggle_auto_save(&mut self) {
        self.session.auto_save = !self.session.auto_save;
        self.push_notice(if self.session.auto_save {
            "Auto-save enabled."
        } else {
            "Auto-save disabled."
        });
    }

    fn on_clear_history(&mut self) {
        if self.session.is_nontrivial() && self.session.auto_save {
            self.save_current();
        }

        self.session.reset(RETURN_GREETING);
        self.rendered = 0;
    }

    /// Saves the transcript, re-using the active record's title when one
    /// exists so repeated auto-saves stay grouped under one title. The newest
    /// saved id becomes the active record.
    fn save_current(&mut self) -> Option<String> {
        let title = match self.session.active_record() {
            Some(record) => record.title.clone(),
            None => derive_title(self.session.messages()),
        };

        match self.store.save(self.session.messages(), Some(&title)) {
            Ok(id) => {
                self.session.set_active_record(id.clone(), title);
                Some(id)
            }
            Err(error) => {
                tracing::warn!(%error, "failed to save conversation");
                self.push_notice(format!("Error saving conversation: {error}"));
                None
            }
        }
    }

    fn push_notice(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
    }
}
