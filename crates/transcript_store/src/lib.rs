//! File-backed persistence for chat conversations.
//!
//! Each saved conversation is one pretty-printed JSON file in a flat storage
//! directory. The file name doubles as the record id:
//! `{YYYYMMDD_HHMMSS}_{sanitized_title}.json`. There is no locking and no
//! transaction layer; a single process owns the directory.

mod error;
mod paths;
mod record;
mod store;

pub use error::TranscriptStoreError;
pub use paths::{derive_title, record_file_name, transcript_root, TRANSCRIPT_DIR};
pub use record::{ConversationRecord, RecordSummary};
pub use store::TranscriptStore;
