use std::fs;
use std::path::{Path, PathBuf};

use chat_provider::Message;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::TranscriptStoreError;
use crate::paths::{derive_title, record_file_name, record_file_name_with_suffix};
use crate::record::{ConversationRecord, RecordSummary};

/// Flat-directory store: one JSON file per conversation, file name as id.
pub struct TranscriptStore {
    root: PathBuf,
}

impl TranscriptStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persists the conversation and returns the new record's id.
    ///
    /// The storage directory is created on first use. When no title is given
    /// one is derived from the first user message. Two saves landing in the
    /// same second are disambiguated with a numeric file-name suffix.
    pub fn save(
        &self,
        messages: &[Message],
        title: Option<&str>,
    ) -> Result<String, TranscriptStoreError> {
        fs::create_dir_all(&self.root).map_err(|source| {
            TranscriptStoreError::io("creating transcript directory", &self.root, source)
        })?;

        let now = OffsetDateTime::now_utc();
        let timestamp = compact_timestamp(now);
        let created = now
            .format(&Rfc3339)
            .map_err(TranscriptStoreError::ClockFormat)?;

        let title = match title {
            Some(title) => title.to_string(),
            None => derive_title(messages),
        };

        let file_name = available_file_name(&self.root, &timestamp, &title);
        let path = self.root.join(&file_name);

        let record = ConversationRecord::new(timestamp, title, messages.to_vec(), created);
        let body = serde_json::to_string_pretty(&record)
            .map_err(|source| TranscriptStoreError::serialize(&path, source))?;
        fs::write(&path, body)
            .map_err(|source| TranscriptStoreError::io("writing transcript file", &path, source))?;

        Ok(file_name)
    }

    /// Lists saved conversations, newest first.
    ///
    /// Every record file is parsed eagerly; one malformed file aborts the
    /// listing with a `Parse` error naming the offending path.
    pub fn list(&self) -> Result<Vec<RecordSummary>, TranscriptStoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root).map_err(|source| {
            TranscriptStoreError::io("listing transcript directory", &self.root, source)
        })?;

        let mut summaries = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| {
                TranscriptStoreError::io("listing transcript directory", &self.root, source)
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let id = entry.file_name().to_string_lossy().into_owned();
            let record = read_record(&path)?;
            summaries.push(RecordSummary {
                id,
                timestamp: record.timestamp,
                title: record.title,
                created: record.created,
            });
        }

        summaries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(summaries)
    }

    pub fn load(&self, id: &str) -> Result<ConversationRecord, TranscriptStoreError> {
        if !is_bare_file_name(id) {
            return Err(TranscriptStoreError::not_found(id));
        }

        let path = self.root.join(id);
        if !path.is_file() {
            return Err(TranscriptStoreError::not_found(id));
        }

        read_record(&path)
    }

    pub fn delete(&self, id: &str) -> Result<(), TranscriptStoreError> {
        if !is_bare_file_name(id) {
            return Err(TranscriptStoreError::not_found(id));
        }

        let path = self.root.join(id);
        if !path.is_file() {
            return Err(TranscriptStoreError::not_found(id));
        }

        fs::remove_file(&path)
            .map_err(|source| TranscriptStoreError::io("deleting transcript file", &path, source))
    }
}

/// Record ids are bare file names; anything path-like (separators, `..`)
/// cannot address a record and must not resolve outside the store root.
fn is_bare_file_name(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && id != "." && id != ".."
}

fn read_record(path: &Path) -> Result<ConversationRecord, TranscriptStoreError> {
    let body = fs::read_to_string(path)
        .map_err(|source| TranscriptStoreError::io("reading transcript file", path, source))?;

    serde_json::from_str(&body).map_err(|source| TranscriptStoreError::parse(path, source))
}

fn compact_timestamp(now: OffsetDateTime) -> String {
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

fn available_file_name(root: &Path, timestamp: &str, title: &str) -> String {
    let candidate = record_file_name(timestamp, title);
    if !root.join(&candidate).exists() {
        return candidate;
    }

    let mut suffix = 2;
    loop {
        let candidate = record_file_name_with_suffix(timestamp, title, suffix);
        if !root.join(&candidate).exists() {
            return candidate;
        }
        suffix += 1;
    }
}
