use chat_provider::Message;
use serde::{Deserialize, Serialize};

/// One persisted conversation, mirroring the on-disk JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversationRecord {
    /// Compact save timestamp, `YYYYMMDD_HHMMSS`.
    pub timestamp: String,
    pub title: String,
    pub messages: Vec<Message>,
    /// RFC 3339 creation instant.
    pub created: String,
}

impl ConversationRecord {
    #[must_use]
    pub fn new(
        timestamp: impl Into<String>,
        title: impl Into<String>,
        messages: Vec<Message>,
        created: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            title: title.into(),
            messages,
            created: created.into(),
        }
    }
}

/// Listing entry for one saved conversation. `id` is the record's file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub id: String,
    pub timestamp: String,
    pub title: String,
    pub created: String,
}

impl RecordSummary {
    /// Title decorated with the save time as `title (MM/DD HH:MM)`.
    ///
    /// Falls back to the raw title when the timestamp does not match the
    /// compact `YYYYMMDD_HHMMSS` layout.
    #[must_use]
    pub fn display_title(&self) -> String {
        match compact_timestamp_parts(&self.timestamp) {
            Some((month, day, hour, minute)) => {
                format!("{} ({month}/{day} {hour}:{minute})", self.title)
            }
            None => self.title.clone(),
        }
    }
}

fn compact_timestamp_parts(timestamp: &str) -> Option<(&str, &str, &str, &str)> {
    if timestamp.len() != 15 || timestamp.as_bytes().get(8) != Some(&b'_') {
        return None;
    }

    let digits_ok = timestamp
        .bytes()
        .enumerate()
        .all(|(index, byte)| index == 8 || byte.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    Some((
        &timestamp[4..6],
        &timestamp[6..8],
        &timestamp[9..11],
        &timestamp[11..13],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(timestamp: &str) -> RecordSummary {
        RecordSummary {
            id: format!("{timestamp}_order_help....json"),
            timestamp: timestamp.to_string(),
            title: "order help...".to_string(),
            created: "2026-02-14T15:30:00Z".to_string(),
        }
    }

    #[test]
    fn display_title_includes_month_day_and_time() {
        assert_eq!(
            summary("20260214_153000").display_title(),
            "order help... (02/14 15:30)"
        );
    }

    #[test]
    fn display_title_falls_back_on_unparseable_timestamp() {
        assert_eq!(summary("not-a-timestamp").display_title(), "order help...");
        assert_eq!(summary("2026021X_153000").display_title(), "order help...");
    }
}
