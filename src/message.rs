//! Message types flowing through the pipeline.
//!
//! - [`RawMessage`] - one element of the export's message array, as exported
//! - [`ThreadDataset`] - every raw message of one thread file, in file order
//! - [`ContentRecord`] - a normalized message that passed classification
//!
//! # Example
//!
//! ```
//! use igdigest::{ContentRecord, RawMessage};
//!
//! let raw = RawMessage::new("alice", 1_700_000_000_000).with_content("hi there");
//! assert_eq!(raw.content(), Some("hi there"));
//!
//! let record = ContentRecord::from_raw(&raw).unwrap();
//! assert_eq!(record.text, "hi there");
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One exported message unit.
///
/// `sender_name` and `timestamp_ms` are always present; `content` is absent
/// for attachment-only or reaction-only events. The auxiliary fields are kept
/// as opaque JSON so unusual shapes never fail deserialization, and any other
/// keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Display name of the author, possibly mis-encoded.
    pub sender_name: String,

    /// Milliseconds since the Unix epoch, UTC.
    pub timestamp_ms: i64,

    /// Text body, if any.
    #[serde(default)]
    pub content: Option<String>,

    /// Shared link / post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share: Option<Value>,

    /// Emoji reactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_files: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Value>,
}

impl RawMessage {
    /// Creates a message without content or attachments.
    pub fn new(sender_name: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            sender_name: sender_name.into(),
            timestamp_ms,
            content: None,
            share: None,
            reactions: None,
            photos: None,
            audio_files: None,
            videos: None,
        }
    }

    /// Builder method to set the text body.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Returns the text body, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the UTC instant, or `None` if the value is out of range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp_ms).single()
    }

    /// Returns `true` if the message carries photos, videos, audio or a share.
    pub fn has_attachments(&self) -> bool {
        self.share.is_some()
            || self.photos.is_some()
            || self.audio_files.is_some()
            || self.videos.is_some()
    }
}

/// Every raw message of one exported thread, in file order.
///
/// File order is not guaranteed to be chronological (Instagram writes newest
/// first); consumers that care sort explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreadDataset {
    /// Thread title, when the export has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Participant names listed in the export header.
    pub participants: Vec<String>,

    /// Raw messages in export order.
    pub messages: Vec<RawMessage>,
}

impl ThreadDataset {
    /// Creates a dataset from bare messages.
    pub fn new(messages: Vec<RawMessage>) -> Self {
        Self {
            title: None,
            participants: Vec::new(),
            messages,
        }
    }

    /// Number of raw messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the thread has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over the raw messages in export order.
    pub fn iter(&self) -> std::slice::Iter<'_, RawMessage> {
        self.messages.iter()
    }
}

/// A genuine, normalized message ready for aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Normalized sender name.
    pub sender_name: String,

    /// When the message was sent (UTC; localize with a
    /// [`TimeBucketer`](crate::time::TimeBucketer)).
    pub timestamp: DateTime<Utc>,

    /// Normalized message body.
    pub text: String,
}

impl ContentRecord {
    /// Creates a record from its parts.
    pub fn new(
        sender_name: impl Into<String>,
        timestamp: DateTime<Utc>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender_name: sender_name.into(),
            timestamp,
            text: text.into(),
        }
    }

    /// Builds a record from a raw message that has content and a valid
    /// timestamp. No classification is applied here.
    pub fn from_raw(msg: &RawMessage) -> Option<Self> {
        let text = msg.content.as_ref()?;
        let timestamp = msg.timestamp()?;
        Some(Self::new(msg.sender_name.clone(), timestamp, text.clone()))
    }

    /// Iterates over whitespace-separated tokens of the body.
    pub fn tokens(&self) -> std::str::SplitWhitespace<'_> {
        self.text.split_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_message_deserialize_minimal() {
        let json = r#"{"sender_name": "alice", "timestamp_ms": 1700000000000}"#;
        let msg: RawMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.sender_name, "alice");
        assert_eq!(msg.timestamp_ms, 1700000000000);
        assert!(msg.content.is_none());
        assert!(!msg.has_attachments());
    }

    #[test]
    fn test_raw_message_tolerates_aux_fields() {
        let json = r#"{
            "sender_name": "bob",
            "timestamp_ms": 1700000000000,
            "content": null,
            "photos": [{"uri": "photo.jpg", "creation_timestamp": 1}],
            "reactions": [{"reaction": "â\u009d¤", "actor": "alice"}],
            "share": {"link": "https://example.com"},
            "is_geoblocked_for_viewer": false
        }"#;
        let msg: RawMessage = serde_json::from_str(json).unwrap();
        assert!(msg.content.is_none());
        assert!(msg.has_attachments());
        assert!(msg.reactions.is_some());
    }

    #[test]
    fn test_raw_message_missing_sender_fails() {
        let json = r#"{"timestamp_ms": 1700000000000, "content": "hi"}"#;
        assert!(serde_json::from_str::<RawMessage>(json).is_err());
    }

    #[test]
    fn test_raw_message_timestamp() {
        let msg = RawMessage::new("alice", 1672531200000);
        let ts = msg.timestamp().unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());

        let out_of_range = RawMessage::new("alice", i64::MAX);
        assert!(out_of_range.timestamp().is_none());
    }

    #[test]
    fn test_content_record_from_raw() {
        let raw = RawMessage::new("alice", 1672531200000).with_content("hello world");
        let record = ContentRecord::from_raw(&raw).unwrap();
        assert_eq!(record.sender_name, "alice");
        assert_eq!(record.text, "hello world");
        assert_eq!(record.tokens().collect::<Vec<_>>(), vec!["hello", "world"]);

        let empty = RawMessage::new("alice", 1672531200000);
        assert!(ContentRecord::from_raw(&empty).is_none());
    }

    #[test]
    fn test_dataset_accessors() {
        let dataset = ThreadDataset::new(vec![
            RawMessage::new("a", 1),
            RawMessage::new("b", 2),
        ]);
        assert_eq!(dataset.len(), 2);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.iter().count(), 2);
        assert!(ThreadDataset::default().is_empty());
    }
}
