//! Separation of genuine content from system notices.
//!
//! A raw message is kept only if it has a non-blank `content` that contains
//! none of the configured action phrases. Matching is case-sensitive substring
//! containment: one phrase anywhere discards the whole message, even when it is
//! mixed with user text.
//!
//! # Example
//!
//! ```
//! use igdigest::classify::{Classifier, ContentClassifier};
//! use igdigest::RawMessage;
//!
//! let classifier = ContentClassifier::default();
//! let messages = vec![
//!     RawMessage::new("alice", 1).with_content("see you at 8"),
//!     RawMessage::new("bob", 2).with_content("alice sent an attachment."),
//!     RawMessage::new("bob", 3),
//! ];
//!
//! let records = classifier.classify(&messages);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].text, "see you at 8");
//! ```

use tracing::debug;

use crate::config::DEFAULT_EXCLUDED_PHRASES;
use crate::{ContentRecord, RawMessage};

/// Content-classification stage of the pipeline.
pub trait Classifier {
    /// Returns `true` if `msg` is genuine user content.
    fn keep(&self, msg: &RawMessage) -> bool;

    /// Returns the kept subset as [`ContentRecord`]s, in input order.
    fn classify(&self, messages: &[RawMessage]) -> Vec<ContentRecord> {
        let records: Vec<ContentRecord> = messages
            .iter()
            .filter(|msg| self.keep(msg))
            .filter_map(ContentRecord::from_raw)
            .collect();
        debug!(
            input = messages.len(),
            kept = records.len(),
            "classified messages"
        );
        records
    }
}

/// Default [`Classifier`] driven by a phrase exclusion list.
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    phrases: Vec<String>,
}

impl ContentClassifier {
    /// Creates a classifier with a custom phrase list.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the configured phrases.
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Returns `true` if `text` contains any excluded phrase.
    pub fn is_action(&self, text: &str) -> bool {
        self.phrases.iter().any(|p| text.contains(p.as_str()))
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PHRASES.iter().copied())
    }
}

impl Classifier for ContentClassifier {
    fn keep(&self, msg: &RawMessage) -> bool {
        match msg.content.as_deref() {
            Some(text) if !text.trim().is_empty() => !self.is_action(text),
            _ => false,
        }
    }
}
