//! Ranked tables: word frequency and messages per sender.
//!
//! Ranking is by count, descending. Ties keep first-encountered order, so the
//! same input always ranks the same way.

use indexmap::IndexMap;
use serde::Serialize;

use super::{AnalysisInput, Aggregator};
use crate::ContentRecord;

/// One row of the word-frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// One row of the sender table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenderCount {
    pub sender: String,
    pub count: usize,
    /// Share of all content messages, 0–100.
    pub percentage: f64,
}

/// Counts items in first-seen order and returns the `top_n` largest counts.
fn rank<'a>(items: impl IntoIterator<Item = &'a str>, top_n: usize) -> Vec<(&'a str, usize)> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // sort_by is stable: equal counts stay in insertion order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);
    ranked
}

/// Most common whitespace-separated tokens across all records.
///
/// Tokens are compared exactly: no case folding, no punctuation stripping.
///
/// # Example
///
/// ```
/// use igdigest::analysis::word_frequency;
/// use igdigest::ContentRecord;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let records: Vec<ContentRecord> = ["a b", "a c", "a"]
///     .iter()
///     .map(|t| ContentRecord::new("x", now, *t))
///     .collect();
///
/// let top = word_frequency(&records, 5);
/// let pairs: Vec<(&str, usize)> = top.iter().map(|w| (w.word.as_str(), w.count)).collect();
/// assert_eq!(pairs, vec![("a", 3), ("b", 1), ("c", 1)]);
/// ```
pub fn word_frequency(records: &[ContentRecord], top_n: usize) -> Vec<WordCount> {
    rank(records.iter().flat_map(|r| r.tokens()), top_n)
        .into_iter()
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect()
}

/// Number of content messages per sender, with each sender's share.
pub fn sender_counts(records: &[ContentRecord], top_n: usize) -> Vec<SenderCount> {
    let total = records.len();
    rank(records.iter().map(|r| r.sender_name.as_str()), top_n)
        .into_iter()
        .map(|(sender, count)| SenderCount {
            sender: sender.to_string(),
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect()
}

/// [`Aggregator`] for [`word_frequency`].
#[derive(Debug, Clone, Copy)]
pub struct WordFrequency {
    pub top_n: usize,
}

impl WordFrequency {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }
}

impl Aggregator for WordFrequency {
    type Output = Vec<WordCount>;

    fn aggregate(&self, input: &AnalysisInput<'_>) -> Vec<WordCount> {
        word_frequency(input.content, self.top_n)
    }
}

/// [`Aggregator`] for [`sender_counts`].
#[derive(Debug, Clone, Copy)]
pub struct SenderCounts {
    pub top_n: usize,
}

impl SenderCounts {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }
}

impl Aggregator for SenderCounts {
    type Output = Vec<SenderCount>;

    fn aggregate(&self, input: &AnalysisInput<'_>) -> Vec<SenderCount> {
        sender_counts(input.content, self.top_n)
    }
}
