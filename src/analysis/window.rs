//! Earliest and most recent messages of a thread.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AnalysisInput, Aggregator};
use crate::ContentRecord;
use crate::time::TimeBucketer;

/// One message of a window, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowEntry {
    pub sender: String,
    /// Local time formatted as `MM-DD-YYYY HH:MM`.
    pub time: String,
    pub text: String,
    /// The underlying UTC instant.
    pub timestamp: DateTime<Utc>,
}

impl WindowEntry {
    fn from_record(record: &ContentRecord, bucketer: &TimeBucketer) -> Self {
        Self {
            sender: record.sender_name.clone(),
            time: bucketer.format(record.timestamp),
            text: record.text.clone(),
            timestamp: record.timestamp,
        }
    }
}

fn chronological(records: &[ContentRecord]) -> Vec<&ContentRecord> {
    let mut sorted: Vec<&ContentRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.timestamp);
    sorted
}

/// The `n` earliest records, oldest first.
pub fn first_messages(
    records: &[ContentRecord],
    n: usize,
    bucketer: &TimeBucketer,
) -> Vec<WindowEntry> {
    chronological(records)
        .into_iter()
        .take(n)
        .map(|r| WindowEntry::from_record(r, bucketer))
        .collect()
}

/// The `n` most recent records, oldest first.
pub fn last_messages(
    records: &[ContentRecord],
    n: usize,
    bucketer: &TimeBucketer,
) -> Vec<WindowEntry> {
    let sorted = chronological(records);
    let start = sorted.len().saturating_sub(n);
    sorted[start..]
        .iter()
        .map(|r| WindowEntry::from_record(r, bucketer))
        .collect()
}

/// [`Aggregator`] for [`first_messages`].
#[derive(Debug, Clone, Copy)]
pub struct FirstMessages {
    pub n: usize,
}

impl Aggregator for FirstMessages {
    type Output = Vec<WindowEntry>;

    fn aggregate(&self, input: &AnalysisInput<'_>) -> Vec<WindowEntry> {
        first_messages(input.content, self.n, input.bucketer)
    }
}

/// [`Aggregator`] for [`last_messages`].
#[derive(Debug, Clone, Copy)]
pub struct LastMessages {
    pub n: usize,
}

impl Aggregator for LastMessages {
    type Output = Vec<WindowEntry>;

    fn aggregate(&self, input: &AnalysisInput<'_>) -> Vec<WindowEntry> {
        last_messages(input.content, self.n, input.bucketer)
    }
}
