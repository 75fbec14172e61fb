//! Aggregate views over a classified thread.
//!
//! This module contains:
//! - [`counts`] - word-frequency and per-sender tables
//! - [`timeline`] - daily series and the hour×month matrix
//! - [`window`] - first/last N messages in chronological order
//!
//! Each view is a pure function of its input and never fails; empty input
//! gives an empty view. Views are available both as free functions and as
//! [`Aggregator`] implementations that read from a shared [`AnalysisInput`].
//!
//! # Example
//!
//! ```rust
//! use igdigest::analysis::{AnalysisInput, Aggregator, WordFrequency};
//! use igdigest::time::TimeBucketer;
//! use igdigest::ContentRecord;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
//! let content = vec![
//!     ContentRecord::new("alice", ts, "a b"),
//!     ContentRecord::new("bob", ts, "a c"),
//! ];
//! let bucketer = TimeBucketer::default();
//! let input = AnalysisInput::new(&[], &content, &bucketer);
//!
//! let words = WordFrequency::new(5).aggregate(&input);
//! assert_eq!(words[0].word, "a");
//! assert_eq!(words[0].count, 2);
//! ```

pub mod counts;
pub mod timeline;
pub mod window;

pub use counts::{SenderCount, SenderCounts, WordCount, WordFrequency, sender_counts, word_frequency};
pub use timeline::{
    DailyCount, DailySeries, HourMonth, HourMonthMatrix, daily_series, hour_month_matrix,
};
pub use window::{FirstMessages, LastMessages, WindowEntry, first_messages, last_messages};

use crate::time::TimeBucketer;
use crate::{ContentRecord, RawMessage};

/// Everything an aggregator may read.
///
/// `raw` is the full normalized message set (action notices included);
/// `content` is the classified subset.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub raw: &'a [RawMessage],
    pub content: &'a [ContentRecord],
    pub bucketer: &'a TimeBucketer,
}

impl<'a> AnalysisInput<'a> {
    pub fn new(
        raw: &'a [RawMessage],
        content: &'a [ContentRecord],
        bucketer: &'a TimeBucketer,
    ) -> Self {
        Self {
            raw,
            content,
            bucketer,
        }
    }
}

/// Aggregation stage of the pipeline.
pub trait Aggregator {
    /// The view this aggregator produces.
    type Output;

    /// Computes the view.
    fn aggregate(&self, input: &AnalysisInput<'_>) -> Self::Output;
}

/// Number of genuine content messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCount;

impl Aggregator for MessageCount {
    type Output = usize;

    fn aggregate(&self, input: &AnalysisInput<'_>) -> usize {
        input.content.len()
    }
}
