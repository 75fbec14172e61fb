//! Time distributions: messages per local day and per (hour, month) cell.
//!
//! The two views read different inputs. The daily series counts genuine
//! content only, while the hour×month matrix counts every raw message,
//! action notices included, as a measure of overall thread activity.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{AnalysisInput, Aggregator};
use crate::time::TimeBucketer;
use crate::{ContentRecord, RawMessage};

/// Messages on one local calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Message counts by local hour (rows, 0–23) and month (columns, 1–12).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourMonthMatrix {
    counts: [[usize; 12]; 24],
}

impl HourMonthMatrix {
    /// Creates an all-zero matrix.
    pub fn new() -> Self {
        Self {
            counts: [[0; 12]; 24],
        }
    }

    /// Count for `hour` (0–23) and `month` (1–12); out-of-range cells are 0.
    pub fn get(&self, hour: u32, month: u32) -> usize {
        if hour > 23 || !(1..=12).contains(&month) {
            return 0;
        }
        self.counts[hour as usize][(month - 1) as usize]
    }

    fn increment(&mut self, hour: u32, month: u32) {
        self.counts[hour as usize][(month - 1) as usize] += 1;
    }

    /// Rows indexed by hour; column `i` is month `i + 1`.
    pub fn rows(&self) -> &[[usize; 12]; 24] {
        &self.counts
    }

    /// Sum of all cells.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

impl Default for HourMonthMatrix {
    fn default() -> Self {
        Self::new()
    }
}

/// Content messages per local date, sorted by date.
///
/// Only dates with at least one message appear; gaps are not zero-filled.
pub fn daily_series(records: &[ContentRecord], bucketer: &TimeBucketer) -> Vec<DailyCount> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        let date = bucketer.bucket(record.timestamp).date;
        *per_day.entry(date).or_insert(0) += 1;
    }

    per_day
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// Hour×month activity over every raw message, action notices included.
pub fn hour_month_matrix(messages: &[RawMessage], bucketer: &TimeBucketer) -> HourMonthMatrix {
    let mut matrix = HourMonthMatrix::new();
    for bucket in messages
        .iter()
        .filter_map(|msg| bucketer.bucket_ms(msg.timestamp_ms))
    {
        matrix.increment(bucket.hour, bucket.month);
    }
    matrix
}

/// [`Aggregator`] for [`daily_series`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DailySeries;

impl Aggregator for DailySeries {
    type Output = Vec<DailyCount>;

    fn aggregate(&self, input: &AnalysisInput<'_>) -> Vec<DailyCount> {
        daily_series(input.content, input.bucketer)
    }
}

/// [`Aggregator`] for [`hour_month_matrix`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HourMonth;

impl Aggregator for HourMonth {
    type Output = HourMonthMatrix;

    fn aggregate(&self, input: &AnalysisInput<'_>) -> HourMonthMatrix {
        hour_month_matrix(input.raw, input.bucketer)
    }
}
