//! Timezone-aware bucketing of export timestamps.
//!
//! Export timestamps are epoch milliseconds in UTC. Every conversion here
//! anchors the value as UTC first and only then moves it into the target
//! zone, so buckets follow the local calendar, DST shifts included.
//!
//! # Example
//!
//! ```
//! use igdigest::time::TimeBucketer;
//! use chrono::NaiveDate;
//!
//! let bucketer = TimeBucketer::new(chrono_tz::US::Pacific);
//!
//! // 2023-01-02T01:00:00Z is still Jan 1st in California
//! let bucket = bucketer.bucket_ms(1672621200000).unwrap();
//! assert_eq!(bucket.date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
//! assert_eq!(bucket.hour, 17);
//! assert_eq!(bucket.month, 1);
//! ```

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Display format for window entries: `MM-DD-YYYY HH:MM`.
pub const DISPLAY_FORMAT: &str = "%m-%d-%Y %H:%M";

/// Calendar buckets of one instant in the target zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeBucket {
    /// Local calendar date.
    pub date: NaiveDate,
    /// Local hour, 0–23.
    pub hour: u32,
    /// Local month, 1–12.
    pub month: u32,
}

/// Converts UTC instants into local time in one configured zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBucketer {
    tz: Tz,
}

impl TimeBucketer {
    /// Creates a bucketer for `tz`.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Returns the target zone.
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Anchors epoch milliseconds as UTC and converts to the target zone.
    ///
    /// Returns `None` for values outside chrono's representable range.
    pub fn localize_ms(&self, timestamp_ms: i64) -> Option<DateTime<Tz>> {
        Utc.timestamp_millis_opt(timestamp_ms)
            .single()
            .map(|utc| self.localize(utc))
    }

    /// Anchors epoch seconds as UTC and converts to the target zone.
    pub fn localize_secs(&self, timestamp: i64) -> Option<DateTime<Tz>> {
        Utc.timestamp_opt(timestamp, 0)
            .single()
            .map(|utc| self.localize(utc))
    }

    /// Converts a UTC instant to the target zone.
    pub fn localize(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.tz)
    }

    /// Date/hour/month of a UTC instant in the target zone.
    pub fn bucket(&self, utc: DateTime<Utc>) -> TimeBucket {
        let local = self.localize(utc);
        TimeBucket {
            date: local.date_naive(),
            hour: local.hour(),
            month: local.month(),
        }
    }

    /// Date/hour/month of epoch milliseconds in the target zone.
    pub fn bucket_ms(&self, timestamp_ms: i64) -> Option<TimeBucket> {
        Utc.timestamp_millis_opt(timestamp_ms)
            .single()
            .map(|utc| self.bucket(utc))
    }

    /// Formats a UTC instant in the target zone with [`DISPLAY_FORMAT`].
    pub fn format(&self, utc: DateTime<Utc>) -> String {
        self.localize(utc).format(DISPLAY_FORMAT).to_string()
    }
}

impl Default for TimeBucketer {
    fn default() -> Self {
        Self::new(chrono_tz::US::Pacific)
    }
}
