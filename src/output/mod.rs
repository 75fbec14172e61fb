//! Report writers.
//!
//! - [`write_json`] / [`to_json`] - any report as JSON - requires `json-output` feature
//! - [`write_csv`] / [`report_to_csv`] - a thread report as `;`-delimited tables - requires `csv-output` feature
//!
//! CSV has no notion of nested data, so a [`ThreadReport`](crate::pipeline::ThreadReport)
//! becomes several tables separated by blank lines, one per view. Each table
//! can also be produced on its own with the `*_to_csv` functions.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> igdigest::Result<()> {
//! use igdigest::output::{OutputFormat, write_csv, write_json};
//! use igdigest::pipeline::ThreadAnalyzer;
//!
//! let report = ThreadAnalyzer::new().analyze_file("inbox/alice_123/message_1.json")?;
//!
//! match OutputFormat::from_path("digest.csv")? {
//!     OutputFormat::Csv => write_csv(&report, "digest.csv")?,
//!     OutputFormat::Json => write_json(&report, "digest.json", true)?,
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{
    daily_series_to_csv, list_entries_to_csv, list_report_to_csv, matrix_to_csv, report_to_csv,
    sender_counts_to_csv, window_to_csv, word_frequency_to_csv, write_csv, write_list_csv,
};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};

use serde::{Deserialize, Serialize};

use crate::error::DigestError;

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    #[default]
    Json,

    /// Semicolon-delimited tables
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "csv"]
    }

    /// Detects the format from a file extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use igdigest::output::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/digest.CSV").unwrap(), OutputFormat::Csv);
    /// assert!(OutputFormat::from_path("digest.txt").is_err());
    /// ```
    pub fn from_path(path: &str) -> Result<Self, DigestError> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();
        ext.parse().map_err(|_| {
            DigestError::invalid_config(format!(
                "cannot infer output format from '{}' (expected .json or .csv)",
                path
            ))
        })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}
