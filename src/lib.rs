//! # igdigest
//!
//! A Rust library for turning an Instagram data export into statistics.
//!
//! ## Overview
//!
//! Instagram's "Download your information" archive stores each direct-message
//! thread as JSON with two quirks that make naive analysis wrong:
//!
//! - **Mojibake**: text is UTF-8 re-read as Latin-1, so `café` arrives as `cafÃ©`
//! - **Action notices**: "sent an attachment.", "Reacted ❤ to your message" and
//!   similar system events sit in the same array as real messages
//!
//! igdigest repairs the text, separates real content from notices, buckets
//! UTC timestamps into a chosen timezone, and computes a fixed set of views:
//! top words, top senders, a daily series, an hour×month activity matrix and
//! the first/last messages. Follow lists and liked comments get the same
//! load → normalize → window treatment.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use igdigest::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = AnalysisConfig::new().with_timezone_name("Europe/Berlin")?;
//!     let report = ThreadAnalyzer::with_config(config)
//!         .analyze_file("inbox/alice_123/message_1.json")?;
//!
//!     for word in &report.word_frequency {
//!         println!("{}: {}", word.word, word.count);
//!     }
//!     write_json(&report, "digest.json", true)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline Stages
//!
//! Each stage is a trait with a default implementation, so a stage can be
//! swapped without touching the others:
//!
//! | Stage | Trait | Default |
//! |-------|-------|---------|
//! | Load | [`Loader`](loader::Loader) | [`ThreadLoader`](loader::ThreadLoader) |
//! | Normalize | [`Normalizer`](normalize::Normalizer) | [`TextNormalizer`](normalize::TextNormalizer) |
//! | Classify | [`Classifier`](classify::Classifier) | [`ContentClassifier`](classify::ContentClassifier) |
//! | Aggregate | [`Aggregator`](analysis::Aggregator) | one struct per view |
//!
//! ## Module Structure
//!
//! - [`message`] - [`RawMessage`], [`ThreadDataset`], [`ContentRecord`]
//! - [`loader`] - JSON loading with typed failure kinds
//! - [`normalize`] - mojibake repair
//! - [`classify`] - action-notice exclusion
//! - [`time`] - timezone-aware bucketing
//! - [`analysis`] - the aggregate views
//! - [`pipeline`] - [`ThreadAnalyzer`](pipeline::ThreadAnalyzer) and [`ThreadReport`](pipeline::ThreadReport)
//! - [`activity`] - follow lists, liked comments, not-following-back
//! - [`output`] - JSON and CSV writers
//! - [`config`] - [`AnalysisConfig`](config::AnalysisConfig)
//! - [`error`] - [`DigestError`]
//!
//! ## Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `csv-output` | CSV writers | `csv` |
//! | `json-output` | JSON writers | - |
//! | `cli` | Argument types for the binary | `clap`, `tracing-subscriber` |
//! | `gen-test` | Synthetic export generator | `rand` |
//! | `full` | `csv-output`, `json-output`, `cli` (default) | |

pub mod activity;
pub mod analysis;
pub mod classify;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod message;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod time;

// Re-export the main types at the crate root for convenience
pub use error::{DigestError, Result};
pub use message::{ContentRecord, RawMessage, ThreadDataset};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use igdigest::prelude::*;
/// ```
pub mod prelude {
    // Message types
    pub use crate::{ContentRecord, RawMessage, ThreadDataset};

    // Error types
    pub use crate::error::{DigestError, Result};

    // Configuration
    pub use crate::config::{AnalysisConfig, DecodePolicy};

    // Pipeline stages
    pub use crate::analysis::{AnalysisInput, Aggregator};
    pub use crate::classify::{Classifier, ContentClassifier};
    pub use crate::loader::{Loader, ThreadLoader};
    pub use crate::normalize::{Normalizer, TextNormalizer};
    pub use crate::time::TimeBucketer;

    // End-to-end
    pub use crate::pipeline::{ThreadAnalyzer, ThreadReport};

    // Activity lists
    pub use crate::activity::{ListEntry, ListLoader, ListReport, not_following_back};

    // Output
    pub use crate::output::OutputFormat;
    #[cfg(feature = "csv-output")]
    pub use crate::output::{report_to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::output::{to_json, write_json};
}
