//! End-to-end thread analysis.
//!
//! [`ThreadAnalyzer`] wires the stages together:
//!
//! ```text
//! load → normalize → classify → aggregate
//! ```
//!
//! and returns a [`ThreadReport`] holding every view. The analyzer only
//! reads its configuration, so one instance can analyze any number of threads.
//!
//! # Example
//!
//! ```rust
//! use igdigest::config::AnalysisConfig;
//! use igdigest::pipeline::ThreadAnalyzer;
//!
//! # fn main() -> igdigest::Result<()> {
//! let json = r#"{"messages": [
//!     {"sender_name": "bob", "timestamp_ms": 1700000060000, "content": "see you soon"},
//!     {"sender_name": "alice", "timestamp_ms": 1700000000000, "content": "Reacted â\u009d¤ to your message"},
//!     {"sender_name": "alice", "timestamp_ms": 1699999000000, "content": "cafÃ© at 8?"}
//! ]}"#;
//!
//! let analyzer = ThreadAnalyzer::with_config(AnalysisConfig::new().with_timezone(chrono_tz::UTC));
//! let report = analyzer.analyze_str(json)?;
//!
//! assert_eq!(report.total_messages, 3);
//! assert_eq!(report.content_messages, 2);
//! assert_eq!(report.first_messages[0].text, "café at 8?");
//! assert_eq!(report.hour_month_matrix.total(), 3);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::{
    AnalysisInput, Aggregator, DailyCount, DailySeries, FirstMessages, HourMonth,
    HourMonthMatrix, LastMessages, MessageCount, SenderCount, SenderCounts, WindowEntry,
    WordCount, WordFrequency,
};
use crate::classify::{Classifier, ContentClassifier};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::loader::{Loader, ThreadLoader};
use crate::normalize::{Normalizer, TextNormalizer};
use crate::time::TimeBucketer;
use crate::ThreadDataset;

/// Every view computed for one thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub participants: Vec<String>,
    /// IANA name of the zone used for bucketing.
    pub timezone: String,
    /// Raw messages that survived normalization (the matrix population).
    pub total_messages: usize,
    /// Messages kept by the classifier.
    pub content_messages: usize,
    /// Messages dropped because their text could not be repaired.
    pub skipped_records: usize,
    pub word_frequency: Vec<WordCount>,
    pub sender_counts: Vec<SenderCount>,
    pub daily_series: Vec<DailyCount>,
    pub hour_month_matrix: HourMonthMatrix,
    pub first_messages: Vec<WindowEntry>,
    pub last_messages: Vec<WindowEntry>,
}

/// Runs the full pipeline for message threads.
#[derive(Debug, Clone)]
pub struct ThreadAnalyzer {
    config: AnalysisConfig,
    loader: ThreadLoader,
    normalizer: TextNormalizer,
    classifier: ContentClassifier,
    bucketer: TimeBucketer,
}

impl ThreadAnalyzer {
    /// Creates an analyzer with default settings.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Creates an analyzer from a configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        let normalizer = if config.fix_encoding {
            TextNormalizer::new(config.decode_policy)
        } else {
            TextNormalizer::disabled()
        };

        Self {
            loader: ThreadLoader::with_key(config.messages_key.clone()),
            normalizer,
            classifier: ContentClassifier::new(config.excluded_phrases.iter().cloned()),
            bucketer: TimeBucketer::new(config.timezone),
            config,
        }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Loads and analyzes a thread file.
    ///
    /// # Errors
    ///
    /// Propagates loader errors and, under [`DecodePolicy::Fail`](crate::config::DecodePolicy::Fail),
    /// decode errors.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<ThreadReport> {
        let path = path.as_ref();
        info!(path = %path.display(), "analyzing thread");
        let dataset = self.loader.load(path)?;
        self.analyze_dataset(dataset)
    }

    /// Analyzes a thread held in memory as JSON text.
    pub fn analyze_str(&self, content: &str) -> Result<ThreadReport> {
        let dataset = self.loader.load_str(content)?;
        self.analyze_dataset(dataset)
    }

    /// Analyzes an already-loaded thread.
    pub fn analyze_dataset(&self, dataset: ThreadDataset) -> Result<ThreadReport> {
        let loaded = dataset.len();

        let title = match dataset.title {
            Some(title) => self.normalizer.normalize_text("title", title)?,
            None => None,
        };
        let mut participants = Vec::with_capacity(dataset.participants.len());
        for name in dataset.participants {
            if let Some(name) = self.normalizer.normalize_text("participants", name)? {
                participants.push(name);
            }
        }

        let raw = self.normalizer.normalize_all(dataset.messages)?;
        let skipped_records = loaded - raw.len();
        debug!(loaded, kept = raw.len(), skipped_records, "normalized thread");

        let content = self.classifier.classify(&raw);
        let input = AnalysisInput::new(&raw, &content, &self.bucketer);

        let report = ThreadReport {
            title,
            participants,
            timezone: self.config.timezone.name().to_string(),
            total_messages: raw.len(),
            content_messages: MessageCount.aggregate(&input),
            skipped_records,
            word_frequency: WordFrequency::new(self.config.top_n).aggregate(&input),
            sender_counts: SenderCounts::new(self.config.top_n).aggregate(&input),
            daily_series: DailySeries.aggregate(&input),
            hour_month_matrix: HourMonth.aggregate(&input),
            first_messages: FirstMessages { n: self.config.window }.aggregate(&input),
            last_messages: LastMessages { n: self.config.window }.aggregate(&input),
        };

        info!(
            total = report.total_messages,
            content = report.content_messages,
            days = report.daily_series.len(),
            "thread analyzed"
        );

        Ok(report)
    }
}

impl Default for ThreadAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecodePolicy;
    use crate::RawMessage;

    fn utc_analyzer() -> ThreadAnalyzer {
        ThreadAnalyzer::with_config(AnalysisConfig::new().with_timezone(chrono_tz::UTC))
    }

    #[test]
    fn test_empty_thread() {
        let report = utc_analyzer().analyze_str(r#"{"messages": []}"#).unwrap();
        assert_eq!(report.total_messages, 0);
        assert_eq!(report.content_messages, 0);
        assert!(report.word_frequency.is_empty());
        assert!(report.sender_counts.is_empty());
        assert!(report.daily_series.is_empty());
        assert_eq!(report.hour_month_matrix.total(), 0);
        assert!(report.first_messages.is_empty());
        assert!(report.last_messages.is_empty());
        assert_eq!(report.timezone, "UTC");
    }

    #[test]
    fn test_actions_count_in_matrix_only() {
        let dataset = ThreadDataset::new(vec![
            RawMessage::new("a", 1_700_000_000_000).with_content("hello there"),
            RawMessage::new("b", 1_700_000_001_000).with_content("b shared a story."),
            RawMessage::new("b", 1_700_000_002_000),
        ]);
        let report = utc_analyzer().analyze_dataset(dataset).unwrap();
        assert_eq!(report.total_messages, 3);
        assert_eq!(report.content_messages, 1);
        assert_eq!(report.hour_month_matrix.total(), 3);
        assert_eq!(report.sender_counts.len(), 1);
        assert_eq!(report.sender_counts[0].sender, "a");
    }

    #[test]
    fn test_header_is_normalized() {
        let dataset = ThreadDataset {
            title: Some("Jos\u{00c3}\u{00a9}".into()),
            participants: vec!["Jos\u{00c3}\u{00a9}".into(), "ann".into()],
            messages: vec![RawMessage::new("Jos\u{00c3}\u{00a9}", 0).with_content("hi")],
        };
        let report = utc_analyzer().analyze_dataset(dataset).unwrap();
        assert_eq!(report.title.as_deref(), Some("José"));
        assert_eq!(report.participants, vec!["José", "ann"]);
        assert_eq!(report.sender_counts[0].sender, "José");
    }

    #[test]
    fn test_skip_policy_counts_skipped() {
        let analyzer = ThreadAnalyzer::with_config(
            AnalysisConfig::new()
                .with_timezone(chrono_tz::UTC)
                .with_decode_policy(DecodePolicy::Skip),
        );
        let dataset = ThreadDataset::new(vec![
            RawMessage::new("a", 0).with_content("fine"),
            RawMessage::new("a", 1000).with_content("broken \u{00c3}"),
        ]);
        let report = analyzer.analyze_dataset(dataset).unwrap();
        assert_eq!(report.skipped_records, 1);
        assert_eq!(report.total_messages, 1);
    }

    #[test]
    fn test_fail_policy_propagates() {
        let analyzer = ThreadAnalyzer::with_config(
            AnalysisConfig::new().with_decode_policy(DecodePolicy::Fail),
        );
        let dataset =
            ThreadDataset::new(vec![RawMessage::new("a", 0).with_content("broken \u{00c3}")]);
        let err = analyzer.analyze_dataset(dataset).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_disabled_repair_keeps_text() {
        let analyzer = ThreadAnalyzer::with_config(
            AnalysisConfig::new()
                .with_timezone(chrono_tz::UTC)
                .with_fix_encoding(false),
        );
        let dataset =
            ThreadDataset::new(vec![RawMessage::new("a", 0).with_content("caf\u{00c3}\u{00a9}")]);
        let report = analyzer.analyze_dataset(dataset).unwrap();
        assert_eq!(report.first_messages[0].text, "caf\u{00c3}\u{00a9}");
    }

    #[test]
    fn test_custom_phrases_and_sizes() {
        let analyzer = ThreadAnalyzer::with_config(
            AnalysisConfig::new()
                .with_timezone(chrono_tz::UTC)
                .with_excluded_phrases(["noise"])
                .with_top_n(1)
                .with_window(1),
        );
        let dataset = ThreadDataset::new(vec![
            RawMessage::new("a", 3000).with_content("x y"),
            RawMessage::new("b", 2000).with_content("x"),
            RawMessage::new("b", 1000).with_content("noise here"),
            RawMessage::new("c", 500).with_content("a sent an attachment."),
        ]);
        let report = analyzer.analyze_dataset(dataset).unwrap();
        assert_eq!(report.content_messages, 3);
        assert_eq!(report.word_frequency.len(), 1);
        assert_eq!(report.word_frequency[0].word, "x");
        assert_eq!(report.first_messages.len(), 1);
        assert_eq!(report.first_messages[0].sender, "c");
        assert_eq!(report.last_messages[0].text, "x y");
    }
}
