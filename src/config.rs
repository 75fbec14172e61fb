//! Configuration for the analysis pipeline.
//!
//! [`AnalysisConfig`] holds every knob the pipeline reads: the target
//! timezone, the action-phrase exclusion list, top-N and window sizes, and the
//! text-repair policy. It is built once at startup and treated as read-only.
//!
//! # Example
//!
//! ```rust
//! use igdigest::config::{AnalysisConfig, DecodePolicy};
//!
//! # fn main() -> igdigest::Result<()> {
//! let config = AnalysisConfig::new()
//!     .with_timezone_name("Europe/Berlin")?
//!     .with_top_n(10)
//!     .with_excluded_phrase("started a video chat")
//!     .with_decode_policy(DecodePolicy::Skip);
//!
//! assert_eq!(config.top_n, 10);
//! # Ok(())
//! # }
//! ```

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::DigestError;

/// System-action phrases that mark a message as a notice rather than user text.
///
/// Matching is case-sensitive substring containment.
pub const DEFAULT_EXCLUDED_PHRASES: &[&str] = &[
    "sent an attachment.",
    "shared a story.",
    "Liked a message",
    "Reacted",
    "to your message",
    "liked a message",
];

/// Default top-level key holding the message array in a thread export.
pub const DEFAULT_MESSAGES_KEY: &str = "messages";

/// What to do with a record whose text cannot be repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodePolicy {
    /// Keep the original, uncorrected string (default).
    #[default]
    KeepRaw,

    /// Drop the whole record.
    Skip,

    /// Abort with [`DigestError::Decode`].
    Fail,
}

impl std::fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodePolicy::KeepRaw => write!(f, "keep-raw"),
            DecodePolicy::Skip => write!(f, "skip"),
            DecodePolicy::Fail => write!(f, "fail"),
        }
    }
}

impl std::str::FromStr for DecodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep-raw" | "keep" | "raw" => Ok(DecodePolicy::KeepRaw),
            "skip" | "drop" => Ok(DecodePolicy::Skip),
            "fail" | "error" => Ok(DecodePolicy::Fail),
            _ => Err(format!(
                "Unknown decode policy: '{}'. Expected one of: keep-raw, skip, fail",
                s
            )),
        }
    }
}

/// Configuration for a thread analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Timezone used for every date/hour/month bucket (default: US/Pacific)
    pub timezone: Tz,

    /// Substrings that mark a message as a system action
    pub excluded_phrases: Vec<String>,

    /// Number of entries kept by word-frequency and sender tables (default: 5)
    pub top_n: usize,

    /// Number of records in the first/last message windows (default: 5)
    pub window: usize,

    /// Repair Meta's Latin-1/UTF-8 mojibake on ingestion (default: true)
    pub fix_encoding: bool,

    /// Handling of fields that cannot be repaired (default: keep raw)
    pub decode_policy: DecodePolicy,

    /// Top-level key holding the message array (default: `messages`)
    pub messages_key: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::US::Pacific,
            excluded_phrases: DEFAULT_EXCLUDED_PHRASES
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
            top_n: 5,
            window: 5,
            fix_encoding: true,
            decode_policy: DecodePolicy::KeepRaw,
            messages_key: DEFAULT_MESSAGES_KEY.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target timezone.
    #[must_use]
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = tz;
        self
    }

    /// Sets the target timezone from an IANA name such as `America/New_York`.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidConfig`] if the name is unknown.
    pub fn with_timezone_name(mut self, name: &str) -> Result<Self, DigestError> {
        self.timezone = parse_timezone(name)?;
        Ok(self)
    }

    /// Replaces the excluded phrase list.
    #[must_use]
    pub fn with_excluded_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    /// Appends one phrase to the excluded list.
    #[must_use]
    pub fn with_excluded_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.excluded_phrases.push(phrase.into());
        self
    }

    /// Sets the number of entries kept by ranked tables.
    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Sets the size of the first/last message windows.
    #[must_use]
    pub fn with_window(mut self, n: usize) -> Self {
        self.window = n;
        self
    }

    /// Enables or disables the mojibake repair.
    #[must_use]
    pub fn with_fix_encoding(mut self, fix: bool) -> Self {
        self.fix_encoding = fix;
        self
    }

    /// Sets the policy for fields that cannot be repaired.
    #[must_use]
    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    /// Sets the top-level key holding the message array.
    #[must_use]
    pub fn with_messages_key(mut self, key: impl Into<String>) -> Self {
        self.messages_key = key.into();
        self
    }
}

/// Parses an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz, DigestError> {
    name.parse::<Tz>()
        .map_err(|_| DigestError::invalid_config(format!("unknown timezone '{}'", name)))
}
