//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Section`] - Which archive document to analyze
//! - [`Format`] - Output format options
//!
//! # Example
//!
//! ```rust
//! use igdigest::cli::{Format, Section};
//!
//! assert_eq!("dm".parse::<Section>().unwrap(), Section::Messages);
//! assert_eq!(Format::Csv.extension(), "csv");
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, DecodePolicy};
use crate::error::Result;
use crate::output::OutputFormat;

/// Default output path; its extension follows `--format` when not overridden.
pub const DEFAULT_OUTPUT: &str = "digest.json";

/// Summarize an Instagram data export: message threads, follow lists and
/// liked comments.
#[derive(Parser, Debug, Clone)]
#[command(name = "igdigest")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    igdigest messages inbox/alice_123/message_1.json
    igdigest dm message_1.json --tz Europe/Berlin -f csv
    igdigest dm message_1.json --top 10 --exclude \"started a video chat\"
    igdigest following following.json --followers followers_1.json
    igdigest likes liked_comments.json -o likes.json")]
pub struct Args {
    /// Archive document type
    #[arg(value_enum)]
    pub section: Section,

    /// Path to input file
    pub input: String,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: Format,

    /// Timezone for dates, hours and months (IANA name)
    #[arg(long, value_name = "ZONE", default_value = "US/Pacific")]
    pub tz: String,

    /// Entries kept in ranked tables
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub top: usize,

    /// Entries in the first/last windows
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub window: usize,

    /// Extra phrase marking a message as a system action (repeatable)
    #[arg(long, value_name = "PHRASE")]
    pub exclude: Vec<String>,

    /// What to do with text that cannot be repaired: keep-raw, skip, fail
    #[arg(long, value_name = "POLICY", default_value = "keep-raw")]
    pub decode_policy: DecodePolicy,

    /// Disable the Latin-1/UTF-8 text repair
    #[arg(long)]
    pub no_fix_encoding: bool,

    /// Followers list to compare against (following section only)
    #[arg(long, value_name = "PATH")]
    pub followers: Option<String>,

    /// Log pipeline progress to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the analysis configuration from the flags.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidConfig`](crate::DigestError::InvalidConfig)
    /// for an unknown timezone or a zero `--top`/`--window`.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        if self.top == 0 {
            return Err(crate::DigestError::invalid_config("--top must be at least 1"));
        }
        if self.window == 0 {
            return Err(crate::DigestError::invalid_config("--window must be at least 1"));
        }

        let mut config = AnalysisConfig::new()
            .with_timezone_name(&self.tz)?
            .with_top_n(self.top)
            .with_window(self.window)
            .with_decode_policy(self.decode_policy)
            .with_fix_encoding(!self.no_fix_encoding);
        for phrase in &self.exclude {
            config = config.with_excluded_phrase(phrase.clone());
        }
        Ok(config)
    }

    /// Output path, with the extension following `--format` when the default is used.
    pub fn output_path(&self) -> String {
        if self.output != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        format!("digest.{}", self.format.extension())
    }
}

/// Archive documents the CLI understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// Direct-message thread (`message_N.json`)
    #[value(aliases = ["dm", "inbox"])]
    #[serde(alias = "dm")]
    Messages,

    /// Accounts you follow (`following.json`)
    #[value(alias = "follow")]
    Following,

    /// Comments you liked (`liked_comments.json`)
    #[value(alias = "likes")]
    #[serde(alias = "likes")]
    LikedComments,
}

impl Section {
    /// Returns all supported section names (including aliases).
    pub fn all_names() -> &'static [&'static str] {
        &[
            "messages",
            "dm",
            "inbox",
            "following",
            "follow",
            "liked-comments",
            "likes",
        ]
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Messages => write!(f, "Messages"),
            Section::Following => write!(f, "Following"),
            Section::LikedComments => write!(f, "Liked comments"),
        }
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "messages" | "dm" | "inbox" => Ok(Section::Messages),
            "following" | "follow" => Ok(Section::Following),
            "liked-comments" | "likes" => Ok(Section::LikedComments),
            _ => Err(format!(
                "Unknown section: '{}'. Expected one of: {}",
                s,
                Section::all_names().join(", ")
            )),
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Pretty-printed JSON report (default)
    #[default]
    Json,

    /// Semicolon-delimited tables
    Csv,
}

impl Format {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => write!(f, "JSON"),
            Format::Csv => write!(f, "CSV"),
        }
    }
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Csv => OutputFormat::Csv,
        }
    }
}
