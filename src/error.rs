//! Unified error types for igdigest.
//!
//! Every fallible operation in the crate returns [`DigestError`]. The variants
//! map one-to-one onto the failure kinds a caller needs to tell apart:
//!
//! | Variant | When |
//! |---------|------|
//! | [`NotFound`](DigestError::NotFound) | the input path does not exist |
//! | [`Parse`](DigestError::Parse) | the file is not valid JSON |
//! | [`Schema`](DigestError::Schema) | valid JSON, but not the expected export shape |
//! | [`Decode`](DigestError::Decode) | mojibake repair failed on a text field |
//!
//! Loader and normalizer errors are never retried; they reach the caller as-is.
//! Aggregators never fail.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for igdigest operations.
///
/// # Example
///
/// ```rust
/// use igdigest::error::Result;
/// use igdigest::RawMessage;
///
/// fn my_function() -> Result<Vec<RawMessage>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, DigestError>;

/// The error type for all igdigest operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DigestError {
    /// The input path does not exist.
    #[error("File not found: {}", path.display())]
    NotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// The input is not well-formed JSON.
    #[error("Failed to parse JSON{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The JSON is valid but does not have the expected structure.
    ///
    /// This occurs when:
    /// - The top-level message array key is missing
    /// - The key holds something other than an array
    /// - An element is not an object or misses `sender_name` / `timestamp_ms`
    #[error("Unexpected export structure: {message}")]
    Schema {
        /// Description of what's wrong
        message: String,
    },

    /// Text normalization failed on a field.
    #[error("Cannot repair encoding of '{field}': {reason}")]
    Decode {
        /// Name of the field being normalized (e.g. `content`)
        field: &'static str,
        /// Why the Latin-1 → UTF-8 round-trip failed
        reason: String,
    },

    /// A configuration value was rejected.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the bad value
        message: String,
    },

    /// An I/O error other than a missing file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error while writing output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl DigestError {
    /// Maps an I/O error from reading `path`, turning `NotFound` into
    /// [`DigestError::NotFound`].
    pub fn from_read(err: io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            DigestError::NotFound { path: path.into() }
        } else {
            DigestError::Io(err)
        }
    }

    /// Creates a JSON parse error.
    pub fn parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        DigestError::Parse { source, path }
    }

    /// Creates a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        DigestError::Schema {
            message: message.into(),
        }
    }

    /// Creates a decode error for `field`.
    pub fn decode(field: &'static str, reason: impl Into<String>) -> Self {
        DigestError::Decode {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        DigestError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns `true` if the input path was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DigestError::NotFound { .. })
    }

    /// Returns `true` if the input was not valid JSON.
    pub fn is_parse(&self) -> bool {
        matches!(self, DigestError::Parse { .. })
    }

    /// Returns `true` if the JSON had the wrong structure.
    pub fn is_schema(&self) -> bool {
        matches!(self, DigestError::Schema { .. })
    }

    /// Returns `true` if text normalization failed.
    pub fn is_decode(&self) -> bool {
        matches!(self, DigestError::Decode { .. })
    }
}
