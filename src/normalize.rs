//! Repair of Meta's double-encoded text.
//!
//! Meta exports UTF-8 text as if it were ISO-8859-1: every UTF-8 byte becomes
//! its own codepoint, so `"café"` is stored as `"cafÃ©"` and emoji turn into
//! four-character garbage. [`fix_mojibake`] reverses that by taking every char
//! as one Latin-1 byte and decoding the bytes as UTF-8.
//!
//! The repair is only meaningful on text that actually went through the
//! broken export. Run it exactly once, at ingestion; text that is already
//! correct is not guaranteed to survive a second pass.
//!
//! # Example
//!
//! ```
//! use igdigest::normalize::fix_mojibake;
//!
//! assert_eq!(fix_mojibake("Hello").unwrap(), "Hello");
//! assert_eq!(fix_mojibake("caf\u{00c3}\u{00a9}").unwrap(), "café");
//! assert!(fix_mojibake("caf\u{00c3}").is_err());
//! ```

use thiserror::Error;
use tracing::warn;

use crate::RawMessage;
use crate::config::DecodePolicy;
use crate::error::{DigestError, Result};

/// Why a string could not be repaired.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MojibakeError {
    /// A char above U+00FF has no Latin-1 byte.
    #[error("character {ch:?} at position {index} is outside Latin-1")]
    NotLatin1 { ch: char, index: usize },

    /// The recovered bytes are not valid UTF-8.
    #[error("recovered bytes are not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
}

/// Reverses the Latin-1 mis-decoding of a UTF-8 string.
///
/// ASCII input is returned unchanged.
pub fn fix_mojibake(s: &str) -> std::result::Result<String, MojibakeError> {
    if s.is_ascii() {
        return Ok(s.to_string());
    }

    let mut bytes = Vec::with_capacity(s.len());
    for (index, ch) in s.chars().enumerate() {
        let byte = u8::try_from(u32::from(ch)).map_err(|_| MojibakeError::NotLatin1 { ch, index })?;
        bytes.push(byte);
    }

    String::from_utf8(bytes).map_err(|e| MojibakeError::InvalidUtf8 {
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}

/// Text-repair stage of the pipeline.
pub trait Normalizer {
    /// Normalizes one free-text field.
    ///
    /// Returns `Ok(None)` when the owning record should be dropped.
    fn normalize_text(&self, field: &'static str, text: String) -> Result<Option<String>>;

    /// Normalizes `sender_name` and `content` of one message.
    ///
    /// Returns `Ok(None)` when the message should be dropped.
    fn normalize_message(&self, mut msg: RawMessage) -> Result<Option<RawMessage>> {
        let Some(sender) = self.normalize_text("sender_name", msg.sender_name)? else {
            return Ok(None);
        };
        msg.sender_name = sender;

        if let Some(content) = msg.content.take() {
            match self.normalize_text("content", content)? {
                Some(fixed) => msg.content = Some(fixed),
                None => return Ok(None),
            }
        }

        Ok(Some(msg))
    }

    /// Normalizes a whole message sequence, preserving order.
    fn normalize_all(&self, messages: Vec<RawMessage>) -> Result<Vec<RawMessage>> {
        let mut out = Vec::with_capacity(messages.len());
        for msg in messages {
            if let Some(msg) = self.normalize_message(msg)? {
                out.push(msg);
            }
        }
        Ok(out)
    }
}

/// Default [`Normalizer`]: mojibake repair governed by a [`DecodePolicy`].
#[derive(Debug, Clone, Copy)]
pub struct TextNormalizer {
    enabled: bool,
    policy: DecodePolicy,
}

impl TextNormalizer {
    /// Creates an enabled normalizer with the given failure policy.
    pub fn new(policy: DecodePolicy) -> Self {
        Self {
            enabled: true,
            policy,
        }
    }

    /// Creates a normalizer that passes text through untouched.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            policy: DecodePolicy::KeepRaw,
        }
    }

    /// Returns the failure policy.
    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Returns `true` if repair is applied.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(DecodePolicy::default())
    }
}

impl Normalizer for TextNormalizer {
    fn normalize_text(&self, field: &'static str, text: String) -> Result<Option<String>> {
        if !self.enabled {
            return Ok(Some(text));
        }

        match fix_mojibake(&text) {
            Ok(fixed) => Ok(Some(fixed)),
            Err(err) => match self.policy {
                DecodePolicy::KeepRaw => {
                    warn!(field, error = %err, "keeping unrepaired text");
                    Ok(Some(text))
                }
                DecodePolicy::Skip => {
                    warn!(field, error = %err, "dropping record with unrepairable text");
                    Ok(None)
                }
                DecodePolicy::Fail => Err(DigestError::decode(field, err.to_string())),
            },
        }
    }
}
