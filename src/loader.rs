//! Loading of export files.
//!
//! The [`Loader`] trait is the first pipeline stage: it turns a path (or
//! in-memory JSON) into typed records. [`ThreadLoader`] reads a message
//! thread; the [`activity`](crate::activity) module implements the same
//! trait for follow lists and like logs.
//!
//! Failure kinds are kept apart on purpose:
//!
//! - missing path → [`DigestError::NotFound`]
//! - malformed JSON → [`DigestError::Parse`]
//! - valid JSON of the wrong shape → [`DigestError::Schema`]
//!
//! # Example
//!
//! ```rust
//! use igdigest::loader::{Loader, ThreadLoader};
//!
//! # fn main() -> igdigest::Result<()> {
//! let json = r#"{
//!   "participants": [{"name": "alice"}, {"name": "bob"}],
//!   "messages": [
//!     {"sender_name": "bob", "timestamp_ms": 1700000060000, "content": "hey"},
//!     {"sender_name": "alice", "timestamp_ms": 1700000000000}
//!   ]
//! }"#;
//!
//! let dataset = ThreadLoader::new().load_str(json)?;
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.participants, vec!["alice", "bob"]);
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::DEFAULT_MESSAGES_KEY;
use crate::error::{DigestError, Result};
use crate::{RawMessage, ThreadDataset};

/// Loading stage of the pipeline.
pub trait Loader {
    /// What one file loads into.
    type Output;

    /// Human-readable name of the document type.
    fn name(&self) -> &'static str;

    /// Loads from in-memory JSON.
    fn load_str(&self, content: &str) -> Result<Self::Output>;

    /// Loads from a file.
    ///
    /// # Errors
    ///
    /// - [`DigestError::NotFound`] if the path does not exist
    /// - [`DigestError::Parse`] if the file is not valid JSON (with the path attached)
    /// - [`DigestError::Schema`] if the JSON has the wrong shape
    fn load(&self, path: &Path) -> Result<Self::Output> {
        let content = fs::read_to_string(path).map_err(|e| DigestError::from_read(e, path))?;
        debug!(loader = self.name(), path = %path.display(), bytes = content.len(), "read export");
        self.load_str(&content).map_err(|e| match e {
            DigestError::Parse { source, path: None } => {
                DigestError::parse(source, Some(path.to_path_buf()))
            }
            other => other,
        })
    }

    /// Loads from a file (convenience method accepting &str path).
    fn load_file(&self, path: &str) -> Result<Self::Output> {
        self.load(Path::new(path))
    }
}

/// Loader for a direct-message thread (`message_N.json`).
#[derive(Debug, Clone)]
pub struct ThreadLoader {
    messages_key: String,
}

impl ThreadLoader {
    /// Creates a loader reading the `messages` key.
    pub fn new() -> Self {
        Self::with_key(DEFAULT_MESSAGES_KEY)
    }

    /// Creates a loader reading a custom top-level key.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            messages_key: key.into(),
        }
    }

    /// Returns the key holding the message array.
    pub fn messages_key(&self) -> &str {
        &self.messages_key
    }
}

impl Default for ThreadLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for ThreadLoader {
    type Output = ThreadDataset;

    fn name(&self) -> &'static str {
        "message thread"
    }

    fn load_str(&self, content: &str) -> Result<ThreadDataset> {
        let mut root = parse_object(content)?;
        let items = take_array(&mut root, &self.messages_key)?;

        let mut messages = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            messages.push(parse_raw_message(index, item)?);
        }

        let participants = root
            .get("participants")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|p| p.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let title = root
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string);

        debug!(messages = messages.len(), "loaded thread");

        Ok(ThreadDataset {
            title,
            participants,
            messages,
        })
    }
}

fn parse_raw_message(index: usize, item: Value) -> Result<RawMessage> {
    if !item.is_object() {
        return Err(DigestError::schema(format!(
            "message #{} is {}, expected an object",
            index,
            json_kind(&item)
        )));
    }

    let msg: RawMessage = serde_json::from_value(item)
        .map_err(|e| DigestError::schema(format!("message #{}: {}", index, e)))?;

    if msg.timestamp().is_none() {
        return Err(DigestError::schema(format!(
            "message #{}: timestamp_ms {} is out of range",
            index, msg.timestamp_ms
        )));
    }

    Ok(msg)
}

/// Parses JSON text into a value, reporting malformed input as a parse error.
pub(crate) fn parse_value(content: &str) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| DigestError::parse(e, None))
}

/// Parses JSON text that must be an object at the top level.
pub(crate) fn parse_object(content: &str) -> Result<Map<String, Value>> {
    match parse_value(content)? {
        Value::Object(map) => Ok(map),
        other => Err(DigestError::schema(format!(
            "top-level value is {}, expected an object",
            json_kind(&other)
        ))),
    }
}

/// Removes `key` from `root` and checks that it holds an array.
pub(crate) fn take_array(root: &mut Map<String, Value>, key: &str) -> Result<Vec<Value>> {
    match root.remove(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(DigestError::schema(format!(
            "'{}' is {}, expected an array",
            key,
            json_kind(&other)
        ))),
        None => Err(DigestError::schema(format!("missing '{}' array", key))),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
