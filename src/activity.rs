//! Follow lists and like logs.
//!
//! Besides message threads, an archive holds flat lists of accounts: who you
//! follow, who follows you, and whose comments you liked. Every list element
//! wraps its payload in a one-item `string_list_data` array:
//!
//! ```json
//! {"title": "", "string_list_data": [
//!     {"href": "https://www.instagram.com/alice", "value": "alice", "timestamp": 1650000000}
//! ]}
//! ```
//!
//! Timestamps here are epoch **seconds**, unlike the milliseconds of messages.
//!
//! # Example
//!
//! ```rust
//! use igdigest::activity::{ListLoader, not_following_back};
//! use igdigest::loader::Loader;
//!
//! # fn main() -> igdigest::Result<()> {
//! let following = ListLoader::following().load_str(r#"{"relationships_following": [
//!     {"string_list_data": [{"href": "https://www.instagram.com/a", "value": "a", "timestamp": 1}]},
//!     {"string_list_data": [{"href": "https://www.instagram.com/b", "value": "b", "timestamp": 2}]}
//! ]}"#)?;
//! let followers = ListLoader::followers().load_str(r#"[
//!     {"string_list_data": [{"href": "https://www.instagram.com/a", "value": "a", "timestamp": 3}]}
//! ]"#)?;
//!
//! let missing = not_following_back(&followers, &following);
//! assert_eq!(missing.len(), 1);
//! assert_eq!(missing[0].value, "b");
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{DigestError, Result};
use crate::loader::{Loader, json_kind, parse_object, parse_value, take_array};
use crate::normalize::{Normalizer, TextNormalizer};
use crate::time::{DISPLAY_FORMAT, TimeBucketer};

/// One account (or liked comment) from a list document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    /// Parent title; for liked comments this is the comment author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Username or comment text.
    pub value: String,
    /// Profile or post link.
    pub href: String,
    /// Epoch seconds, UTC.
    pub timestamp: i64,
}

impl ListEntry {
    /// Creates an entry without a title.
    pub fn new(value: impl Into<String>, href: impl Into<String>, timestamp: i64) -> Self {
        Self {
            title: None,
            value: value.into(),
            href: href.into(),
            timestamp,
        }
    }

    /// Builder method to set the parent title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Deserialize)]
struct StringListItem {
    #[serde(default)]
    href: String,
    #[serde(default)]
    value: String,
    timestamp: i64,
}

/// Document layouts understood by [`ListLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `following.json`: object with a `relationships_following` array.
    Following,
    /// `followers_1.json`: top-level array.
    Followers,
    /// `liked_comments.json`: object with a `likes_comment_likes` array.
    LikedComments,
}

impl ListKind {
    /// Top-level key holding the list, or `None` for a bare array.
    pub fn key(self) -> Option<&'static str> {
        match self {
            ListKind::Following => Some("relationships_following"),
            ListKind::Followers => None,
            ListKind::LikedComments => Some("likes_comment_likes"),
        }
    }
}

/// [`Loader`] for follow lists and like logs.
#[derive(Debug, Clone, Copy)]
pub struct ListLoader {
    kind: ListKind,
    normalizer: TextNormalizer,
}

impl ListLoader {
    /// Creates a loader for `kind` with default text repair.
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            normalizer: TextNormalizer::default(),
        }
    }

    pub fn following() -> Self {
        Self::new(ListKind::Following)
    }

    pub fn followers() -> Self {
        Self::new(ListKind::Followers)
    }

    pub fn liked_comments() -> Self {
        Self::new(ListKind::LikedComments)
    }

    /// Replaces the text normalizer applied to `title` and `value`.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Returns the document layout.
    pub fn kind(&self) -> ListKind {
        self.kind
    }

    fn parse_entry(&self, index: usize, item: &Value) -> Result<Option<ListEntry>> {
        let data = item
            .get("string_list_data")
            .and_then(Value::as_array)
            .and_then(|list| list.first())
            .ok_or_else(|| {
                DigestError::schema(format!(
                    "entry #{} has no string_list_data item (got {})",
                    index,
                    json_kind(item)
                ))
            })?;

        let raw: StringListItem = serde_json::from_value(data.clone())
            .map_err(|e| DigestError::schema(format!("entry #{}: {}", index, e)))?;

        if chrono::DateTime::from_timestamp(raw.timestamp, 0).is_none() {
            return Err(DigestError::schema(format!(
                "entry #{}: timestamp {} is out of range",
                index, raw.timestamp
            )));
        }

        let Some(value) = self.normalizer.normalize_text("value", raw.value)? else {
            return Ok(None);
        };

        let title = match item.get("title").and_then(Value::as_str) {
            Some(t) if !t.is_empty() => {
                match self.normalizer.normalize_text("title", t.to_string())? {
                    Some(fixed) => Some(fixed),
                    None => return Ok(None),
                }
            }
            _ => None,
        };

        Ok(Some(ListEntry {
            title,
            value,
            href: raw.href,
            timestamp: raw.timestamp,
        }))
    }
}

impl Loader for ListLoader {
    type Output = Vec<ListEntry>;

    fn name(&self) -> &'static str {
        match self.kind {
            ListKind::Following => "following list",
            ListKind::Followers => "followers list",
            ListKind::LikedComments => "liked comments",
        }
    }

    fn load_str(&self, content: &str) -> Result<Vec<ListEntry>> {
        let items = match self.kind.key() {
            Some(key) => take_array(&mut parse_object(content)?, key)?,
            None => match parse_value(content)? {
                Value::Array(items) => items,
                other => {
                    return Err(DigestError::schema(format!(
                        "top-level value is {}, expected an array",
                        json_kind(&other)
                    )));
                }
            },
        };

        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(entry) = self.parse_entry(index, item)? {
                entries.push(entry);
            }
        }

        debug!(loader = self.name(), entries = entries.len(), "loaded list");
        Ok(entries)
    }
}

/// A list entry prepared for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListWindowEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub value: String,
    pub href: String,
    /// Local time formatted as `MM-DD-YYYY HH:MM`.
    pub time: String,
}

impl ListWindowEntry {
    /// Formats `entry` with its local time in the bucketer's zone.
    pub fn from_entry(entry: &ListEntry, bucketer: &TimeBucketer) -> Self {
        Self {
            title: entry.title.clone(),
            value: entry.value.clone(),
            href: entry.href.clone(),
            time: bucketer
                .localize_secs(entry.timestamp)
                .map(|t| t.format(DISPLAY_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }
}

fn chronological(entries: &[ListEntry]) -> Vec<&ListEntry> {
    let mut sorted: Vec<&ListEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);
    sorted
}

/// The `n` oldest entries, oldest first.
pub fn first_entries(
    entries: &[ListEntry],
    n: usize,
    bucketer: &TimeBucketer,
) -> Vec<ListWindowEntry> {
    chronological(entries)
        .into_iter()
        .take(n)
        .map(|e| ListWindowEntry::from_entry(e, bucketer))
        .collect()
}

/// The `n` newest entries, oldest first.
pub fn recent_entries(
    entries: &[ListEntry],
    n: usize,
    bucketer: &TimeBucketer,
) -> Vec<ListWindowEntry> {
    let sorted = chronological(entries);
    let start = sorted.len().saturating_sub(n);
    sorted[start..]
        .iter()
        .map(|e| ListWindowEntry::from_entry(e, bucketer))
        .collect()
}

/// Summary of one list document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListReport {
    /// Document name, e.g. `following list`.
    pub kind: String,
    /// Number of entries loaded.
    pub total: usize,
    pub first: Vec<ListWindowEntry>,
    pub recent: Vec<ListWindowEntry>,
    /// Present when a followers list was supplied alongside `following`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_following_back: Option<Vec<ListWindowEntry>>,
}

impl ListReport {
    /// Builds the first/recent windows for `entries`.
    pub fn new(
        kind: impl Into<String>,
        entries: &[ListEntry],
        n: usize,
        bucketer: &TimeBucketer,
    ) -> Self {
        Self {
            kind: kind.into(),
            total: entries.len(),
            first: first_entries(entries, n, bucketer),
            recent: recent_entries(entries, n, bucketer),
            not_following_back: None,
        }
    }

    /// Attaches the accounts that do not follow back, in `following` order.
    #[must_use]
    pub fn with_not_following_back(
        mut self,
        missing: &[ListEntry],
        bucketer: &TimeBucketer,
    ) -> Self {
        self.not_following_back = Some(
            missing
                .iter()
                .map(|e| ListWindowEntry::from_entry(e, bucketer))
                .collect(),
        );
        self
    }
}

/// Accounts in `following` that are absent from `followers`.
///
/// Accounts match on `(href, value)`. Each account appears once, in the
/// order of its first occurrence in `following`.
pub fn not_following_back(followers: &[ListEntry], following: &[ListEntry]) -> Vec<ListEntry> {
    let known: HashSet<(&str, &str)> = followers
        .iter()
        .map(|e| (e.href.as_str(), e.value.as_str()))
        .collect();

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut missing = Vec::new();
    for entry in following {
        let id = (entry.href.as_str(), entry.value.as_str());
        if !known.contains(&id) && seen.insert(id) {
            missing.push(entry.clone());
        }
    }
    missing
}
