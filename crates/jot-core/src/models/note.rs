//! Note model
//!
//! A note exists in two states. [`NewNote`] is the unsaved form built from
//! user input; [`Note`] is what the store hands back once a row exists and
//! carries the store-assigned [`NoteId`]. Only `NewNote::persisted` moves a
//! value from one to the other.

use chrono::{DateTime, Datelike, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Store-assigned identifier for a persisted note.
///
/// Ids come from an `AUTOINCREMENT` key: strictly increasing, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw row id
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value, as stored in the `id` column
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A note that has not been written to the store yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    /// Plain text content
    pub content: String,
    /// Creation timestamp, truncated to microseconds
    pub created_time: DateTime<Utc>,
}

impl NewNote {
    /// Create an unsaved note stamped with the current time
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_created_time(content, Utc::now())
    }

    /// Create an unsaved note with an explicit creation time
    #[must_use]
    pub fn with_created_time(content: impl Into<String>, created_time: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            created_time: created_time.trunc_subsecs(6),
        }
    }

    /// Attach the store-assigned id, producing the saved form
    #[must_use]
    pub fn persisted(self, id: NoteId) -> Note {
        Note {
            id,
            content: self.content,
            created_time: self.created_time,
        }
    }
}

/// A note that exists in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Store-assigned identifier
    pub id: NoteId,
    /// Plain text content
    pub content: String,
    /// Creation timestamp
    pub created_time: DateTime<Utc>,
}

impl Note {
    /// Get first line as title preview, truncated to `max_len` characters
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        self.content
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(max_len)
            .collect()
    }

    /// Check if note content is empty (whitespace-only counts as empty)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Serialize a timestamp for the `createdTime` column.
///
/// Always UTC, fixed microsecond precision, `Z` suffix, so that lexical
/// ordering of the stored text matches chronological ordering.
#[must_use]
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Serialize a timestamp for storage, rejecting years outside `0000..=9999`.
///
/// RFC 3339 has no representation for those years, so they could be written
/// but never parsed back.
pub fn storable_timestamp(time: &DateTime<Utc>) -> Result<String> {
    if !(0..=9999).contains(&time.year()) {
        return Err(Error::InvalidTimestamp(format!(
            "year {} is outside 0000..=9999",
            time.year()
        )));
    }
    Ok(format_timestamp(time))
}

/// Parse a `createdTime` column value back into a timestamp
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|error| Error::InvalidTimestamp(format!("{value:?}: {error}")))
}
