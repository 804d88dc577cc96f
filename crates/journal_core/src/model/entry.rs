//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the persisted entry record and the insert request shape.
//! - Own the content validation rule shared by write and read paths.
//!
//! # Invariants
//! - `content` is never blank after trimming.
//! - `created_at` is fixed at creation and never rewritten.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Surrogate key assigned by the store on insert.
pub type EntryId = i64;

/// Validation failures for entry content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Content is empty or whitespace only.
    BlankContent,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankContent => write!(f, "entry content must not be blank"),
        }
    }
}

impl Error for EntryValidationError {}

/// One user-authored, timestamped block of free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    /// Stored exactly as submitted, including inner whitespace.
    pub content: String,
    /// Unix epoch milliseconds (UTC) of the creation moment.
    pub created_at: i64,
}

impl JournalEntry {
    /// Checks the content invariant.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_content(&self.content)
    }

    /// Creation moment in the local time zone.
    ///
    /// Falls back to the Unix epoch if the stored value is out of range.
    pub fn created_at_local(&self) -> DateTime<Local> {
        Local
            .timestamp_millis_opt(self.created_at)
            .single()
            .unwrap_or_else(|| DateTime::<Utc>::default().with_timezone(&Local))
    }
}

/// Insert request for a not-yet-persisted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub content: String,
    pub created_at: i64,
}

impl NewEntry {
    /// Builds a request stamped with the current time.
    pub fn now(content: impl Into<String>) -> Self {
        Self::at(content, Utc::now().timestamp_millis())
    }

    /// Builds a request with a caller-provided creation time.
    ///
    /// Used by tests that need deterministic timestamps.
    pub fn at(content: impl Into<String>, created_at: i64) -> Self {
        Self {
            content: content.into(),
            created_at,
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_content(&self.content)
    }
}

/// Returns whether `content` would be discarded as blank.
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

fn validate_content(content: &str) -> Result<(), EntryValidationError> {
    if is_blank(content) {
        return Err(EntryValidationError::BlankContent);
    }
    Ok(())
}
