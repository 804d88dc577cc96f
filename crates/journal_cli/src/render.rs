//! Terminal formatting for journal entries.

use chrono::{DateTime, TimeZone};
use journal_core::JournalEntry;
use std::fmt::Display;

/// Header format, e.g. `Monday March 04, 2024 09:15AM`.
pub const HEADER_FORMAT: &str = "%A %B %d, %Y %I:%M%p";

/// Formats an entry timestamp as a browse header.
pub fn header<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format(HEADER_FORMAT).to_string()
}

/// `=` repeated once per character of `header`.
pub fn underline(header: &str) -> String {
    "=".repeat(header.chars().count())
}

/// Header, underline and content, one per line.
pub fn entry_block(entry: &JournalEntry) -> String {
    let header = header(&entry.created_at_local());
    let underline = underline(&header);
    format!("{header}\n{underline}\n{}", entry.content)
}
