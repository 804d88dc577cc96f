//! Entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide append and ordered scan APIs over the `entries` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Scans are ordered by `created_at DESC, id DESC`.
//! - Substring filters are literal and case-sensitive.
//! - A scan pulls one row per step and may be abandoned at any point.

use crate::db::DbError;
use crate::model::entry::{EntryId, EntryValidationError, JournalEntry, NewEntry};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    content,
    created_at
FROM entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Lazy, one-shot sequence of entries produced by [`EntryRepository::scan_entries`].
pub type EntryScan<'a> = Box<dyn Iterator<Item = RepoResult<JournalEntry>> + 'a>;

/// Repository error for entry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Scan filter for entry listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Literal, case-sensitive substring the content must contain.
    pub contains: Option<String>,
}

impl EntryFilter {
    /// Matches every entry.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches entries containing `needle`.
    ///
    /// An empty needle matches everything and is normalized to no filter.
    pub fn containing(needle: impl Into<String>) -> Self {
        let needle = needle.into();
        Self {
            contains: (!needle.is_empty()).then_some(needle),
        }
    }
}

/// Repository interface for the journal entry store.
pub trait EntryRepository {
    fn create_entry(&self, entry: &NewEntry) -> RepoResult<JournalEntry>;
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<JournalEntry>>;
    fn count_entries(&self) -> RepoResult<u64>;
    fn scan_entries(&self, filter: &EntryFilter) -> EntryScan<'_>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn create_entry(&self, entry: &NewEntry) -> RepoResult<JournalEntry> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO entries (content, created_at) VALUES (?1, ?2);",
            params![entry.content.as_str(), entry.created_at],
        )?;

        Ok(JournalEntry {
            id: self.conn.last_insert_rowid(),
            content: entry.content.clone(),
            created_at: entry.created_at,
        })
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<JournalEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }

        Ok(None)
    }

    fn count_entries(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative entry count `{count}`")))
    }

    fn scan_entries(&self, filter: &EntryFilter) -> EntryScan<'_> {
        Box::new(EntryCursor::new(self.conn, filter.clone()))
    }
}

/// Keyset cursor over `entries`, newest first.
///
/// Each step fetches the single row that sorts after the last one returned,
/// so no statement stays open between steps.
struct EntryCursor<'conn> {
    conn: &'conn Connection,
    filter: EntryFilter,
    last_key: Option<(i64, EntryId)>,
    finished: bool,
}

impl<'conn> EntryCursor<'conn> {
    fn new(conn: &'conn Connection, filter: EntryFilter) -> Self {
        Self {
            conn,
            filter,
            last_key: None,
            finished: false,
        }
    }

    fn fetch_next(&self) -> RepoResult<Option<JournalEntry>> {
        let mut sql = format!("{ENTRY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some((created_at, id)) = self.last_key {
            sql.push_str(" AND (created_at < ? OR (created_at = ? AND id < ?))");
            bind_values.push(Value::Integer(created_at));
            bind_values.push(Value::Integer(created_at));
            bind_values.push(Value::Integer(id));
        }

        if let Some(needle) = &self.filter.contains {
            // instr() is binary and wildcard-free, unlike LIKE.
            sql.push_str(" AND instr(content, ?) > 0");
            bind_values.push(Value::Text(needle.clone()));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT 1");

        let mut stmt = self.conn.prepare(&sql)?;
        let entry = stmt
            .query_row(params_from_iter(bind_values), |row| Ok(parse_entry_row(row)))
            .optional()?
            .transpose()?;

        Ok(entry)
    }
}

impl Iterator for EntryCursor<'_> {
    type Item = RepoResult<JournalEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.fetch_next() {
            Ok(Some(entry)) => {
                self.last_key = Some((entry.created_at, entry.id));
                Some(Ok(entry))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<JournalEntry> {
    let entry = JournalEntry {
        id: row.get("id")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
    };
    entry.validate().map_err(|err| {
        RepoError::InvalidData(format!("entries.content for id {}: {err}", entry.id))
    })?;
    Ok(entry)
}
