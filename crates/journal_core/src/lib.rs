//! Core domain logic for the journal.
//! This crate owns storage, entry invariants and the use-case API.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entry::{EntryId, EntryValidationError, JournalEntry, NewEntry};
pub use repo::entry_repo::{
    EntryFilter, EntryRepository, EntryScan, RepoError, RepoResult, SqliteEntryRepository,
};
pub use service::journal_service::JournalService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
