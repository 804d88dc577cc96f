//! Journal use-case service.
//!
//! # Responsibility
//! - Provide the append/list/search entry points the shell calls.
//! - Stamp creation time and drop blank submissions before they reach storage.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Listing and searching share one ordering: newest first, later insert
//!   first on equal timestamps.

use crate::model::entry::{is_blank, EntryId, JournalEntry, NewEntry};
use crate::repo::entry_repo::{EntryFilter, EntryRepository, EntryScan, RepoResult};
use log::{debug, info};

/// Use-case service wrapper around an entry repository.
pub struct JournalService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> JournalService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Appends a new entry stamped with the current time.
    ///
    /// # Contract
    /// - Blank content (empty after trimming) is discarded: returns
    ///   `Ok(None)` and persists nothing.
    /// - Otherwise stores `content` unchanged and returns the stored record.
    pub fn create_entry(&self, content: impl Into<String>) -> RepoResult<Option<JournalEntry>> {
        let content = content.into();
        if is_blank(&content) {
            debug!("event=entry_create module=service status=skipped reason=blank");
            return Ok(None);
        }

        let entry = self.repo.create_entry(&NewEntry::now(content))?;
        info!(
            "event=entry_create module=service status=ok id={} chars={}",
            entry.id,
            entry.content.chars().count()
        );
        Ok(Some(entry))
    }

    /// Gets one entry by ID.
    pub fn get_entry(&self, id: EntryId) -> RepoResult<Option<JournalEntry>> {
        self.repo.get_entry(id)
    }

    /// Returns the number of stored entries.
    pub fn entry_count(&self) -> RepoResult<u64> {
        self.repo.count_entries()
    }

    /// Lazily walks entries matching `filter`, newest first.
    ///
    /// The returned scan is one-shot; call again to restart from the top.
    pub fn browse(&self, filter: &EntryFilter) -> EntryScan<'_> {
        debug!(
            "event=entry_browse module=service filtered={}",
            filter.contains.is_some()
        );
        self.repo.scan_entries(filter)
    }

    /// Returns every entry, newest first.
    pub fn list_entries(&self) -> RepoResult<Vec<JournalEntry>> {
        self.browse(&EntryFilter::all()).collect()
    }

    /// Returns entries whose content contains `query` literally
    /// (case-sensitive), newest first. An empty query lists everything.
    pub fn search_entries(&self, query: &str) -> RepoResult<Vec<JournalEntry>> {
        self.browse(&EntryFilter::containing(query)).collect()
    }
}
