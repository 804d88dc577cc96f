//! Journal domain model.
//!
//! # Invariants
//! - Every entry is identified by a store-assigned `EntryId`.
//! - Entries are append-only: no update, no delete.

pub mod entry;
