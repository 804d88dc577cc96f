//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the entry store contract used by the service layer.
//! - Isolate SQLite query details from use-case orchestration.
//!
//! # Invariants
//! - Writes enforce `NewEntry::validate()` before persistence.
//! - Reads reject invalid persisted rows instead of masking them.

pub mod entry_repo;
