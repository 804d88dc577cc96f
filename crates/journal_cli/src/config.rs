//! Runtime settings for the journal binary.
//!
//! Nothing is read from flags, files or the environment; every value is
//! fixed here.

use journal_core::default_log_level;
use std::path::PathBuf;

/// Database file, relative to the working directory.
pub const DB_FILE_NAME: &str = "journal.db";
const LOG_DIR_NAME: &str = "journal-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DB_FILE_NAME),
            log_dir: std::env::temp_dir().join(LOG_DIR_NAME),
            log_level: default_log_level(),
        }
    }
}
