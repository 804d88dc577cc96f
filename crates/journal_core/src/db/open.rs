//! Connection bootstrap for the journal database.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Set the busy timeout and apply the schema before handing out a connection.
//!
//! # Invariants
//! - Returned connections have the latest schema applied.
//! - Opening an already initialized database is a no-op on its contents.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const IN_MEMORY_LABEL: &str = ":memory:";

/// Opens (or creates) the journal database file and ensures its schema.
///
/// Safe to call on every process start.
///
/// # Errors
/// - [`DbError::StorageUnavailable`] when the file cannot be opened or the
///   table cannot be created.
/// - [`DbError::UnsupportedSchemaVersion`] when the file was written by a
///   newer schema than this binary knows.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode=file path={}",
        path.display()
    );

    let conn = Connection::open(path).map_err(|err| {
        error!(
            "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        DbError::StorageUnavailable {
            path: path.to_path_buf(),
            source: err,
        }
    })?;

    finish_open(conn, path.to_path_buf(), "file", started_at)
}

/// Opens an in-memory journal database with the schema applied.
///
/// Used by tests and throwaway sessions; nothing survives the connection.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = Connection::open_in_memory().map_err(|err| {
        error!(
            "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        DbError::StorageUnavailable {
            path: PathBuf::from(IN_MEMORY_LABEL),
            source: err,
        }
    })?;

    finish_open(conn, PathBuf::from(IN_MEMORY_LABEL), "memory", started_at)
}

fn finish_open(
    mut conn: Connection,
    path: PathBuf,
    mode: &str,
    started_at: Instant,
) -> DbResult<Connection> {
    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(match err {
                DbError::Sqlite(source) => DbError::StorageUnavailable { path, source },
                other => other,
            })
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}
