use journal_core::db::migrations::{apply_migrations, latest_version};
use journal_core::db::{open_db, open_db_in_memory, DbError};
use journal_core::{EntryRepository, NewEntry, SqliteEntryRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_entries_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "entries");
}

#[test]
fn open_db_configures_busy_timeout_only() {
    let conn = open_db_in_memory().unwrap();

    let busy_timeout_ms: i64 = conn
        .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(busy_timeout_ms, 5_000);

    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 0);
}

#[test]
fn opening_same_database_twice_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");

    let conn_first = open_db(&path).unwrap();
    SqliteEntryRepository::new(&conn_first)
        .create_entry(&NewEntry::at("kept across opens", 1_000))
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let repo = SqliteEntryRepository::new(&conn_second);
    assert_eq!(repo.count_entries().unwrap(), 1);
    drop(conn_second);

    let conn_third = open_db(&path).unwrap();
    assert_eq!(SqliteEntryRepository::new(&conn_third).count_entries().unwrap(), 1);
}

#[test]
fn applying_schema_twice_on_one_connection_is_a_noop() {
    let mut conn = open_db_in_memory().unwrap();
    SqliteEntryRepository::new(&conn)
        .create_entry(&NewEntry::at("only once", 1_000))
        .unwrap();

    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(SqliteEntryRepository::new(&conn).count_entries().unwrap(), 1);
}

#[test]
fn opening_under_missing_directory_reports_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("journal.db");

    let err = open_db(&path).unwrap_err();
    assert!(err.is_storage_unavailable());
    match err {
        DbError::StorageUnavailable { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_non_database_file_reports_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");
    std::fs::write(&path, vec![b'x'; 4096]).unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(err.is_storage_unavailable(), "unexpected error: {err}");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn stored_entries_reject_updates() {
    let conn = open_db_in_memory().unwrap();
    let entry = SqliteEntryRepository::new(&conn)
        .create_entry(&NewEntry::at("original", 1_000))
        .unwrap();

    let result = conn.execute(
        "UPDATE entries SET content = 'rewritten' WHERE id = ?1;",
        [entry.id],
    );
    assert!(result.is_err());

    let content: String = conn
        .query_row("SELECT content FROM entries WHERE id = ?1;", [entry.id], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(content, "original");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
