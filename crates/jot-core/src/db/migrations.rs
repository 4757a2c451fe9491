//! Database migrations
//!
//! Schema setup is an explicit step run once per open. Each version is
//! guarded by checking `sqlite_master` rather than relying on whether the
//! file existed before the connection was opened.

use crate::error::{Error, Result};
use rusqlite::{params, Connection};

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;

/// Run all pending migrations
pub fn run(conn: &mut Connection) -> Result<()> {
    let version = get_version(conn)?;

    if version > CURRENT_VERSION {
        return Err(Error::StorageUnavailable(format!(
            "database schema version {version} is newer than supported {CURRENT_VERSION}"
        )));
    }

    if version < 1 {
        migrate_v1(conn)?;
    }

    Ok(())
}

/// Check whether a table with the given name exists
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
        params![name],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Get the current schema version
pub fn get_version(conn: &Connection) -> Result<i32> {
    if !table_exists(conn, "schema_version")? {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    Ok(version)
}

/// Migration to version 1: notes table
fn migrate_v1(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );
        CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            createdTime TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_notes_created ON notes(createdTime DESC);
        INSERT INTO schema_version (version) VALUES (1);",
    )?;

    tx.commit()?;

    tracing::info!("Migrated database to version 1");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_migrations() {
        let mut conn = setup();
        run(&mut conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
        assert!(table_exists(&conn, "notes").unwrap());
    }

    #[test]
    fn test_migrations_idempotent() {
        let mut conn = setup();
        run(&mut conn).unwrap();
        run(&mut conn).unwrap(); // Should not fail

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_fresh_database_has_no_version() {
        let conn = setup();
        assert_eq!(get_version(&conn).unwrap(), 0);
        assert!(!table_exists(&conn, "notes").unwrap());
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let mut conn = setup();
        run(&mut conn).unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (99)", [])
            .unwrap();

        let err = run(&mut conn).unwrap_err();
        match err {
            Error::StorageUnavailable(msg) => assert!(msg.contains("99")),
            other => panic!("expected storage unavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_notes_columns() {
        let mut conn = setup();
        run(&mut conn).unwrap();

        let mut stmt = conn.prepare("PRAGMA table_info(notes)").unwrap();
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .collect::<rusqlite::Result<Vec<_>>>()
            .unwrap();

        assert_eq!(columns, vec!["id", "content", "createdTime"]);
    }
}
