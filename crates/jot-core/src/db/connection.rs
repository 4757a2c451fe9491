//! Database connection management

use crate::error::{Error, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

use super::migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Owned `SQLite` connection with pragmas applied and schema migrated
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database at the given path, creating it if it doesn't exist
    ///
    /// Runs migrations. Any failure to open, configure or migrate the file is
    /// reported as [`Error::StorageUnavailable`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();

        let conn = Connection::open(path).map_err(Error::unavailable)?;
        let database = Self::bootstrap(conn, true).map_err(|error| {
            tracing::warn!(
                "Failed to bootstrap database at {}: {error}",
                path.display()
            );
            into_unavailable(error)
        })?;

        tracing::info!(
            "Opened database at {} in {}ms",
            path.display(),
            started_at.elapsed().as_millis()
        );
        Ok(database)
    }

    /// Open an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::unavailable)?;
        Self::bootstrap(conn, false).map_err(into_unavailable)
    }

    fn bootstrap(conn: Connection, file_backed: bool) -> Result<Self> {
        let mut database = Self { conn };
        database.configure(file_backed)?;
        migrations::run(&mut database.conn)?;
        Ok(database)
    }

    /// Configure `SQLite` pragmas
    fn configure(&self, file_backed: bool) -> Result<()> {
        if file_backed {
            // journal_mode reports the resulting mode as a row
            match self
                .conn
                .query_row("PRAGMA journal_mode = WAL", [], |row| row.get::<_, String>(0))
            {
                Ok(mode) => tracing::debug!("Journal mode set to {mode}"),
                Err(error) => tracing::debug!("Could not enable WAL journal mode: {error}"),
            }
        }
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(())
    }

    /// Get a reference to the underlying connection
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Release the connection handle
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, error)| Error::unavailable(error))
    }
}

fn into_unavailable(error: Error) -> Error {
    match error {
        Error::StorageUnavailable(_) => error,
        other => Error::unavailable(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(migrations::table_exists(db.connection(), "notes").unwrap());
    }

    #[test]
    fn test_open_creates_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("jot.db");

        let db = Database::open(&path).unwrap();
        assert!(path.exists());
        db.close().unwrap();
    }

    #[test]
    fn test_file_database_uses_wal() {
        let tmp = tempdir().unwrap();
        let db = Database::open(tmp.path().join("jot.db")).unwrap();

        let mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode, "wal");
    }

    #[test]
    fn test_open_missing_directory_is_unavailable() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("missing").join("jot.db");

        let err = Database::open(&path).err().unwrap();
        assert!(matches!(err, Error::StorageUnavailable(_)));
    }

    #[test]
    fn test_open_corrupt_file_is_unavailable() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("jot.db");
        std::fs::write(&path, vec![0x42_u8; 4096]).unwrap();

        let err = Database::open(&path).err().unwrap();
        assert!(matches!(err, Error::StorageUnavailable(_)));
    }
}
