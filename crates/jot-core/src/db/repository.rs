//! Note repository implementation

#![allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)] // COUNT(*) is never negative

use crate::error::{Error, Result};
use crate::models::{parse_timestamp, storable_timestamp, NewNote, Note, NoteId};
use rusqlite::types::Type;
use rusqlite::{params, Connection};

/// Trait for note storage operations
pub trait NoteRepository {
    /// Insert a note and return it with its assigned id
    fn create(&self, note: &NewNote) -> Result<Note>;

    /// Get a note by ID
    fn get(&self, id: NoteId) -> Result<Option<Note>>;

    /// List every note, newest first
    fn list_all(&self) -> Result<Vec<Note>>;

    /// Delete a note, returning the number of rows removed (0 or 1)
    fn delete(&self, id: NoteId) -> Result<usize>;

    /// Count stored notes
    fn count(&self) -> Result<usize>;
}

/// `SQLite` implementation of `NoteRepository`
pub struct SqliteNoteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteNoteRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a note from a database row
    fn parse_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
        let created_time: String = row.get(2)?;
        let created_time = parse_timestamp(&created_time).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error))
        })?;

        Ok(Note {
            id: NoteId::new(row.get(0)?),
            content: row.get(1)?,
            created_time,
        })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create(&self, note: &NewNote) -> Result<Note> {
        let created_time = storable_timestamp(&note.created_time).map_err(Error::write)?;

        self.conn
            .execute(
                "INSERT INTO notes (content, createdTime) VALUES (?, ?)",
                params![note.content, created_time],
            )
            .map_err(Error::write)?;

        let id = NoteId::new(self.conn.last_insert_rowid());
        Ok(note.clone().persisted(id))
    }

    fn get(&self, id: NoteId) -> Result<Option<Note>> {
        let result = self.conn.query_row(
            "SELECT id, content, createdTime FROM notes WHERE id = ?",
            params![id.as_i64()],
            Self::parse_note,
        );

        match result {
            Ok(note) => Ok(Some(note)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Error::read(e)),
        }
    }

    fn list_all(&self) -> Result<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, content, createdTime
                 FROM notes
                 ORDER BY createdTime DESC, id DESC",
            )
            .map_err(Error::read)?;

        let notes = stmt
            .query_map([], Self::parse_note)
            .map_err(Error::read)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::read)?;

        Ok(notes)
    }

    fn delete(&self, id: NoteId) -> Result<usize> {
        self.conn
            .execute("DELETE FROM notes WHERE id = ?", params![id.as_i64()])
            .map_err(Error::write)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))
            .map_err(Error::read)?;
        Ok(count as usize)
    }
}
