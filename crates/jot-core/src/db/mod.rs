//! Database layer for jot

mod connection;
pub mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{NoteRepository, SqliteNoteRepository};
