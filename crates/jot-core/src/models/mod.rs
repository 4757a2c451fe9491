//! Data models for jot

mod note;

pub use note::{format_timestamp, parse_timestamp, storable_timestamp, NewNote, Note, NoteId};
