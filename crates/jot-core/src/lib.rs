//! jot-core - Core library for jot
//!
//! This crate contains the note model, the `SQLite` persistence layer, and the
//! [`NoteStore`] that owns the single shared connection handle. Interfaces
//! (the `jot` CLI, a mobile shell) are thin callers of the store contract.

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod store;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use models::{NewNote, Note, NoteId};
pub use store::{NoteStore, StoreState};
