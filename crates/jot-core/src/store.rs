//! Note store owning the single shared database handle.
//!
//! A [`NoteStore`] is built once at application start and cloned into every
//! layer that needs it; clones share one connection. The handle moves through
//! `Uninitialized -> Opening -> Ready -> Closed`. Operations only run while
//! Ready; after `close` the caller must `initialize` again.
//!
//! `SQLite` calls run on the blocking pool. The async lock is held until the
//! call finishes, so operations stay in issue order and `close` never races
//! an in-flight statement.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::config::StoreConfig;
use crate::db::{Database, NoteRepository, SqliteNoteRepository};
use crate::error::{Error, Result};
use crate::models::{NewNote, Note, NoteId};

/// Lifecycle of the connection handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// No open attempt has succeeded yet
    Uninitialized,
    /// Resolving the path and opening the file
    Opening,
    /// Handle cached and usable
    Ready,
    /// Handle released by `close`
    Closed,
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

type SharedDatabase = Arc<StdMutex<Database>>;

struct Slot {
    state: StoreState,
    db: Option<SharedDatabase>,
}

/// Shared async facade over the notes table.
#[derive(Clone)]
pub struct NoteStore {
    slot: Arc<Mutex<Slot>>,
    location: Location,
}

impl NoteStore {
    /// Create an uninitialized store for the configured database file
    pub fn new(config: &StoreConfig) -> Self {
        Self::at_path(config.db_path())
    }

    /// Create an uninitialized store for an explicit database path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self::with_location(Location::File(path.into()))
    }

    /// Create an uninitialized in-memory store (primarily for tests).
    ///
    /// Data does not survive `close`.
    pub fn in_memory() -> Self {
        Self::with_location(Location::Memory)
    }

    fn with_location(location: Location) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                state: StoreState::Uninitialized,
                db: None,
            })),
            location,
        }
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    /// Current lifecycle state
    pub async fn state(&self) -> StoreState {
        self.slot.lock().await.state
    }

    /// Open the database if it is not already open.
    ///
    /// Idempotent: a Ready store keeps its cached handle and the table is
    /// left untouched. On failure the previous state is restored and the
    /// error is returned without retrying.
    pub async fn initialize(&self) -> Result<()> {
        let mut slot = self.slot.lock().await;
        if slot.db.is_some() {
            return Ok(());
        }

        let previous = slot.state;
        slot.state = StoreState::Opening;

        match self.open_database().await {
            Ok(db) => {
                slot.db = Some(Arc::new(StdMutex::new(db)));
                slot.state = StoreState::Ready;
                tracing::info!("Note store ready ({})", self.describe());
                Ok(())
            }
            Err(error) => {
                slot.state = previous;
                tracing::warn!("Failed to open note store ({}): {error}", self.describe());
                Err(error)
            }
        }
    }

    async fn open_database(&self) -> Result<Database> {
        match &self.location {
            Location::Memory => Database::open_in_memory(),
            Location::File(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent).map_err(Error::unavailable)?;
                    }
                    Database::open(&path)
                })
                .await
                .map_err(Error::unavailable)?
            }
        }
    }

    /// Persist a note with the given content and creation time
    pub async fn create(
        &self,
        content: impl Into<String>,
        created_time: DateTime<Utc>,
    ) -> Result<Note> {
        self.create_note(NewNote::with_created_time(content, created_time))
            .await
    }

    /// Persist an unsaved note, returning it with its assigned id
    pub async fn create_note(&self, note: NewNote) -> Result<Note> {
        self.with_repo("create", move |repo| repo.create(&note))
            .await
    }

    /// Snapshot of every note, newest first
    pub async fn list_all(&self) -> Result<Vec<Note>> {
        self.with_repo("list_all", |repo| repo.list_all()).await
    }

    /// Fetch a note by id
    pub async fn get(&self, id: NoteId) -> Result<Option<Note>> {
        self.with_repo("get", move |repo| repo.get(id)).await
    }

    /// Number of stored notes
    pub async fn count(&self) -> Result<usize> {
        self.with_repo("count", |repo| repo.count()).await
    }

    /// Delete a note by id, returning rows removed (0 when already gone)
    pub async fn delete(&self, id: NoteId) -> Result<usize> {
        self.with_repo("delete", move |repo| repo.delete(id)).await
    }

    /// Release the connection handle.
    ///
    /// No-op unless the store is Ready.
    pub async fn close(&self) -> Result<()> {
        let mut slot = self.slot.lock().await;
        let Some(db) = slot.db.take() else {
            return Ok(());
        };

        slot.state = StoreState::Closed;
        tracing::info!("Closing note store ({})", self.describe());

        // Every operation finishes before releasing the slot lock, so this is
        // the last reference unless a caller dropped its future mid-operation.
        match Arc::try_unwrap(db) {
            Ok(db) => db
                .into_inner()
                .map_err(|_| Error::unavailable("database lock poisoned"))?
                .close(),
            Err(_) => {
                tracing::warn!("Database still in use; connection closes when released");
                Ok(())
            }
        }
    }

    async fn with_repo<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteNoteRepository<'_>) -> Result<T> + Send + 'static,
    {
        let slot = self.slot.lock().await;
        let Some(db) = slot.db.clone() else {
            return Err(Error::StorageUnavailable(format!(
                "note store is {:?}; call initialize first",
                slot.state
            )));
        };

        let result = tokio::task::spawn_blocking(move || {
            let db = db
                .lock()
                .map_err(|_| Error::unavailable("database lock poisoned"))?;
            f(&SqliteNoteRepository::new(db.connection()))
        })
        .await
        .map_err(Error::unavailable)
        .and_then(|result| result);
        drop(slot);

        match &result {
            Ok(_) => tracing::debug!(operation, "note store operation completed"),
            Err(error) => tracing::warn!(operation, %error, "note store operation failed"),
        }
        result
    }

    fn describe(&self) -> String {
        match &self.location {
            Location::File(path) => path.display().to_string(),
            Location::Memory => ":memory:".to_string(),
        }
    }
}
