//! Storage trait definitions and error types.
//!
//! Handlers only see these traits; `SqliteStore` is the production backend and
//! tests can substitute their own implementation.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::model::{Folder, FolderPatch, NewFolder, NewNote, Note, NotePatch};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Row-level access to `noteful_folders`.
#[async_trait::async_trait]
pub trait FolderStore: Send + Sync {
    /// Every folder, ordered by id.
    async fn all_folders(&self) -> StoreResult<Vec<Folder>>;

    async fn folder_by_id(&self, id: i64) -> StoreResult<Option<Folder>>;

    /// Insert and return the row with its generated id.
    async fn insert_folder(&self, folder: NewFolder) -> StoreResult<Folder>;

    /// Apply the supplied fields. Returns the number of rows changed.
    async fn update_folder(&self, id: i64, patch: FolderPatch) -> StoreResult<u64>;

    /// Returns the number of rows removed.
    async fn delete_folder(&self, id: i64) -> StoreResult<u64>;
}

/// Row-level access to `noteful_notes`.
#[async_trait::async_trait]
pub trait NoteStore: Send + Sync {
    /// Every note, ordered by id.
    async fn all_notes(&self) -> StoreResult<Vec<Note>>;

    async fn note_by_id(&self, id: i64) -> StoreResult<Option<Note>>;

    /// Insert and return the row with its generated id.
    async fn insert_note(&self, note: NewNote) -> StoreResult<Note>;

    /// Apply the supplied fields. Returns the number of rows changed.
    async fn update_note(&self, id: i64, patch: NotePatch) -> StoreResult<u64>;

    /// Returns the number of rows removed.
    async fn delete_note(&self, id: i64) -> StoreResult<u64>;
}

/// Everything the HTTP layer needs from a backend.
pub trait Store: FolderStore + NoteStore {}

impl<T: FolderStore + NoteStore> Store for T {}
