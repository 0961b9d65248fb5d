//! SQLite backend via `sqlx`.

use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::{FolderStore, NoteStore, StoreResult};
use crate::model::{Folder, FolderPatch, NewFolder, NewNote, Note, NotePatch};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Store backed by a SQLite connection pool
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `url` and apply migrations.
    ///
    /// In-memory databases are private to a connection, so they get a single
    /// connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = if is_memory_url(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .connect_with(options)
                .await?
        };

        tracing::info!("Connected to {}", url);
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, applying pending migrations.
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        MIGRATOR.run(&pool).await?;
        Ok(Self { pool })
    }

    /// Raw pool access, used for seeding fixtures.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[async_trait::async_trait]
impl FolderStore for SqliteStore {
    async fn all_folders(&self) -> StoreResult<Vec<Folder>> {
        let folders = sqlx::query_as::<_, Folder>(
            "SELECT id, folder_name FROM noteful_folders ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(folders)
    }

    async fn folder_by_id(&self, id: i64) -> StoreResult<Option<Folder>> {
        let folder = sqlx::query_as::<_, Folder>(
            "SELECT id, folder_name FROM noteful_folders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(folder)
    }

    async fn insert_folder(&self, folder: NewFolder) -> StoreResult<Folder> {
        let folder = sqlx::query_as::<_, Folder>(
            "INSERT INTO noteful_folders (folder_name) VALUES (?) RETURNING id, folder_name",
        )
        .bind(folder.folder_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(folder)
    }

    async fn update_folder(&self, id: i64, patch: FolderPatch) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE noteful_folders SET folder_name = COALESCE(?, folder_name) WHERE id = ?",
        )
        .bind(patch.folder_name)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_folder(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM noteful_folders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait::async_trait]
impl NoteStore for SqliteStore {
    async fn all_notes(&self) -> StoreResult<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, note_name, content, folder_id, modified FROM noteful_notes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    async fn note_by_id(&self, id: i64) -> StoreResult<Option<Note>> {
        let note = sqlx::query_as::<_, Note>(
            "SELECT id, note_name, content, folder_id, modified FROM noteful_notes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    async fn insert_note(&self, note: NewNote) -> StoreResult<Note> {
        let note = sqlx::query_as::<_, Note>(
            "INSERT INTO noteful_notes (note_name, content, folder_id, modified) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, note_name, content, folder_id, modified",
        )
        .bind(note.note_name)
        .bind(note.content)
        .bind(note.folder_id)
        .bind(note.modified)
        .fetch_one(&self.pool)
        .await?;
        Ok(note)
    }

    async fn update_note(&self, id: i64, patch: NotePatch) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE noteful_notes SET \
                note_name = COALESCE(?, note_name), \
                content = COALESCE(?, content), \
                folder_id = COALESCE(?, folder_id), \
                modified = COALESCE(?, modified) \
             WHERE id = ?",
        )
        .bind(patch.note_name)
        .bind(patch.content)
        .bind(patch.folder_id)
        .bind(patch.modified)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_note(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM noteful_notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
