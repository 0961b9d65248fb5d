//! Shared fixtures and harness for the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use noteful::model::{FolderPatch, NewFolder, NewNote, NotePatch};
use noteful::store::StoreResult;
use noteful::{
    build_router, AppState, Config, Environment, Folder, FolderStore, Note, NoteStore,
    SqliteStore,
};

// ============================================================================
// Fixtures
// ============================================================================

pub fn make_folders() -> Vec<Folder> {
    ["First test folder", "Second test folder", "Third test folder"]
        .iter()
        .enumerate()
        .map(|(i, name)| Folder {
            id: i as i64 + 1,
            folder_name: name.to_string(),
        })
        .collect()
}

fn timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

pub fn make_notes() -> Vec<Note> {
    vec![
        Note {
            id: 5,
            note_name: "First test note name".to_string(),
            content: "First content".to_string(),
            modified: timestamp("2020-03-12T01:10:22.505Z"),
            folder_id: 1,
        },
        Note {
            id: 6,
            note_name: "Second test note name".to_string(),
            content: "Second content".to_string(),
            modified: timestamp("2020-04-12T01:15:22.505Z"),
            folder_id: 2,
        },
        Note {
            id: 7,
            note_name: "Third test note name".to_string(),
            content: "Third content".to_string(),
            modified: timestamp("2020-04-12T01:15:22.505Z"),
            folder_id: 3,
        },
    ]
}

pub fn make_malicious_note() -> Note {
    Note {
        id: 911,
        note_name: "Naughty".to_string(),
        content: r#"Bad <script>alert("xss");</script> content"#.to_string(),
        modified: timestamp("2020-04-12T01:15:22.505Z"),
        folder_id: 1,
    }
}

// ============================================================================
// HTTP harness over a real SQLite file
// ============================================================================

pub struct TestApp {
    _dir: TempDir,
    pub store: SqliteStore,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_env(Environment::Test).await
    }

    pub async fn with_env(env: Environment) -> Self {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("noteful.db").display());
        let store = SqliteStore::connect(&url, 1).await.unwrap();

        let state = Arc::new(AppState::new(
            Arc::new(store.clone()),
            Config::default(),
            env,
        ));

        Self {
            _dir: dir,
            store,
            router: build_router(state),
        }
    }

    pub async fn with_fixtures() -> Self {
        let app = Self::new().await;
        app.seed_folders(&make_folders()).await;
        app.seed_notes(&make_notes()).await;
        app
    }

    pub async fn seed_folders(&self, folders: &[Folder]) {
        for folder in folders {
            sqlx::query("INSERT INTO noteful_folders (id, folder_name) VALUES (?, ?)")
                .bind(folder.id)
                .bind(&folder.folder_name)
                .execute(self.store.pool())
                .await
                .unwrap();
        }
    }

    pub async fn seed_notes(&self, notes: &[Note]) {
        for note in notes {
            sqlx::query(
                "INSERT INTO noteful_notes (id, note_name, content, folder_id, modified) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(note.id)
            .bind(&note.note_name)
            .bind(&note.content)
            .bind(note.folder_id)
            .bind(note.modified)
            .execute(self.store.pool())
            .await
            .unwrap();
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body.to_string())).await
    }

    /// Send `body` verbatim as `application/json`.
    pub async fn send(&self, method: Method, uri: &str, body: Option<String>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub fn error_body(message: &str) -> Value {
    serde_json::json!({ "error": { "message": message } })
}

// ============================================================================
// In-memory store double
// ============================================================================

#[derive(Default)]
struct Tables {
    folders: BTreeMap<i64, Folder>,
    notes: BTreeMap<i64, Note>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Store double keeping rows in maps. Does not enforce foreign keys.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[async_trait::async_trait]
impl FolderStore for MemoryStore {
    async fn all_folders(&self) -> StoreResult<Vec<Folder>> {
        Ok(self.tables.lock().unwrap().folders.values().cloned().collect())
    }

    async fn folder_by_id(&self, id: i64) -> StoreResult<Option<Folder>> {
        Ok(self.tables.lock().unwrap().folders.get(&id).cloned())
    }

    async fn insert_folder(&self, folder: NewFolder) -> StoreResult<Folder> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let folder = Folder {
            id,
            folder_name: folder.folder_name,
        };
        tables.folders.insert(id, folder.clone());
        Ok(folder)
    }

    async fn update_folder(&self, id: i64, patch: FolderPatch) -> StoreResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        match tables.folders.get_mut(&id) {
            Some(folder) => {
                if let Some(name) = patch.folder_name {
                    folder.folder_name = name;
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_folder(&self, id: i64) -> StoreResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.folders.remove(&id).map_or(0, |_| 1))
    }
}

#[async_trait::async_trait]
impl NoteStore for MemoryStore {
    async fn all_notes(&self) -> StoreResult<Vec<Note>> {
        Ok(self.tables.lock().unwrap().notes.values().cloned().collect())
    }

    async fn note_by_id(&self, id: i64) -> StoreResult<Option<Note>> {
        Ok(self.tables.lock().unwrap().notes.get(&id).cloned())
    }

    async fn insert_note(&self, note: NewNote) -> StoreResult<Note> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let note = Note {
            id,
            note_name: note.note_name,
            content: note.content,
            folder_id: note.folder_id,
            modified: note.modified,
        };
        tables.notes.insert(id, note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: i64, patch: NotePatch) -> StoreResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        match tables.notes.get_mut(&id) {
            Some(note) => {
                if let Some(name) = patch.note_name {
                    note.note_name = name;
                }
                if let Some(content) = patch.content {
                    note.content = content;
                }
                if let Some(folder_id) = patch.folder_id {
                    note.folder_id = folder_id;
                }
                if let Some(modified) = patch.modified {
                    note.modified = modified;
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_note(&self, id: i64) -> StoreResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.notes.remove(&id).map_or(0, |_| 1))
    }
}
