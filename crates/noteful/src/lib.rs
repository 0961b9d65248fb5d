//! noteful: a REST API for folders and the notes filed in them.
//!
//! The binary in `main.rs` wires configuration, logging and the SQLite store
//! together; everything it uses lives here so integration tests can drive
//! the router directly.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod model;
pub mod routes;
pub mod sanitize;
pub mod service;
pub mod store;

use std::sync::Arc;

pub use app::build_router;
pub use config::{Config, Environment};
pub use error::{ApiError, ApiResult};
pub use model::{Folder, Note};
pub use store::{FolderStore, NoteStore, SqliteStore, Store, StoreError};

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
    pub env: Environment,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config, env: Environment) -> Self {
        Self { store, config, env }
    }
}
