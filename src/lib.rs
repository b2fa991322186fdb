//! Grocery List Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - pipeline: Filter, group and format functions over grocery items
//! - repository: Key-value persistence abstractions and implementations
//! - store: Persisted grocery and profile state
//! - commands: Handlers a UI calls

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod commands;
pub mod config;
pub mod domain;
pub mod pipeline;
pub mod repository;
pub mod seed;
pub mod store;

use config::AppConfig;
use domain::DomainResult;
use repository::{KeyValueStore, SqliteKvStore};
use store::{GroceryStore, ProfileStore};

/// Application state shared across commands
pub struct AppState {
    pub grocery: Mutex<GroceryStore>,
    pub profile: Mutex<ProfileStore>,
    pub db_path: Option<PathBuf>,
}

impl AppState {
    /// Open the SQLite database named by `config` and hydrate both stores
    pub async fn init(config: &AppConfig) -> DomainResult<Self> {
        let db_path = config.db_path();
        let kv: Arc<dyn KeyValueStore> = Arc::new(SqliteKvStore::open(&db_path)?);

        let grocery = GroceryStore::open_with_key(kv.clone(), &config.grocery_storage_key).await;
        let profile = ProfileStore::open_with_key(kv, &config.profile_storage_key).await;

        Ok(Self {
            grocery: Mutex::new(grocery),
            profile: Mutex::new(profile),
            db_path: Some(db_path),
        })
    }

    /// Both stores on an arbitrary backend under the default keys
    pub async fn with_store(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            grocery: Mutex::new(GroceryStore::open(kv.clone()).await),
            profile: Mutex::new(ProfileStore::open(kv).await),
            db_path: None,
        }
    }

    /// Wait for all queued writes
    pub async fn flush(&self) {
        self.grocery.lock().await.flush().await;
        self.profile.lock().await.flush().await;
    }
}
