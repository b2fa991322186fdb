//! Application Configuration
//!
//! Defaults under the platform data directory, overridden by an optional TOML
//! file and then by environment variables.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, DomainResult};
use crate::store::{GROCERY_STORAGE_KEY, PROFILE_STORAGE_KEY};

/// Path of an explicit config file
pub const CONFIG_ENV: &str = "GROCERY_LIST_CONFIG";
/// Overrides `data_dir`
pub const DATA_DIR_ENV: &str = "GROCERY_LIST_DATA_DIR";

const APP_DIR_NAME: &str = "grocery-list";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_file: String,
    /// Defaults to `<data_dir>/logs`
    pub log_dir: Option<PathBuf>,
    /// Filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
    pub app_name: String,
    pub grocery_storage_key: String,
    pub profile_storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            db_file: "grocery.db".to_string(),
            log_dir: None,
            log_filter: "info".to_string(),
            app_name: "GroceryList".to_string(),
            grocery_storage_key: GROCERY_STORAGE_KEY.to_string(),
            profile_storage_key: PROFILE_STORAGE_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from the environment
    pub fn load() -> DomainResult<Self> {
        let data_dir_override = env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        let config_path = match env::var_os(CONFIG_ENV) {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                let dir = data_dir_override.clone().unwrap_or_else(default_data_dir);
                Some(dir.join("config.toml")).filter(|p| p.exists())
            }
        };

        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        if let Some(dir) = data_dir_override {
            config.data_dir = dir;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> DomainResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            let msg = format!("failed to read config file {}: {}", path.display(), e);
            DomainError::InvalidInput(msg)
        })?;
        Self::from_toml(&raw)
            .map_err(|e| DomainError::InvalidInput(format!("{} ({})", e, path.display())))
    }

    pub fn from_toml(raw: &str) -> DomainResult<Self> {
        toml::from_str(raw)
            .map_err(|e| DomainError::InvalidInput(format!("failed to parse TOML: {}", e)))
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("logs"))
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|base| base.join(APP_DIR_NAME))
        .unwrap_or_else(|| env::temp_dir().join(APP_DIR_NAME))
}
