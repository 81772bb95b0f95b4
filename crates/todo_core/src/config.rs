//! Runtime configuration resolved from environment variables.
//!
//! # Invariants
//! - Values are trimmed; empty values count as unset.
//! - Invalid values are reported, never silently replaced by defaults.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use crate::repo::id_allocator::IdPolicy;
use crate::service::todo_service::TodoService;
use crate::store::JsonFileStore;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TODO_DB_PATH";
pub const ID_POLICY_ENV: &str = "TODO_ID_POLICY";
pub const LOG_LEVEL_ENV: &str = "TODO_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TODO_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "db.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.key, self.message)
    }
}

impl Error for ConfigError {}

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Location of the JSON document image.
    pub db_path: PathBuf,
    pub id_policy: IdPolicy,
    pub log_level: &'static str,
    /// File logging is enabled only when a directory is configured.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            id_policy: IdPolicy::default(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value_of = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = value_of(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(policy) = value_of(ID_POLICY_ENV) {
            config.id_policy = policy.parse().map_err(|message| ConfigError {
                key: ID_POLICY_ENV,
                message,
            })?;
        }
        if let Some(level) = value_of(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&level).map_err(|message| ConfigError {
                key: LOG_LEVEL_ENV,
                message,
            })?;
        }
        if let Some(dir) = value_of(LOG_DIR_ENV) {
            config.log_dir = Some(normalize_log_dir(&dir).map_err(|message| ConfigError {
                key: LOG_DIR_ENV,
                message,
            })?);
        }

        Ok(config)
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.db_path)
    }

    /// Builds a service over the configured file store and id policy.
    pub fn service(&self) -> TodoService<JsonFileStore> {
        TodoService::with_id_policy(self.store(), self.id_policy)
    }
}
