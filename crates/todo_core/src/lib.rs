//! Core of the todo API service.
//!
//! A whole-file JSON document holds two collections, users and todos. Each
//! request loads the document, applies one operation, and flushes the whole
//! document back when the operation changed it.

pub mod config;
pub mod dispatch;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use dispatch::{
    dispatch, execute, Arguments, Operation, OperationOutput, OperationResponse, ResponseError,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::Document;
pub use model::id::{coerce_id, RecordId};
pub use model::todo::{Todo, TodoId};
pub use model::user::{User, UserId};
pub use repo::error::{RepoError, RepoResult};
pub use repo::id_allocator::IdPolicy;
pub use repo::todo_repo::TodoCollection;
pub use repo::user_repo::UserCollection;
pub use service::todo_service::{ErrorKind, ServiceError, ServiceResult, TodoService};
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StoreError, StoreResult};

/// Liveness probe for transports.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
