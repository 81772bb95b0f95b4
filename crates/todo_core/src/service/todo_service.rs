//! Todo/user use-case service.
//!
//! # Responsibility
//! - Expose one method per query/mutation.
//! - Own the request lifecycle: `load` once, apply collection operations,
//!   `flush` once on success.
//!
//! # Invariants
//! - Read-only requests (`list_todos`, `login`) never flush.
//! - A failed collection operation never flushes.
//! - A mutation is reported as applied only after its flush succeeded.
//! - No lock spans load and flush; concurrent requests can lose updates.

use crate::model::document::Document;
use crate::model::todo::{Todo, TodoId};
use crate::model::user::{User, UserId};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::id_allocator::IdPolicy;
use crate::repo::todo_repo::TodoCollection;
use crate::repo::user_repo::{find_by_credentials, UserCollection};
use crate::store::{DocumentStore, StoreError};
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure category reported to transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    StorageUnavailable,
    InvalidArgument,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::StorageUnavailable => "storage_unavailable",
            Self::InvalidArgument => "invalid_argument",
        }
    }
}

/// Request-level failure.
#[derive(Debug)]
pub enum ServiceError {
    /// Referenced record does not exist.
    NotFound(RepoError),
    /// Load or flush failed; nothing was applied.
    StorageUnavailable(StoreError),
    /// Malformed operation name or arguments.
    InvalidArgument(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(err) => write!(f, "{err}"),
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(err) => Some(err),
            Self::StorageUnavailable(err) => Some(err),
            Self::InvalidArgument(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::NotFound(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::StorageUnavailable(value)
    }
}

/// Request lifecycle phase, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Load,
    Apply,
    Flush,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Apply => "apply",
            Self::Flush => "flush",
        }
    }
}

/// Service facade over a document store.
///
/// The store is an explicit handle; no document state is kept between
/// calls.
pub struct TodoService<S: DocumentStore> {
    store: S,
    id_policy: IdPolicy,
}

impl<S: DocumentStore> TodoService<S> {
    /// Creates a service using length-based id allocation.
    pub fn new(store: S) -> Self {
        Self::with_id_policy(store, IdPolicy::default())
    }

    pub fn with_id_policy(store: S, id_policy: IdPolicy) -> Self {
        Self { store, id_policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    /// Returns every todo in insertion order.
    pub fn list_todos(&self) -> ServiceResult<Vec<Todo>> {
        self.read("listTodos", |document| Ok(document.todos.clone()))
    }

    /// Registers a user. Always succeeds once storage is reachable.
    pub fn signup(&self, username: &str, email: &str) -> ServiceResult<User> {
        let id_policy = self.id_policy;
        self.mutate("signup", |document| {
            Ok(UserCollection::new(document, id_policy).signup(username, email))
        })
    }

    /// Finds the user whose username and email both match.
    pub fn login(&self, username: &str, email: &str) -> ServiceResult<User> {
        self.read("login", |document| {
            find_by_credentials(&document.users, username, email)
        })
    }

    /// Appends an open todo for `user_id`.
    pub fn add_todo(&self, user_id: UserId, task: &str) -> ServiceResult<Todo> {
        let id_policy = self.id_policy;
        self.mutate("addTodo", |document| {
            Ok(TodoCollection::new(document, id_policy).add(user_id, task))
        })
    }

    /// Removes a todo and returns the removed record.
    pub fn delete_todo(&self, id: TodoId) -> ServiceResult<Todo> {
        let id_policy = self.id_policy;
        self.mutate("deleteTodo", |document| {
            TodoCollection::new(document, id_policy).delete(id)
        })
    }

    /// Toggles `completed` on a todo.
    pub fn complete_todo(&self, id: TodoId) -> ServiceResult<Todo> {
        let id_policy = self.id_policy;
        self.mutate("completeTodo", |document| {
            TodoCollection::new(document, id_policy).complete(id)
        })
    }

    /// Replaces the task text of a todo.
    pub fn update_todo_task(&self, id: TodoId, task: &str) -> ServiceResult<Todo> {
        let id_policy = self.id_policy;
        self.mutate("updateTodoTask", |document| {
            TodoCollection::new(document, id_policy).update_task(id, task)
        })
    }

    fn read<T>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&Document) -> RepoResult<T>,
    ) -> ServiceResult<T> {
        let started_at = Instant::now();
        info!("event=op_dispatch module=service status=start op={operation} mode=read");

        let document = self
            .store
            .load()
            .map_err(|err| log_failure(operation, Phase::Load, started_at, err.into()))?;
        let value = apply(&document)
            .map_err(|err| log_failure(operation, Phase::Apply, started_at, err.into()))?;

        log_success(operation, started_at, false);
        Ok(value)
    }

    fn mutate<T>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut Document) -> RepoResult<T>,
    ) -> ServiceResult<T> {
        let started_at = Instant::now();
        info!("event=op_dispatch module=service status=start op={operation} mode=write");

        let mut document = self
            .store
            .load()
            .map_err(|err| log_failure(operation, Phase::Load, started_at, err.into()))?;
        let value = apply(&mut document)
            .map_err(|err| log_failure(operation, Phase::Apply, started_at, err.into()))?;
        self.store
            .flush(&document)
            .map_err(|err| log_failure(operation, Phase::Flush, started_at, err.into()))?;

        log_success(operation, started_at, true);
        Ok(value)
    }
}

fn log_success(operation: &str, started_at: Instant, flushed: bool) {
    info!(
        "event=op_dispatch module=service status=ok op={} flushed={} duration_ms={}",
        operation,
        flushed,
        started_at.elapsed().as_millis()
    );
}

fn log_failure(
    operation: &str,
    phase: Phase,
    started_at: Instant,
    err: ServiceError,
) -> ServiceError {
    error!(
        "event=op_dispatch module=service status=error op={} phase={} error_code={} duration_ms={} error={}",
        operation,
        phase.as_str(),
        err.kind().as_str(),
        started_at.elapsed().as_millis(),
        err
    );
    err
}
