//! Semantic failures raised by collection operations.

use crate::model::todo::TodoId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    TodoNotFound(TodoId),
    /// No user matches the supplied credentials. The credentials are not
    /// carried so they never reach logs or error messages.
    UserNotFound,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TodoNotFound(id) => write!(f, "todo not found: {id}"),
            Self::UserNotFound => write!(f, "user not found"),
        }
    }
}

impl Error for RepoError {}
