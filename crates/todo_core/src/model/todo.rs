//! Todo record.
//!
//! # Invariants
//! - `completed` is required when decoding; a record without it is rejected.
//! - `userId` is not checked against the users collection.

use crate::model::id::{coerce_id, Identified, RecordId};
use crate::model::user::UserId;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a `Todo`, unique within the todo collection.
pub type TodoId = RecordId;

/// Todo item owned (by reference only) by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    /// Persisted images written by older deployments may carry this as a
    /// numeric string; it is normalized to an integer on load.
    #[serde(deserialize_with = "deserialize_lenient_id")]
    pub user_id: UserId,
    pub task: String,
    pub completed: bool,
}

impl Todo {
    /// Creates an open (not completed) todo.
    pub fn new(id: TodoId, user_id: UserId, task: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            task: task.into(),
            completed: false,
        }
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

impl Identified for Todo {
    fn id(&self) -> RecordId {
        self.id
    }
}

fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Integer(RecordId),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Integer(value) => Ok(value),
        RawId::Text(text) => coerce_id(&text).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid numeric identifier `{text}`"))
        }),
    }
}
