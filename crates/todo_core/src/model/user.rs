//! User record.

use crate::model::id::{Identified, RecordId};
use serde::{Deserialize, Serialize};

/// Identifier of a `User`, allocated independently from todo ids.
pub type UserId = RecordId;

/// Registered user. Created by signup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Returns whether both stored credential fields match exactly.
    pub fn matches_credentials(&self, username: &str, email: &str) -> bool {
        self.username == username && self.email == email
    }
}

impl Identified for User {
    fn id(&self) -> RecordId {
        self.id
    }
}
