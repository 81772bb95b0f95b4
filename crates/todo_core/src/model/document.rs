//! Root document aggregate: the unit of load and flush.
//!
//! # Invariants
//! - Collections keep insertion order; updates happen in place.
//! - Unknown top-level keys in a persisted image are ignored on load and
//!   dropped on the next flush.

use crate::model::id::{Identified, RecordId};
use crate::model::todo::Todo;
use crate::model::user::User;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// In-memory mirror of the whole persisted image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub users: Vec<User>,
    pub todos: Vec<Todo>,
}

impl Document {
    /// Returns the first user id that appears more than once, if any.
    pub fn duplicate_user_id(&self) -> Option<RecordId> {
        first_duplicate_id(&self.users)
    }

    /// Returns the first todo id that appears more than once, if any.
    pub fn duplicate_todo_id(&self) -> Option<RecordId> {
        first_duplicate_id(&self.todos)
    }
}

fn first_duplicate_id<T: Identified>(records: &[T]) -> Option<RecordId> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(Identified::id)
        .find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::model::todo::Todo;
    use serde_json::json;

    #[test]
    fn default_document_serializes_to_empty_collections() {
        let value = serde_json::to_value(Document::default()).unwrap();
        assert_eq!(value, json!({"users": [], "todos": []}));
    }

    #[test]
    fn unknown_top_level_keys_are_ignored() {
        let document: Document =
            serde_json::from_value(json!({"posts": [], "todos": [], "users": []})).unwrap();
        assert_eq!(document, Document::default());
    }

    #[test]
    fn duplicate_todo_id_reports_first_repeat() {
        let document = Document {
            users: Vec::new(),
            todos: vec![Todo::new(1, 1, "a"), Todo::new(2, 1, "b"), Todo::new(2, 1, "c")],
        };
        assert_eq!(document.duplicate_todo_id(), Some(2));
        assert_eq!(document.duplicate_user_id(), None);
    }
}
