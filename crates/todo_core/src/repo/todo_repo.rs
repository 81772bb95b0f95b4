//! Todo collection operations.
//!
//! # Invariants
//! - Updates happen in place; record order never changes except for the
//!   removed element on delete.
//! - `complete` toggles the flag rather than setting it.
//! - `update_task` only touches `task`.

use crate::model::document::Document;
use crate::model::todo::{Todo, TodoId};
use crate::model::user::UserId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::id_allocator::IdPolicy;

/// Borrowed view over `Document::todos` for one request.
pub struct TodoCollection<'doc> {
    todos: &'doc mut Vec<Todo>,
    id_policy: IdPolicy,
}

impl<'doc> TodoCollection<'doc> {
    pub fn new(document: &'doc mut Document, id_policy: IdPolicy) -> Self {
        Self {
            todos: &mut document.todos,
            id_policy,
        }
    }

    /// Full todo sequence in insertion order, unfiltered.
    pub fn list(&self) -> &[Todo] {
        self.todos.as_slice()
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Appends an open todo. `user_id` is not checked against users.
    pub fn add(&mut self, user_id: UserId, task: &str) -> Todo {
        let id = self.id_policy.next_id(self.todos.as_slice());
        let todo = Todo::new(id, user_id, task);
        self.todos.push(todo.clone());
        todo
    }

    /// Removes the first todo with `id` and returns it.
    pub fn delete(&mut self, id: TodoId) -> RepoResult<Todo> {
        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(RepoError::TodoNotFound(id))?;
        Ok(self.todos.remove(index))
    }

    /// Toggles `completed` on the first todo with `id`.
    pub fn complete(&mut self, id: TodoId) -> RepoResult<Todo> {
        let todo = self.find_mut(id)?;
        todo.toggle_completed();
        Ok(todo.clone())
    }

    /// Replaces `task` on the first todo with `id`.
    pub fn update_task(&mut self, id: TodoId, task: &str) -> RepoResult<Todo> {
        let todo = self.find_mut(id)?;
        todo.task = task.to_string();
        Ok(todo.clone())
    }

    fn find_mut(&mut self, id: TodoId) -> RepoResult<&mut Todo> {
        self.todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(RepoError::TodoNotFound(id))
    }
}
