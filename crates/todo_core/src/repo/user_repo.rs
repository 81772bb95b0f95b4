//! User collection operations: signup and credential lookup.

use crate::model::document::Document;
use crate::model::user::User;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::id_allocator::IdPolicy;

/// Borrowed view over `Document::users` for one request.
pub struct UserCollection<'doc> {
    users: &'doc mut Vec<User>,
    id_policy: IdPolicy,
}

impl<'doc> UserCollection<'doc> {
    pub fn new(document: &'doc mut Document, id_policy: IdPolicy) -> Self {
        Self {
            users: &mut document.users,
            id_policy,
        }
    }

    /// Appends a new user. Duplicate username/email pairs are allowed.
    pub fn signup(&mut self, username: &str, email: &str) -> User {
        let id = self.id_policy.next_id(self.users.as_slice());
        let user = User::new(id, username, email);
        self.users.push(user.clone());
        user
    }

    /// Returns the first user whose username and email both match exactly.
    pub fn login(&self, username: &str, email: &str) -> RepoResult<User> {
        find_by_credentials(self.users.as_slice(), username, email)
    }
}

/// Read-only credential lookup used by paths that never mutate the document.
pub fn find_by_credentials(users: &[User], username: &str, email: &str) -> RepoResult<User> {
    users
        .iter()
        .find(|user| user.matches_credentials(username, email))
        .cloned()
        .ok_or(RepoError::UserNotFound)
}
