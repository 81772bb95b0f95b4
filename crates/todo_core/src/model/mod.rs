//! Domain model for the users/todos document.
//!
//! # Responsibility
//! - Define the records persisted in the document image.
//! - Own identifier coercion shared by storage decoding and operation parsing.
//!
//! # Invariants
//! - Field names match the persisted JSON layout (`userId`, not `user_id`).
//! - `Todo::completed` is always present after creation.

pub mod document;
pub mod id;
pub mod todo;
pub mod user;
