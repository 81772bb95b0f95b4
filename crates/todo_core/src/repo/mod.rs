//! Collection operations over a loaded document.
//!
//! # Responsibility
//! - Implement create/find/update/remove primitives per collection.
//! - Allocate ids for new records.
//!
//! # Invariants
//! - Collections borrow the document only for the duration of one request;
//!   they never load or flush.
//! - Lookups by id resolve to the first matching record.
//! - Semantic misses surface as `RepoError`, never as panics.

pub mod error;
pub mod id_allocator;
pub mod todo_repo;
pub mod user_repo;
