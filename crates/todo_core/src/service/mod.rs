//! Use-case services.
//!
//! # Responsibility
//! - Run one load → operate → flush cycle per request.
//! - Translate store and collection failures into request-level errors.

pub mod todo_service;
