//! Operation dispatcher: named operation + arguments in, result or typed
//! failure out.
//!
//! # Responsibility
//! - Parse transport-supplied names and JSON arguments into `Operation`.
//! - Route each operation to exactly one service call.
//! - Wrap outcomes in a transport-neutral `OperationResponse`.
//!
//! # Invariants
//! - Argument errors are reported before the store is touched.
//! - Every request yields either a full payload or one error message.

mod operation;
mod response;

pub use operation::{Arguments, Operation};
pub use response::{dispatch, execute, OperationOutput, OperationResponse, ResponseError};
