//! Dispatch entry points and the response envelope.

use super::operation::{Arguments, Operation};
use crate::model::todo::Todo;
use crate::model::user::User;
use crate::service::todo_service::{ErrorKind, ServiceError, ServiceResult, TodoService};
use crate::store::DocumentStore;
use serde::Serialize;

/// Success payload of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    Todos(Vec<Todo>),
    Todo(Todo),
    User(User),
}

/// Error part of the response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Transport-neutral response: a full payload or one error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<OperationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

impl OperationResponse {
    fn success(data: OperationOutput) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    fn failure(err: &ServiceError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(ResponseError {
                kind: err.kind(),
                message: err.to_string(),
            }),
        }
    }
}

impl From<ServiceResult<OperationOutput>> for OperationResponse {
    fn from(value: ServiceResult<OperationOutput>) -> Self {
        match value {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(&err),
        }
    }
}

/// Runs one typed operation through the service's load/apply/flush cycle.
pub fn dispatch<S: DocumentStore>(
    service: &TodoService<S>,
    operation: &Operation,
) -> ServiceResult<OperationOutput> {
    match operation {
        Operation::ListTodos => service.list_todos().map(OperationOutput::Todos),
        Operation::Signup { username, email } => {
            service.signup(username, email).map(OperationOutput::User)
        }
        Operation::Login { username, email } => {
            service.login(username, email).map(OperationOutput::User)
        }
        Operation::AddTodo { user_id, task } => {
            service.add_todo(*user_id, task).map(OperationOutput::Todo)
        }
        Operation::DeleteTodo { id } => service.delete_todo(*id).map(OperationOutput::Todo),
        Operation::CompleteTodo { id } => service.complete_todo(*id).map(OperationOutput::Todo),
        Operation::UpdateTodoTask { id, task } => service
            .update_todo_task(*id, task)
            .map(OperationOutput::Todo),
    }
}

/// Parses and dispatches a named operation, returning the envelope.
pub fn execute<S: DocumentStore>(
    service: &TodoService<S>,
    name: &str,
    arguments: &Arguments,
) -> OperationResponse {
    Operation::parse(name, arguments)
        .and_then(|operation| dispatch(service, &operation))
        .into()
}
