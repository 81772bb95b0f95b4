//! Typed operations and argument parsing.

use crate::model::id::{coerce_id_value, RecordId};
use crate::model::todo::TodoId;
use crate::model::user::UserId;
use crate::service::todo_service::ServiceError;
use serde_json::{Map, Value};

/// Arguments keyed by declared parameter name.
pub type Arguments = Map<String, Value>;

/// One query or mutation with validated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListTodos,
    Signup { username: String, email: String },
    Login { username: String, email: String },
    AddTodo { user_id: UserId, task: String },
    DeleteTodo { id: TodoId },
    CompleteTodo { id: TodoId },
    UpdateTodoTask { id: TodoId, task: String },
}

impl Operation {
    /// Parses an operation name and its arguments.
    ///
    /// `todos` is accepted as an alias of `listTodos`. Extra arguments are
    /// ignored.
    ///
    /// # Errors
    /// - `InvalidArgument` for unknown names, missing arguments, non-string
    ///   text arguments, or ids that do not coerce to an integer.
    pub fn parse(name: &str, arguments: &Arguments) -> Result<Self, ServiceError> {
        match name.trim() {
            "listTodos" | "todos" => Ok(Self::ListTodos),
            "signup" => Ok(Self::Signup {
                username: string_arg(arguments, "username")?,
                email: string_arg(arguments, "email")?,
            }),
            "login" => Ok(Self::Login {
                username: string_arg(arguments, "username")?,
                email: string_arg(arguments, "email")?,
            }),
            "addTodo" => Ok(Self::AddTodo {
                user_id: id_arg(arguments, "userId")?,
                task: string_arg(arguments, "task")?,
            }),
            "deleteTodo" => Ok(Self::DeleteTodo {
                id: id_arg(arguments, "id")?,
            }),
            "completeTodo" => Ok(Self::CompleteTodo {
                id: id_arg(arguments, "id")?,
            }),
            "updateTodoTask" => Ok(Self::UpdateTodoTask {
                id: id_arg(arguments, "id")?,
                task: string_arg(arguments, "task")?,
            }),
            other => Err(ServiceError::InvalidArgument(format!(
                "unknown operation `{other}`"
            ))),
        }
    }

    /// Canonical operation name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListTodos => "listTodos",
            Self::Signup { .. } => "signup",
            Self::Login { .. } => "login",
            Self::AddTodo { .. } => "addTodo",
            Self::DeleteTodo { .. } => "deleteTodo",
            Self::CompleteTodo { .. } => "completeTodo",
            Self::UpdateTodoTask { .. } => "updateTodoTask",
        }
    }

    /// Whether the operation can change the document.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::ListTodos | Self::Login { .. })
    }
}

fn required_arg<'a>(arguments: &'a Arguments, key: &str) -> Result<&'a Value, ServiceError> {
    match arguments.get(key) {
        Some(Value::Null) | None => Err(ServiceError::InvalidArgument(format!(
            "missing argument `{key}`"
        ))),
        Some(value) => Ok(value),
    }
}

fn string_arg(arguments: &Arguments, key: &str) -> Result<String, ServiceError> {
    match required_arg(arguments, key)? {
        Value::String(value) => Ok(value.clone()),
        other => Err(ServiceError::InvalidArgument(format!(
            "argument `{key}` must be a string, got {}",
            json_type_name(other)
        ))),
    }
}

fn id_arg(arguments: &Arguments, key: &str) -> Result<RecordId, ServiceError> {
    let value = required_arg(arguments, key)?;
    coerce_id_value(value).ok_or_else(|| {
        ServiceError::InvalidArgument(format!(
            "argument `{key}` must be an integer id, got {}",
            json_type_name(value)
        ))
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
