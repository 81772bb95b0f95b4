use serde_json::{json, Value};
use std::cell::Cell;
use std::io;
use std::path::PathBuf;
use todo_core::{
    dispatch, execute, Arguments, Document, DocumentStore, ErrorKind, IdPolicy, JsonFileStore,
    MemoryStore, Operation, OperationOutput, RepoError, ServiceError, StoreError, StoreResult,
    Todo, TodoService,
};

/// Store double that counts calls and can fail on demand.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    loads: Cell<usize>,
    flushes: Cell<usize>,
    fail_load: bool,
    fail_flush: bool,
}

impl CountingStore {
    fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    fn failing_flush() -> Self {
        Self {
            fail_flush: true,
            ..Self::default()
        }
    }
}

fn unavailable() -> StoreError {
    StoreError::Io {
        path: PathBuf::from("/unavailable/db.json"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
    }
}

impl DocumentStore for CountingStore {
    fn load(&self) -> StoreResult<Document> {
        self.loads.set(self.loads.get() + 1);
        if self.fail_load {
            return Err(unavailable());
        }
        self.inner.load()
    }

    fn flush(&self, document: &Document) -> StoreResult<()> {
        self.flushes.set(self.flushes.get() + 1);
        if self.fail_flush {
            return Err(unavailable());
        }
        self.inner.flush(document)
    }
}

fn args(value: Value) -> Arguments {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn todo_lifecycle_scenario() {
    let service = TodoService::new(MemoryStore::new());

    let added = service.add_todo(1, "buy milk").unwrap();
    assert_eq!(
        serde_json::to_value(&added).unwrap(),
        json!({"id": 1, "userId": 1, "task": "buy milk", "completed": false})
    );

    assert!(service.complete_todo(1).unwrap().completed);
    assert!(!service.complete_todo(1).unwrap().completed);

    let removed = service.delete_todo(1).unwrap();
    assert_eq!(removed, Todo::new(1, 1, "buy milk"));
    assert!(service.list_todos().unwrap().is_empty());
}

#[test]
fn signup_then_login_with_wrong_email_is_not_found() {
    let service = TodoService::new(MemoryStore::new());

    let user = service.signup("a", "a@x.com").unwrap();
    let logged_in = service.login("a", "a@x.com").unwrap();
    assert_eq!(logged_in, user);

    let err = service.login("a", "wrong@x.com").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(matches!(err, ServiceError::NotFound(RepoError::UserNotFound)));
}

#[test]
fn sequential_adds_return_increasing_ids_across_requests() {
    let service = TodoService::new(MemoryStore::new());
    let ids: Vec<_> = (0..5)
        .map(|n| service.add_todo(1, &format!("task {n}")).unwrap().id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn deleted_todo_is_not_found_afterwards() {
    let service = TodoService::new(MemoryStore::new());
    service.add_todo(1, "a").unwrap();
    service.delete_todo(1).unwrap();

    for err in [
        service.delete_todo(1).unwrap_err(),
        service.complete_todo(1).unwrap_err(),
        service.update_todo_task(1, "b").unwrap_err(),
    ] {
        assert!(matches!(err, ServiceError::NotFound(RepoError::TodoNotFound(1))));
    }
}

#[test]
fn update_task_preserves_identity_and_state() {
    let service = TodoService::new(MemoryStore::new());
    service.add_todo(3, "draft").unwrap();
    service.complete_todo(1).unwrap();

    let updated = service.update_todo_task(1, "final").unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.user_id, 3);
    assert!(updated.completed);
    assert_eq!(service.list_todos().unwrap(), vec![updated]);
}

#[test]
fn mutations_load_once_and_flush_once() {
    let service = TodoService::new(CountingStore::default());
    service.add_todo(1, "a").unwrap();

    assert_eq!(service.store().loads.get(), 1);
    assert_eq!(service.store().flushes.get(), 1);
}

#[test]
fn read_only_operations_never_flush() {
    let service = TodoService::new(CountingStore::default());
    service.list_todos().unwrap();
    service.login("nobody", "none").unwrap_err();

    assert_eq!(service.store().loads.get(), 2);
    assert_eq!(service.store().flushes.get(), 0);
}

#[test]
fn failed_operation_skips_flush() {
    let service = TodoService::new(CountingStore::default());
    service.complete_todo(9).unwrap_err();

    assert_eq!(service.store().loads.get(), 1);
    assert_eq!(service.store().flushes.get(), 0);
}

#[test]
fn load_failure_aborts_before_mutation() {
    let service = TodoService::new(CountingStore::failing_load());
    let err = service.add_todo(1, "a").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    assert_eq!(service.store().flushes.get(), 0);
}

#[test]
fn flush_failure_reports_storage_unavailable_and_applies_nothing() {
    let service = TodoService::new(CountingStore::failing_flush());
    let err = service.signup("a", "a@x.com").unwrap_err();

    assert!(matches!(err, ServiceError::StorageUnavailable(StoreError::Io { .. })));
    assert_eq!(service.store().flushes.get(), 1);
    assert!(service.store().inner.load().unwrap().users.is_empty());
}

#[test]
fn high_water_mark_service_avoids_reuse() {
    let service = TodoService::with_id_policy(MemoryStore::new(), IdPolicy::HighWaterMark);
    service.add_todo(1, "a").unwrap();
    service.add_todo(1, "b").unwrap();
    service.delete_todo(1).unwrap();

    assert_eq!(service.add_todo(1, "c").unwrap().id, 3);
}

#[test]
fn file_backed_service_persists_between_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");

    TodoService::new(JsonFileStore::new(&path))
        .add_todo(1, "persisted")
        .unwrap();

    let fresh = TodoService::new(JsonFileStore::new(&path));
    let todos = fresh.list_todos().unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].task, "persisted");
}

#[test]
fn dispatch_routes_typed_operations() {
    let service = TodoService::new(MemoryStore::new());

    let output = dispatch(
        &service,
        &Operation::AddTodo {
            user_id: 1,
            task: "a".to_string(),
        },
    )
    .unwrap();
    assert_eq!(output, OperationOutput::Todo(Todo::new(1, 1, "a")));

    let output = dispatch(&service, &Operation::ListTodos).unwrap();
    assert_eq!(output, OperationOutput::Todos(vec![Todo::new(1, 1, "a")]));
}

#[test]
fn execute_coerces_string_ids_and_wraps_success() {
    let service = TodoService::new(MemoryStore::new());
    execute(&service, "addTodo", &args(json!({"userId": "1", "task": "a"})));

    let response = execute(&service, "completeTodo", &args(json!({"id": "1"})));
    assert!(response.ok);
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"ok": true, "data": {"id": 1, "userId": 1, "task": "a", "completed": true}})
    );
}

#[test]
fn execute_reports_not_found_envelope() {
    let service = TodoService::new(MemoryStore::new());
    let response = execute(&service, "deleteTodo", &args(json!({"id": 5})));

    assert!(!response.ok);
    assert!(response.data.is_none());
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"ok": false, "error": {"kind": "not_found", "message": "todo not found: 5"}})
    );
}

#[test]
fn execute_rejects_bad_arguments_without_touching_storage() {
    let service = TodoService::new(CountingStore::default());
    let response = execute(&service, "deleteTodo", &args(json!({"id": "abc"})));

    let error = response.error.unwrap();
    assert_eq!(error.kind, ErrorKind::InvalidArgument);
    assert_eq!(service.store().loads.get(), 0);
}

#[test]
fn execute_lists_todos_under_query_alias() {
    let service = TodoService::new(MemoryStore::new());
    execute(&service, "addTodo", &args(json!({"userId": 2, "task": "x"})));

    let response = execute(&service, "todos", &Arguments::new());
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"ok": true, "data": [{"id": 1, "userId": 2, "task": "x", "completed": false}]})
    );
}
