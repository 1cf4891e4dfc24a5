//! Durable [`TodoStore`] over a relational database.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use todo_store::{StoreError, StoreResult, TodoStore};
use todo_types::{ListId, Name, Todo, TodoId, TodoList};

use crate::error::{SqlError, SqlResult};
use crate::executor::{QueryExecutor, Row};
use crate::sqlite::SqliteExecutor;

/// Text form of a boolean column value.
pub fn encode_flag(value: bool) -> &'static str {
    if value {
        "t"
    } else {
        "f"
    }
}

/// Decode a `"t"` / `"f"` boolean column value.
pub fn decode_flag(column: &str, raw: &str) -> SqlResult<bool> {
    match raw {
        "t" => Ok(true),
        "f" => Ok(false),
        other => Err(SqlError::Decode {
            column: column.to_string(),
            value: other.to_string(),
            reason: "expected 't' or 'f'".into(),
        }),
    }
}

/// A [`TodoStore`] that keeps lists and todos in two tables, `lists` and
/// `todos`, through a [`QueryExecutor`].
///
/// Ids are assigned by the database. Lists are returned in id order, todos in
/// id order within their list.
#[derive(Debug)]
pub struct DatabasePersistence<E> {
    executor: E,
}

impl DatabasePersistence<SqliteExecutor> {
    /// Open a SQLite database file, creating the schema if needed.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(SqliteExecutor::open(path)?))
    }

    /// A throwaway in-memory SQLite database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(SqliteExecutor::open_in_memory()?))
    }
}

impl<E: QueryExecutor> DatabasePersistence<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn query(&self, sql: &str, params: &[&str]) -> SqlResult<Vec<Row>> {
        debug!(statement = sql, ?params, "query");
        self.executor.query(sql, params)
    }

    fn execute(&self, sql: &str, params: &[&str]) -> SqlResult<u64> {
        debug!(statement = sql, ?params, "execute");
        self.executor.execute(sql, params)
    }

    fn list_exists(&self, id: ListId) -> SqlResult<bool> {
        let id = id.to_string();
        let rows = self.query("SELECT 1 AS present FROM lists WHERE id = ?1", &[id.as_str()])?;
        Ok(!rows.is_empty())
    }

    /// Work out which of the two targets is missing after a todo statement
    /// matched nothing.
    fn todo_miss(&self, list_id: ListId, todo_id: TodoId) -> StoreError {
        match self.list_exists(list_id) {
            Ok(true) => StoreError::TodoNotFound { list_id, todo_id },
            Ok(false) => StoreError::ListNotFound { list_id },
            Err(err) => err.into(),
        }
    }

    fn todos_for_list(&self, list_id: ListId) -> SqlResult<Vec<Todo>> {
        let id = list_id.to_string();
        self.query(
            "SELECT id, name, complete FROM todos WHERE list_id = ?1 ORDER BY id",
            &[id.as_str()],
        )?
        .iter()
        .map(row_to_todo)
        .collect()
    }
}

fn row_to_todo(row: &Row) -> SqlResult<Todo> {
    Ok(Todo {
        id: TodoId::new(row.parse("id")?),
        name: row.get("name")?.to_string(),
        completed: decode_flag("complete", row.get("complete")?)?,
    })
}

fn row_to_list(row: &Row, todos: Vec<Todo>) -> SqlResult<TodoList> {
    Ok(TodoList {
        id: ListId::new(row.parse("id")?),
        name: row.get("name")?.to_string(),
        todos,
    })
}

impl<E: QueryExecutor> TodoStore for DatabasePersistence<E> {
    fn find_list(&self, id: ListId) -> StoreResult<Option<TodoList>> {
        let raw = id.to_string();
        let rows = self.query("SELECT id, name FROM lists WHERE id = ?1", &[raw.as_str()])?;
        let Some(row) = rows.first() else {
            return Ok(None);
        };
        let todos = self.todos_for_list(id)?;
        Ok(Some(row_to_list(row, todos)?))
    }

    fn all_lists(&self) -> StoreResult<Vec<TodoList>> {
        let list_rows = self.query("SELECT id, name FROM lists ORDER BY id", &[])?;
        let todo_rows = self.query(
            "SELECT id, list_id, name, complete FROM todos ORDER BY id",
            &[],
        )?;

        let mut todos_by_list: HashMap<u64, Vec<Todo>> = HashMap::new();
        for row in &todo_rows {
            let list_id: u64 = row.parse("list_id")?;
            todos_by_list
                .entry(list_id)
                .or_default()
                .push(row_to_todo(row)?);
        }

        let mut lists = Vec::with_capacity(list_rows.len());
        for row in &list_rows {
            let id: u64 = row.parse("id")?;
            let todos = todos_by_list.remove(&id).unwrap_or_default();
            lists.push(row_to_list(row, todos)?);
        }
        Ok(lists)
    }

    fn create_list(&self, name: &Name) -> StoreResult<ListId> {
        let rows = self.query(
            "INSERT INTO lists (name) VALUES (?1) RETURNING id",
            &[name.as_str()],
        )?;
        let row = rows
            .first()
            .ok_or_else(|| SqlError::MissingColumn("id".into()))?;
        let id = ListId::new(row.parse("id")?);
        debug!(list_id = %id, name = %name, "database: created list");
        Ok(id)
    }

    fn rename_list(&self, id: ListId, name: &Name) -> StoreResult<()> {
        let raw = id.to_string();
        let affected = self.execute(
            "UPDATE lists SET name = ?1 WHERE id = ?2",
            &[name.as_str(), raw.as_str()],
        )?;
        if affected == 0 {
            return Err(StoreError::ListNotFound { list_id: id });
        }
        debug!(list_id = %id, name = %name, "database: renamed list");
        Ok(())
    }

    fn delete_list(&self, id: ListId) -> StoreResult<()> {
        let raw = id.to_string();
        // Todos go with it through ON DELETE CASCADE.
        let affected = self.execute("DELETE FROM lists WHERE id = ?1", &[raw.as_str()])?;
        if affected == 0 {
            return Err(StoreError::ListNotFound { list_id: id });
        }
        debug!(list_id = %id, "database: deleted list");
        Ok(())
    }

    fn create_todo(&self, list_id: ListId, name: &Name) -> StoreResult<TodoId> {
        let raw = list_id.to_string();
        // Inserting through a SELECT on lists yields no row for a missing list.
        let rows = self.query(
            "INSERT INTO todos (list_id, name) SELECT id, ?2 FROM lists WHERE id = ?1 RETURNING id",
            &[raw.as_str(), name.as_str()],
        )?;
        let Some(row) = rows.first() else {
            return Err(StoreError::ListNotFound { list_id });
        };
        let id = TodoId::new(row.parse("id")?);
        debug!(list_id = %list_id, todo_id = %id, "database: created todo");
        Ok(id)
    }

    fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> StoreResult<()> {
        let (list, todo) = (list_id.to_string(), todo_id.to_string());
        let affected = self.execute(
            "DELETE FROM todos WHERE list_id = ?1 AND id = ?2",
            &[list.as_str(), todo.as_str()],
        )?;
        if affected == 0 {
            return Err(self.todo_miss(list_id, todo_id));
        }
        debug!(list_id = %list_id, todo_id = %todo_id, "database: deleted todo");
        Ok(())
    }

    fn update_todo_status(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> StoreResult<()> {
        let (list, todo) = (list_id.to_string(), todo_id.to_string());
        let affected = self.execute(
            "UPDATE todos SET complete = ?1 WHERE list_id = ?2 AND id = ?3",
            &[encode_flag(completed), list.as_str(), todo.as_str()],
        )?;
        if affected == 0 {
            return Err(self.todo_miss(list_id, todo_id));
        }
        debug!(
            list_id = %list_id,
            todo_id = %todo_id,
            completed,
            "database: updated todo status"
        );
        Ok(())
    }

    fn mark_all_completed(&self, list_id: ListId) -> StoreResult<()> {
        let raw = list_id.to_string();
        let affected = self.execute(
            "UPDATE todos SET complete = ?1 WHERE list_id = ?2",
            &[encode_flag(true), raw.as_str()],
        )?;
        // Zero rows is fine for an empty list, not for a missing one.
        if affected == 0 && !self.list_exists(list_id)? {
            return Err(StoreError::ListNotFound { list_id });
        }
        debug!(list_id = %list_id, todos = affected, "database: completed all todos");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use todo_store::conformance;
    use todo_types::{validate_list_name, validate_todo_name};

    fn store() -> DatabasePersistence<SqliteExecutor> {
        DatabasePersistence::open_in_memory().unwrap()
    }

    #[test]
    fn conformance_suite() {
        conformance::run_all(store);
    }

    #[test]
    fn flags() {
        assert_eq!(encode_flag(true), "t");
        assert_eq!(encode_flag(false), "f");
        assert!(decode_flag("complete", "t").unwrap());
        assert!(!decode_flag("complete", "f").unwrap());
        assert!(matches!(
            decode_flag("complete", "true"),
            Err(SqlError::Decode { .. })
        ));
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");

        let id = {
            let store = DatabasePersistence::open(&path).unwrap();
            let id = store
                .create_list(&validate_list_name("Groceries", &[]).unwrap())
                .unwrap();
            let milk = store
                .create_todo(id, &validate_todo_name("Milk").unwrap())
                .unwrap();
            store.update_todo_status(id, milk, true).unwrap();
            id
        };

        let store = DatabasePersistence::open(&path).unwrap();
        let list = store.load_list(id).unwrap();
        assert_eq!(list.name, "Groceries");
        assert_eq!(list.todos.len(), 1);
        assert!(list.todos[0].completed);
    }

    #[test]
    fn lists_come_back_in_id_order() {
        let store = store();
        for name in ["b", "a", "c"] {
            store
                .create_list(&validate_list_name(name, &[]).unwrap())
                .unwrap();
        }
        let names: Vec<_> = store.all_lists().unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn duplicate_name_is_a_medium_fault() {
        let store = store();
        let name = validate_list_name("Groceries", &[]).unwrap();
        store.create_list(&name).unwrap();
        let err = store.create_list(&name).unwrap_err();
        assert!(matches!(err, StoreError::Medium(_)));
    }

    /// Replays canned rows and records every statement.
    struct ScriptedExecutor {
        rows: Vec<Row>,
        seen: Mutex<Vec<String>>,
    }

    impl QueryExecutor for ScriptedExecutor {
        fn query(&self, sql: &str, _params: &[&str]) -> SqlResult<Vec<Row>> {
            self.seen.lock().unwrap().push(sql.to_string());
            Ok(self.rows.clone())
        }

        fn execute(&self, sql: &str, _params: &[&str]) -> SqlResult<u64> {
            self.seen.lock().unwrap().push(sql.to_string());
            Ok(0)
        }
    }

    #[test]
    fn unexpected_flag_from_medium_is_a_fault() {
        let row: Row = [("id", "1"), ("list_id", "1"), ("name", "x"), ("complete", "maybe")]
            .into_iter()
            .collect();
        let store = DatabasePersistence::new(ScriptedExecutor {
            rows: vec![row],
            seen: Mutex::new(Vec::new()),
        });
        let err = store.find_list(ListId::new(1)).unwrap_err();
        assert!(matches!(err, StoreError::Medium(_)));
    }

    #[test]
    fn missing_todo_probes_for_the_list() {
        let store = DatabasePersistence::new(ScriptedExecutor {
            rows: Vec::new(),
            seen: Mutex::new(Vec::new()),
        });
        let err = store.delete_todo(ListId::new(1), TodoId::new(2)).unwrap_err();
        assert!(matches!(err, StoreError::ListNotFound { .. }));

        let seen = store.executor().seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].starts_with("DELETE FROM todos"));
        assert!(seen[1].starts_with("SELECT 1 AS present"));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn every_mutation_is_logged() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let store = store();
            let id = store
                .create_list(&validate_list_name("Chores", &[]).unwrap())
                .unwrap();
            let todo = store
                .create_todo(id, &validate_todo_name("Dishes").unwrap())
                .unwrap();
            store.update_todo_status(id, todo, true).unwrap();
            store.mark_all_completed(id).unwrap();
            store
                .rename_list(id, &validate_list_name("House", &[]).unwrap())
                .unwrap();
            store.delete_todo(id, todo).unwrap();
            store.delete_list(id).unwrap();
        });

        let bytes = buffer.0.lock().unwrap().clone();
        let logs = String::from_utf8_lossy(&bytes);
        for event in [
            "database: created list",
            "database: created todo",
            "database: updated todo status",
            "database: completed all todos",
            "database: renamed list",
            "database: deleted todo",
            "database: deleted list",
        ] {
            assert!(logs.contains(event), "no {event:?} event in:\n{logs}");
        }
    }
}
