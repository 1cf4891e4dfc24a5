//! Session-backed store for a single client.
//!
//! [`SessionPersistence`] keeps the client's lists as JSON under
//! [`LISTS_KEY`] in a [`SessionContainer`]. The caller builds one per request
//! from the session it owns and takes the session back with
//! [`SessionPersistence::into_session`] once the request is done. Nothing is
//! shared between sessions.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use todo_types::{ListId, Name, Todo, TodoId, TodoList};

use crate::alloc::next_id;
use crate::container::{SessionContainer, LISTS_KEY};
use crate::error::{StoreError, StoreResult};
use crate::traits::TodoStore;

/// A [`TodoStore`] over one client's session.
///
/// Every mutation decodes the list collection, applies the change and writes
/// the collection back. A mutation that fails leaves the session untouched.
#[derive(Debug)]
pub struct SessionPersistence<S> {
    session: RwLock<S>,
}

impl<S: SessionContainer> SessionPersistence<S> {
    /// Wrap a session, seeding an empty list collection if it has none yet.
    pub fn new(mut session: S) -> Self {
        if session.get(LISTS_KEY).is_none() {
            session.insert(LISTS_KEY, Value::Array(Vec::new()));
        }
        Self {
            session: RwLock::new(session),
        }
    }

    /// Hand the session back to the caller.
    pub fn into_session(self) -> S {
        self.session
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_guard(&self) -> StoreResult<RwLockReadGuard<'_, S>> {
        self.session
            .read()
            .map_err(|e| StoreError::Session(format!("lock poisoned: {e}")))
    }

    fn write_guard(&self) -> StoreResult<RwLockWriteGuard<'_, S>> {
        self.session
            .write()
            .map_err(|e| StoreError::Session(format!("lock poisoned: {e}")))
    }

    /// Run `f` against a decoded copy of the lists and, if it succeeds, store
    /// the result back into the session.
    fn update<T>(
        &self,
        f: impl FnOnce(&mut Vec<TodoList>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut session = self.write_guard()?;
        let mut lists = decode_lists(&*session)?;
        let out = f(&mut lists)?;
        let value = serde_json::to_value(&lists)
            .map_err(|e| StoreError::Session(format!("encode lists: {e}")))?;
        session.insert(LISTS_KEY, value);
        Ok(out)
    }
}

fn decode_lists<S: SessionContainer>(session: &S) -> StoreResult<Vec<TodoList>> {
    match session.get(LISTS_KEY) {
        Some(value) => Vec::<TodoList>::deserialize(value)
            .map_err(|e| StoreError::Session(format!("decode lists: {e}"))),
        None => Ok(Vec::new()),
    }
}

fn list_mut(lists: &mut [TodoList], id: ListId) -> StoreResult<&mut TodoList> {
    lists
        .iter_mut()
        .find(|list| list.id == id)
        .ok_or(StoreError::ListNotFound { list_id: id })
}

impl<S: SessionContainer> TodoStore for SessionPersistence<S> {
    fn find_list(&self, id: ListId) -> StoreResult<Option<TodoList>> {
        let session = self.read_guard()?;
        let lists = decode_lists(&*session)?;
        Ok(lists.into_iter().find(|list| list.id == id))
    }

    fn all_lists(&self) -> StoreResult<Vec<TodoList>> {
        let session = self.read_guard()?;
        decode_lists(&*session)
    }

    fn create_list(&self, name: &Name) -> StoreResult<ListId> {
        self.update(|lists| {
            let id = next_id(lists.iter());
            lists.push(TodoList::new(id, name.clone()));
            debug!(list_id = %id, name = %name, "session: created list");
            Ok(id)
        })
    }

    fn rename_list(&self, id: ListId, name: &Name) -> StoreResult<()> {
        self.update(|lists| {
            let list = list_mut(lists, id)?;
            list.name = name.to_string();
            debug!(list_id = %id, name = %name, "session: renamed list");
            Ok(())
        })
    }

    fn delete_list(&self, id: ListId) -> StoreResult<()> {
        self.update(|lists| {
            let before = lists.len();
            lists.retain(|list| list.id != id);
            if lists.len() == before {
                return Err(StoreError::ListNotFound { list_id: id });
            }
            debug!(list_id = %id, "session: deleted list");
            Ok(())
        })
    }

    fn create_todo(&self, list_id: ListId, name: &Name) -> StoreResult<TodoId> {
        self.update(|lists| {
            let list = list_mut(lists, list_id)?;
            let id = next_id(list.todos.iter());
            list.todos.push(Todo::new(id, name.clone()));
            debug!(list_id = %list_id, todo_id = %id, "session: created todo");
            Ok(id)
        })
    }

    fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> StoreResult<()> {
        self.update(|lists| {
            let list = list_mut(lists, list_id)?;
            list.remove_todo(todo_id)
                .ok_or(StoreError::TodoNotFound { list_id, todo_id })?;
            debug!(list_id = %list_id, todo_id = %todo_id, "session: deleted todo");
            Ok(())
        })
    }

    fn update_todo_status(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> StoreResult<()> {
        self.update(|lists| {
            let todo = list_mut(lists, list_id)?
                .todo_mut(todo_id)
                .ok_or(StoreError::TodoNotFound { list_id, todo_id })?;
            todo.completed = completed;
            debug!(
                list_id = %list_id,
                todo_id = %todo_id,
                completed,
                "session: updated todo status"
            );
            Ok(())
        })
    }

    fn mark_all_completed(&self, list_id: ListId) -> StoreResult<()> {
        self.update(|lists| {
            let list = list_mut(lists, list_id)?;
            for todo in &mut list.todos {
                todo.completed = true;
            }
            let todos = list.todos.len();
            debug!(list_id = %list_id, todos, "session: completed all todos");
            Ok(())
        })
    }
}
