//! The two entities of the system: lists and the todos they own.

use serde::{Deserialize, Serialize};

use crate::id::{Entity, ListId, TodoId};
use crate::name::Name;

/// A single task inside a list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique within the parent list only.
    pub id: TodoId,
    pub name: String,
    pub completed: bool,
}

impl Todo {
    /// A new, not yet completed todo.
    pub fn new(id: TodoId, name: Name) -> Self {
        Self {
            id,
            name: name.into_string(),
            completed: false,
        }
    }
}

impl Entity for Todo {
    type Id = TodoId;

    fn raw_id(&self) -> u64 {
        self.id.get()
    }
}

/// A named list together with all of its todos.
///
/// Stores always hand out lists with the full todo collection loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// A new list with no todos.
    pub fn new(id: ListId, name: Name) -> Self {
        Self {
            id,
            name: name.into_string(),
            todos: Vec::new(),
        }
    }

    /// Look a todo up by its id (not by its position).
    pub fn todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Mutable variant of [`TodoList::todo`].
    pub fn todo_mut(&mut self, id: TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }

    /// Remove the todo with the given id, returning it if it existed.
    pub fn remove_todo(&mut self, id: TodoId) -> Option<Todo> {
        let index = self.todos.iter().position(|todo| todo.id == id)?;
        Some(self.todos.remove(index))
    }
}

impl Entity for TodoList {
    type Id = ListId;

    fn raw_id(&self) -> u64 {
        self.id.get()
    }
}
