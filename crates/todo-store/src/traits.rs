//! The [`TodoStore`] trait defining the persistence contract.
//!
//! Any backend (session memory, relational database) implements this trait.
//! Route handlers are written against it and never see the medium.

use todo_types::{ListId, Name, TodoId, TodoList};

use crate::error::{StoreError, StoreResult};

/// Persistence for lists and their todos.
///
/// Implementations must uphold, whatever the medium:
///
/// - Lists are always returned with their complete todo collection.
/// - A write is visible to every read issued after it returns.
/// - An operation addressing a missing list fails with
///   [`StoreError::ListNotFound`]; one addressing a missing todo in an existing
///   list fails with [`StoreError::TodoNotFound`]. A failed operation changes
///   nothing.
/// - Names are taken as given. Length is guaranteed by [`Name`]; uniqueness of
///   list names is the caller's responsibility.
pub trait TodoStore: Send + Sync {
    /// Read one list with all of its todos.
    ///
    /// Returns `Ok(None)` if the list does not exist.
    fn find_list(&self, id: ListId) -> StoreResult<Option<TodoList>>;

    /// Read every list with all of its todos.
    ///
    /// Order is backend-defined and only meant for display.
    fn all_lists(&self) -> StoreResult<Vec<TodoList>>;

    /// Create an empty list and return its id.
    fn create_list(&self, name: &Name) -> StoreResult<ListId>;

    /// Give an existing list a new name.
    fn rename_list(&self, id: ListId, name: &Name) -> StoreResult<()>;

    /// Delete a list together with all of its todos.
    fn delete_list(&self, id: ListId) -> StoreResult<()>;

    /// Append a new, uncompleted todo to a list and return its id.
    fn create_todo(&self, list_id: ListId, name: &Name) -> StoreResult<TodoId>;

    /// Delete exactly the todo `todo_id` of list `list_id`.
    fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> StoreResult<()>;

    /// Set the completed flag of one todo.
    fn update_todo_status(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> StoreResult<()>;

    /// Mark every todo of a list completed. Succeeds on an empty list.
    fn mark_all_completed(&self, list_id: ListId) -> StoreResult<()>;

    /// Like [`find_list`](TodoStore::find_list), but a missing list is an error.
    fn load_list(&self, id: ListId) -> StoreResult<TodoList> {
        self.find_list(id)?
            .ok_or(StoreError::ListNotFound { list_id: id })
    }
}
