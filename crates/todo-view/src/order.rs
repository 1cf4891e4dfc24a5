//! Display ordering.
//!
//! Unfinished items come first, finished ones last. The partition is stable:
//! within each group the input order is kept.

use todo_types::{Todo, TodoList};

use crate::status::is_list_complete;

/// Stable partition of `items`: those for which `is_done` is false, then the rest.
pub fn partition_by<T>(items: &[T], is_done: impl Fn(&T) -> bool) -> Vec<&T> {
    let (done, open): (Vec<&T>, Vec<&T>) = items.iter().partition(|item| is_done(item));
    open.into_iter().chain(done).collect()
}

/// Incomplete lists first, then complete ones.
pub fn partition_lists(lists: &[TodoList]) -> Vec<&TodoList> {
    partition_by(lists, is_list_complete)
}

/// Open todos first, then completed ones.
pub fn partition_todos(todos: &[Todo]) -> Vec<&Todo> {
    partition_by(todos, |todo| todo.completed)
}
