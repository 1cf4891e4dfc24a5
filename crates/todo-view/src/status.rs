use todo_types::TodoList;

/// Total number of todos in `list`.
pub fn todos_count(list: &TodoList) -> usize {
    list.todos.len()
}

/// Number of todos in `list` that are not completed yet.
pub fn remaining_count(list: &TodoList) -> usize {
    list.todos.iter().filter(|todo| !todo.completed).count()
}

/// A list is complete when it has at least one todo and all of them are done.
///
/// An empty list is never complete.
pub fn is_list_complete(list: &TodoList) -> bool {
    todos_count(list) > 0 && remaining_count(list) == 0
}
