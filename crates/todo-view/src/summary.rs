//! Serialisable views handed to whatever renders lists.

use serde::Serialize;

use todo_types::{ListId, Todo, TodoList};

use crate::order::{partition_lists, partition_todos};
use crate::status::{is_list_complete, remaining_count, todos_count};

/// One line of the "all lists" overview.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListSummary {
    pub id: ListId,
    pub name: String,
    pub todos_count: usize,
    pub remaining_count: usize,
    pub complete: bool,
}

impl ListSummary {
    pub fn of(list: &TodoList) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
            todos_count: todos_count(list),
            remaining_count: remaining_count(list),
            complete: is_list_complete(list),
        }
    }

    /// Summaries of `lists` in display order.
    pub fn ordered(lists: &[TodoList]) -> Vec<Self> {
        partition_lists(lists).into_iter().map(Self::of).collect()
    }
}

/// A single list with its todos in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub id: ListId,
    pub name: String,
    pub todos_count: usize,
    pub remaining_count: usize,
    pub complete: bool,
    pub todos: Vec<Todo>,
}

impl ListView {
    pub fn of(list: &TodoList) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
            todos_count: todos_count(list),
            remaining_count: remaining_count(list),
            complete: is_list_complete(list),
            todos: partition_todos(&list.todos).into_iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_types::{validate_list_name, validate_todo_name, TodoId};

    fn groceries() -> TodoList {
        let mut list = TodoList::new(ListId::new(1), validate_list_name("Groceries", &[]).unwrap());
        let mut milk = Todo::new(TodoId::new(1), validate_todo_name("Milk").unwrap());
        milk.completed = true;
        list.todos.push(milk);
        list.todos.push(Todo::new(TodoId::new(2), validate_todo_name("Eggs").unwrap()));
        list
    }

    #[test]
    fn summary_counts() {
        let s = ListSummary::of(&groceries());
        assert_eq!(s.todos_count, 2);
        assert_eq!(s.remaining_count, 1);
        assert!(!s.complete);
    }

    #[test]
    fn view_orders_open_todos_first() {
        let v = ListView::of(&groceries());
        let names: Vec<_> = v.todos.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Eggs", "Milk"]);
    }

    #[test]
    fn summary_json() {
        let json = serde_json::to_value(ListSummary::of(&groceries())).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["remaining_count"], 1);
        assert_eq!(json["complete"], false);
    }
}
