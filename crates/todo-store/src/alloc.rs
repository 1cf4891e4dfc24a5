//! Id allocation for stores that cannot rely on their medium to hand out ids.
//!
//! The next id is the largest id in the collection plus one (1 for an empty
//! collection). Ids of deleted entities can come back: removing the entity with
//! the highest id and allocating again yields the same number. Ids are only
//! ever used to address an entity while it exists, so that is fine.
//!
//! Allocation reads the collection and the caller then appends to it. Two
//! writers interleaving on the same collection could both observe the same
//! maximum; the session store avoids that by holding its write lock across both
//! steps.

use todo_types::Entity;

/// Return an id not used by any of `entities`.
pub fn next_id<'a, E>(entities: impl IntoIterator<Item = &'a E>) -> E::Id
where
    E: Entity + 'a,
{
    let max = entities
        .into_iter()
        .map(Entity::raw_id)
        .max()
        .unwrap_or(0);
    E::Id::from(max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_types::{validate_todo_name, ListId, Todo, TodoId, TodoList};

    fn todo(id: u64) -> Todo {
        Todo::new(TodoId::new(id), validate_todo_name("task").unwrap())
    }

    #[test]
    fn empty_collection_starts_at_one() {
        let todos: Vec<Todo> = Vec::new();
        assert_eq!(next_id(&todos), TodoId::new(1));
    }

    #[test]
    fn gaps_are_not_filled() {
        let todos = vec![todo(1), todo(7), todo(3)];
        assert_eq!(next_id(&todos), TodoId::new(8));
    }

    #[test]
    fn highest_id_is_reused_after_delete() {
        let mut todos = vec![todo(1), todo(2), todo(3)];
        assert_eq!(next_id(&todos), TodoId::new(4));
        todos.retain(|t| t.id != TodoId::new(3));
        assert_eq!(next_id(&todos), TodoId::new(3));
    }

    #[test]
    fn works_for_lists() {
        let lists = vec![TodoList::new(
            ListId::new(4),
            todo_types::validate_list_name("Chores", &[]).unwrap(),
        )];
        let id: ListId = next_id(&lists);
        assert_eq!(id, ListId::new(5));
    }
}
