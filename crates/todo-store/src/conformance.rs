//! Behaviour every [`TodoStore`] must show, as reusable checks.
//!
//! Backends call [`run_all`] from their own tests with a constructor for a
//! fresh, empty store. Each check gets its own store.

use todo_types::{validate_list_name, validate_todo_name, ListId, Name, TodoId};
use todo_view::{is_list_complete, remaining_count};

use crate::error::StoreError;
use crate::traits::TodoStore;

fn list_name(store: &dyn TodoStore, raw: &str) -> Name {
    let existing = store.all_lists().unwrap();
    validate_list_name(raw, &existing).unwrap()
}

fn todo_name(raw: &str) -> Name {
    validate_todo_name(raw).unwrap()
}

/// Run every check against fresh stores built by `make`.
pub fn run_all<T, F>(make: F)
where
    T: TodoStore,
    F: Fn() -> T,
{
    let checks: &[(&str, fn(&dyn TodoStore))] = &[
        ("created list is empty", created_list_is_empty),
        ("find missing list", find_missing_list_is_none),
        ("all lists hydrated", all_lists_are_hydrated),
        ("rename", rename_list),
        ("rename missing", rename_missing_list),
        ("delete cascades", delete_list_cascades),
        ("delete missing list", delete_missing_list),
        ("todo on missing list", todo_on_missing_list),
        ("groceries scenario", groceries_scenario),
        ("chores scenario", chores_scenario),
        ("mark all on empty list", mark_all_on_empty_list),
        ("duplicate name rejected", duplicate_list_name_rejected),
        ("delete missing todo", delete_missing_todo),
        ("update missing todo", update_missing_todo),
        ("todo ids unique per list", todo_ids_unique_per_list),
        ("status round trip", status_round_trip),
    ];
    for (name, check) in checks {
        let store = make();
        tracing::debug!(check = *name, "running store conformance check");
        check(&store);
    }
}

pub fn created_list_is_empty(store: &dyn TodoStore) {
    let id = store.create_list(&list_name(store, "Groceries")).unwrap();
    let list = store.find_list(id).unwrap().expect("list just created");
    assert_eq!(list.id, id);
    assert_eq!(list.name, "Groceries");
    assert!(list.todos.is_empty());
}

pub fn find_missing_list_is_none(store: &dyn TodoStore) {
    assert!(store.find_list(ListId::new(404)).unwrap().is_none());
    let err = store.load_list(ListId::new(404)).unwrap_err();
    assert!(matches!(err, StoreError::ListNotFound { .. }));
}

pub fn all_lists_are_hydrated(store: &dyn TodoStore) {
    let a = store.create_list(&list_name(store, "a")).unwrap();
    let b = store.create_list(&list_name(store, "b")).unwrap();
    store.create_todo(a, &todo_name("one")).unwrap();
    store.create_todo(a, &todo_name("two")).unwrap();
    store.create_todo(b, &todo_name("three")).unwrap();

    let lists = store.all_lists().unwrap();
    assert_eq!(lists.len(), 2);
    let a = lists.iter().find(|l| l.id == a).unwrap();
    let b = lists.iter().find(|l| l.id == b).unwrap();
    assert_eq!(a.todos.len(), 2);
    assert_eq!(b.todos.len(), 1);
    assert_eq!(b.todos[0].name, "three");
}

pub fn rename_list(store: &dyn TodoStore) {
    let id = store.create_list(&list_name(store, "Old")).unwrap();
    store.create_todo(id, &todo_name("keep me")).unwrap();
    store.rename_list(id, &list_name(store, "New")).unwrap();

    let list = store.load_list(id).unwrap();
    assert_eq!(list.name, "New");
    assert_eq!(list.todos.len(), 1);
}

pub fn rename_missing_list(store: &dyn TodoStore) {
    let err = store
        .rename_list(ListId::new(7), &list_name(store, "Nope"))
        .unwrap_err();
    assert!(matches!(err, StoreError::ListNotFound { list_id } if list_id == ListId::new(7)));
    assert!(store.all_lists().unwrap().is_empty());
}

pub fn delete_list_cascades(store: &dyn TodoStore) {
    let id = store.create_list(&list_name(store, "Doomed")).unwrap();
    let todo = store.create_todo(id, &todo_name("gone")).unwrap();
    let other = store.create_list(&list_name(store, "Survivor")).unwrap();
    store.create_todo(other, &todo_name("stays")).unwrap();

    store.delete_list(id).unwrap();

    assert!(store.find_list(id).unwrap().is_none());
    assert!(store.delete_todo(id, todo).unwrap_err().is_not_found());
    assert!(store.update_todo_status(id, todo, true).unwrap_err().is_not_found());
    assert!(store.mark_all_completed(id).unwrap_err().is_not_found());
    assert!(store.create_todo(id, &todo_name("again")).unwrap_err().is_not_found());

    let remaining = store.all_lists().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].todos.len(), 1);
}

pub fn delete_missing_list(store: &dyn TodoStore) {
    let err = store.delete_list(ListId::new(3)).unwrap_err();
    assert!(matches!(err, StoreError::ListNotFound { .. }));
}

pub fn todo_on_missing_list(store: &dyn TodoStore) {
    let err = store
        .create_todo(ListId::new(12), &todo_name("Milk"))
        .unwrap_err();
    assert!(matches!(err, StoreError::ListNotFound { .. }));
    assert!(store.all_lists().unwrap().is_empty());
}

pub fn groceries_scenario(store: &dyn TodoStore) {
    let id = store.create_list(&list_name(store, "Groceries")).unwrap();
    let milk = store.create_todo(id, &todo_name("Milk")).unwrap();
    store.create_todo(id, &todo_name("Eggs")).unwrap();
    store.update_todo_status(id, milk, true).unwrap();

    let list = store.load_list(id).unwrap();
    assert_eq!(remaining_count(&list), 1);
    assert!(!is_list_complete(&list));
    assert!(list.todo(milk).unwrap().completed);
}

pub fn chores_scenario(store: &dyn TodoStore) {
    let id = store.create_list(&list_name(store, "Chores")).unwrap();
    store.create_todo(id, &todo_name("Dishes")).unwrap();
    store.mark_all_completed(id).unwrap();

    let list = store.load_list(id).unwrap();
    assert!(is_list_complete(&list));
    assert_eq!(remaining_count(&list), 0);
}

pub fn mark_all_on_empty_list(store: &dyn TodoStore) {
    let id = store.create_list(&list_name(store, "Empty")).unwrap();
    store.mark_all_completed(id).unwrap();
    let list = store.load_list(id).unwrap();
    assert!(list.todos.is_empty());
    assert!(!is_list_complete(&list));
}

pub fn duplicate_list_name_rejected(store: &dyn TodoStore) {
    store.create_list(&list_name(store, "Groceries")).unwrap();

    let existing = store.all_lists().unwrap();
    let err = validate_list_name("Groceries", &existing).unwrap_err();
    assert!(matches!(
        err,
        todo_types::ValidationError::DuplicateListName { .. }
    ));
    assert_eq!(store.all_lists().unwrap().len(), 1);
}

pub fn delete_missing_todo(store: &dyn TodoStore) {
    let id = store.create_list(&list_name(store, "Three")).unwrap();
    for name in ["one", "two", "three"] {
        store.create_todo(id, &todo_name(name)).unwrap();
    }
    let before = store.load_list(id).unwrap();

    let err = store.delete_todo(id, TodoId::new(5)).unwrap_err();
    assert!(matches!(
        err,
        StoreError::TodoNotFound { list_id, todo_id }
            if list_id == id && todo_id == TodoId::new(5)
    ));
    assert_eq!(store.load_list(id).unwrap(), before);
}

pub fn update_missing_todo(store: &dyn TodoStore) {
    let id = store.create_list(&list_name(store, "One")).unwrap();
    let only = store.create_todo(id, &todo_name("only")).unwrap();

    let missing = TodoId::new(only.get() + 100);
    let err = store.update_todo_status(id, missing, true).unwrap_err();
    assert!(matches!(err, StoreError::TodoNotFound { .. }));
    assert!(!store.load_list(id).unwrap().todos[0].completed);
}

pub fn todo_ids_unique_per_list(store: &dyn TodoStore) {
    let id = store.create_list(&list_name(store, "Ids")).unwrap();
    let mut ids: Vec<TodoId> = (0..5)
        .map(|i| store.create_todo(id, &todo_name(&format!("t{i}"))).unwrap())
        .collect();
    store.delete_todo(id, ids[2]).unwrap();
    ids.push(store.create_todo(id, &todo_name("late")).unwrap());

    let list = store.load_list(id).unwrap();
    let mut seen: Vec<TodoId> = list.todos.iter().map(|t| t.id).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), list.todos.len());
    assert_eq!(list.todos.len(), 5);
}

pub fn status_round_trip(store: &dyn TodoStore) {
    let id = store.create_list(&list_name(store, "Flip")).unwrap();
    let todo = store.create_todo(id, &todo_name("flip")).unwrap();

    store.update_todo_status(id, todo, true).unwrap();
    assert!(store.load_list(id).unwrap().todo(todo).unwrap().completed);
    store.update_todo_status(id, todo, false).unwrap();
    assert!(!store.load_list(id).unwrap().todo(todo).unwrap().completed);
}
