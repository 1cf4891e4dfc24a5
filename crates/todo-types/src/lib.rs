//! Foundation types for the todo-list manager.
//!
//! Every other crate in the workspace speaks in terms of these types: typed
//! identifiers for lists and todos, the validated [`Name`] used whenever a list
//! or todo is created or renamed, and the [`TodoList`] / [`Todo`] entities that
//! the stores hand back to callers.
//!
//! # Modules
//!
//! - [`error`]: [`ValidationError`] for caller-side checks
//! - [`id`]: [`ListId`], [`TodoId`] and the [`Entity`] trait
//! - [`name`]: [`Name`] and the list/todo name validators
//! - [`entity`]: [`TodoList`] and [`Todo`]

pub mod entity;
pub mod error;
pub mod id;
pub mod name;

pub use entity::{Todo, TodoList};
pub use error::{NameKind, Result, ValidationError};
pub use id::{Entity, ListId, TodoId};
pub use name::{validate_list_name, validate_list_rename, validate_todo_name, Name, MAX_NAME_CHARS};
