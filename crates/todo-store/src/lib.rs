//! Storage for the todo-list manager.
//!
//! This crate defines the contract every persistence backend fulfils and ships
//! the transient, session-backed implementation of it.
//!
//! # Architecture
//!
//! - [`TodoStore`] is the single interface route handlers talk to. It is
//!   synchronous and object safe, so callers can hold a `&dyn TodoStore`
//!   without caring which medium sits underneath.
//! - Every operation that addresses a list or todo by id reports a missing
//!   target as [`StoreError::ListNotFound`] / [`StoreError::TodoNotFound`],
//!   whichever backend is in use. `find_list` is the only lookup that answers
//!   `Ok(None)` instead.
//! - Stores never validate names for uniqueness; callers do that up front with
//!   the validators in `todo_types`.
//! - [`SessionPersistence`] keeps the lists inside a [`SessionContainer`] and
//!   allocates ids with [`next_id`]. It is built per request from the caller's
//!   session and handed back with [`SessionPersistence::into_session`].
//!
//! # Modules
//!
//! - [`error`]: [`StoreError`] and [`StoreResult`]
//! - [`traits`]: the [`TodoStore`] trait
//! - [`alloc`]: max-plus-one id allocation
//! - [`container`]: [`SessionContainer`] and the in-memory [`MemorySession`]
//! - [`session`]: the session-backed [`SessionPersistence`]

pub mod alloc;
#[cfg(any(test, feature = "conformance"))]
pub mod conformance;
pub mod container;
pub mod error;
pub mod session;
pub mod traits;

pub use alloc::next_id;
pub use container::{MemorySession, SessionContainer, LISTS_KEY};
pub use error::{StoreError, StoreResult};
pub use session::SessionPersistence;
pub use traits::TodoStore;
