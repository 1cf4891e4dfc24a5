//! Relational storage for the todo-list manager.
//!
//! The durable store never talks to a database driver directly. It goes
//! through a [`QueryExecutor`], which runs one parameterised statement and
//! returns rows as column-name to text mappings, the way a text-protocol
//! client library would. Ids come from the database's own auto-increment.
//!
//! # Storage Backends
//!
//! - [`SqliteExecutor`] -- rusqlite with a bundled SQLite, file or in-memory
//!
//! # Design Rules
//!
//! 1. Each store operation issues a single statement. A second, read-only
//!    statement is only issued when the first one affected no rows and the
//!    store has to tell a missing list from a missing todo.
//! 2. No multi-statement transactions. Cascading deletes are left to the
//!    schema (`ON DELETE CASCADE`).
//! 3. Booleans travel as `"t"` / `"f"` in both directions and are converted by
//!    [`DatabasePersistence`], never by the executor or the caller.
//! 4. Every statement is logged with its parameters at debug level.

pub mod database;
pub mod error;
pub mod executor;
pub mod sqlite;

pub use database::DatabasePersistence;
pub use error::{SqlError, SqlResult};
pub use executor::{QueryExecutor, Row};
pub use sqlite::SqliteExecutor;
