//! HTTP API for the todo-list manager.
//!
//! Serves lists and todos as JSON over one of two stores: per-client session
//! memory, or a SQLite database shared by everyone. Handlers validate input,
//! call into [`TodoStore`](todo_store::TodoStore) and answer with the derived
//! views from `todo_view`.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod session;
pub mod state;

pub use config::{ServerConfig, StorageKind};
pub use error::{ServerError, ServerResult};
pub use server::TodoServer;
pub use session::{ClientSession, SessionId, SessionRegistry, SESSION_COOKIE};
pub use state::AppState;
