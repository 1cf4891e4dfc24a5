use std::sync::Arc;

use todo_sql::{DatabasePersistence, SqliteExecutor};
use todo_store::TodoStore;

use crate::error::{ServerError, ServerResult};
use crate::session::{SessionId, SessionRegistry};

/// Shared handler state: which store backs the API.
#[derive(Clone, Debug)]
pub struct AppState {
    backend: Backend,
}

#[derive(Clone, Debug)]
enum Backend {
    Session(Arc<SessionRegistry>),
    Database(Arc<DatabasePersistence<SqliteExecutor>>),
}

impl AppState {
    /// Each client gets its own lists, kept in memory.
    pub fn session() -> Self {
        Self::with_registry(SessionRegistry::new())
    }

    pub fn with_registry(registry: SessionRegistry) -> Self {
        Self {
            backend: Backend::Session(Arc::new(registry)),
        }
    }

    /// All clients share one database.
    pub fn database(db: DatabasePersistence<SqliteExecutor>) -> Self {
        Self {
            backend: Backend::Database(Arc::new(db)),
        }
    }

    pub fn is_session(&self) -> bool {
        matches!(self.backend, Backend::Session(_))
    }

    /// The session registry, in session mode.
    pub fn sessions(&self) -> Option<&SessionRegistry> {
        match &self.backend {
            Backend::Session(registry) => Some(registry),
            Backend::Database(_) => None,
        }
    }

    /// Run `f` against the store serving `session`.
    ///
    /// Database calls block, so they run on tokio's blocking pool.
    pub async fn with_store<T, F>(&self, session: Option<SessionId>, f: F) -> ServerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn TodoStore) -> ServerResult<T> + Send + 'static,
    {
        match &self.backend {
            Backend::Session(registry) => {
                let id = session
                    .ok_or_else(|| ServerError::Internal("request carries no session".into()))?;
                registry.with_session(id, f).await
            }
            Backend::Database(db) => {
                let db = Arc::clone(db);
                tokio::task::spawn_blocking(move || f(&*db))
                    .await
                    .map_err(|e| ServerError::Internal(format!("store task failed: {e}")))?
            }
        }
    }
}
