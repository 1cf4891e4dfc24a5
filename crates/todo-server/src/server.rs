use tokio::net::TcpListener;

use todo_sql::DatabasePersistence;

use crate::config::{ServerConfig, StorageKind};
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::session::SessionRegistry;
use crate::state::AppState;

/// Todo-list HTTP server.
pub struct TodoServer {
    config: ServerConfig,
}

impl TodoServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open the configured store.
    pub fn state(&self) -> ServerResult<AppState> {
        match self.config.storage {
            StorageKind::Session => Ok(AppState::with_registry(SessionRegistry::with_limits(
                self.config.max_sessions,
                self.config.session_idle(),
            ))),
            StorageKind::Database => {
                let db = DatabasePersistence::open(&self.config.database_path)?;
                Ok(AppState::database(db))
            }
        }
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        Ok(build_router(self.state()?))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let state = self.state()?;
        let app = build_router(state.clone());
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        if state.is_session() {
            tracing::info!(
                storage = %self.config.storage,
                "todo server listening on {}",
                self.config.bind_addr
            );
        } else {
            tracing::info!(
                storage = %self.config.storage,
                database = %self.config.database_path.display(),
                "todo server listening on {}",
                self.config.bind_addr
            );
        }
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = TodoServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:4567".parse().unwrap());
    }

    #[test]
    fn session_router_builds() {
        let server = TodoServer::new(ServerConfig::default());
        assert!(server.state().unwrap().is_session());
        let _router = server.router().unwrap();
    }

    #[test]
    fn database_state_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");
        let server = TodoServer::new(ServerConfig {
            storage: StorageKind::Database,
            database_path: path.clone(),
            ..ServerConfig::default()
        });
        let state = server.state().unwrap();
        assert!(!state.is_session());
        assert!(path.exists());
    }
}
