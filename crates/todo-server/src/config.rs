use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};
use crate::session::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE};

/// Where lists are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Per-client memory keyed by the session cookie. Lost on restart.
    #[default]
    Session,
    /// A SQLite database file shared by all clients.
    Database,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => write!(f, "session"),
            Self::Database => write!(f, "database"),
        }
    }
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "session" => Ok(Self::Session),
            "database" => Ok(Self::Database),
            other => Err(format!("unknown storage kind {other:?} (expected session or database)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageKind,
    /// Only read when `storage` is `database`.
    pub database_path: PathBuf,
    /// Session mode: sessions kept before the least recently used is evicted.
    pub max_sessions: usize,
    /// Session mode: seconds an untouched session survives.
    pub session_idle_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4567)),
            storage: StorageKind::Session,
            database_path: PathBuf::from("todos.db"),
            max_sessions: DEFAULT_MAX_SESSIONS,
            session_idle_secs: DEFAULT_SESSION_IDLE.as_secs(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:4567".parse::<SocketAddr>().unwrap());
        assert_eq!(c.storage, StorageKind::Session);
        assert_eq!(c.database_path, PathBuf::from("todos.db"));
        assert_eq!(c.max_sessions, DEFAULT_MAX_SESSIONS);
        assert_eq!(c.session_idle(), DEFAULT_SESSION_IDLE);
    }

    #[test]
    fn session_limits_from_toml() {
        let c = ServerConfig::from_toml_str("max_sessions = 50\nsession_idle_secs = 600\n").unwrap();
        assert_eq!(c.max_sessions, 50);
        assert_eq!(c.session_idle(), Duration::from_secs(600));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str("storage = \"database\"\n").unwrap();
        assert_eq!(c.storage, StorageKind::Database);
        assert_eq!(c.bind_addr, ServerConfig::default().bind_addr);
    }

    #[test]
    fn full_toml() {
        let c = ServerConfig::from_toml_str(
            r#"
            bind_addr = "0.0.0.0:8080"
            storage = "database"
            database_path = "/var/lib/todos.db"
            "#,
        )
        .unwrap();
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.database_path, PathBuf::from("/var/lib/todos.db"));
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = ServerConfig::from_toml_str("storage = \"cloud\"").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.toml");
        std::fs::write(&path, "bind_addr = \"127.0.0.1:9000\"\n").unwrap();
        let c = ServerConfig::load(&path).unwrap();
        assert_eq!(c.bind_addr.port(), 9000);
    }

    #[test]
    fn storage_kind_from_str() {
        assert_eq!("session".parse::<StorageKind>().unwrap(), StorageKind::Session);
        assert_eq!("database".parse::<StorageKind>().unwrap(), StorageKind::Database);
        assert!("memory".parse::<StorageKind>().is_err());
    }
}
