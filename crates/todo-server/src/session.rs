//! Cookie-keyed session registry for the session-backed store.
//!
//! In session mode every response carries a session cookie. A request without
//! one (or with a value that is not a UUID) gets a fresh id. The registry only
//! keeps a session once a request has stored something in it, forgets sessions
//! that sit idle too long, and evicts the least recently used one when full.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::time::{Duration, Instant};

use axum::async_trait;
use axum::extract::{FromRequestParts, Request};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::Mutex;
use uuid::Uuid;

use todo_store::{MemorySession, SessionPersistence, TodoStore};

use crate::error::ServerResult;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "todos_session";

/// Sessions kept before the least recently used one is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// How long an untouched session survives.
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(24 * 60 * 60);

/// Identifies one client's session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The session attached by [`session_cookie`], if that layer is installed.
#[derive(Clone, Copy, Debug)]
pub struct ClientSession(pub Option<SessionId>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ClientSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<SessionId>().copied()))
    }
}

/// Find our session cookie in a `Cookie` header value.
fn session_from_cookie_header(header: &str) -> Option<SessionId> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value))
}

/// Middleware: attach a [`SessionId`] to the request, minting one if needed,
/// and hand new ids back to the client.
pub async fn session_cookie(mut request: Request, next: Next) -> Response {
    let existing = request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(session_from_cookie_header);

    let (id, fresh) = match existing {
        Some(id) => (id, false),
        None => (SessionId::generate(), true),
    };
    request.extensions_mut().insert(id);

    let mut response = next.run(request).await;
    if fresh {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(err) => tracing::warn!(error = %err, "could not encode session cookie"),
        }
    }
    response
}

#[derive(Debug)]
struct Entry {
    session: MemorySession,
    last_seen: Instant,
}

/// Live sessions, held in process memory.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, Entry>>,
    max_sessions: usize,
    idle: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding at most `max_sessions` sessions, each dropped after
    /// `idle` without a request.
    pub fn with_limits(max_sessions: usize, idle: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
            idle,
        }
    }

    /// Run `f` against a store over session `id`.
    ///
    /// The registry lock is held until `f` returns, so requests never
    /// interleave their writes. An unknown id is only registered if `f` leaves
    /// something in its session.
    pub async fn with_session<T>(
        &self,
        id: SessionId,
        f: impl FnOnce(&dyn TodoStore) -> ServerResult<T>,
    ) -> ServerResult<T> {
        let mut sessions = self.sessions.lock().await;
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.idle);
        if sessions.len() < before {
            tracing::debug!(expired = before - sessions.len(), "expired idle sessions");
        }

        let known = sessions.remove(&id);
        let fresh = known.is_none();
        let store = SessionPersistence::new(known.map(|entry| entry.session).unwrap_or_default());
        let out = f(&store);
        let session = store.into_session();

        if fresh && session == empty_session() {
            return out;
        }
        if sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                tracing::debug!(session = %oldest, "evicted least recently used session");
            }
        }
        sessions.insert(id, Entry { session, last_seen: now });
        out
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

/// What a brand-new session looks like after a store has been opened over it.
fn empty_session() -> MemorySession {
    SessionPersistence::new(MemorySession::new()).into_session()
}
