//! SQLite implementation of [`QueryExecutor`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection};
use tracing::info;

use crate::error::{SqlError, SqlResult};
use crate::executor::{QueryExecutor, Row};

/// Schema applied on every open. Idempotent.
///
/// `complete` is stored as `'t'` / `'f'` text, the same representation a
/// text-protocol client sees for a boolean column.
const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS lists (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS todos (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    list_id  INTEGER NOT NULL REFERENCES lists (id) ON DELETE CASCADE,
    name     TEXT NOT NULL,
    complete TEXT NOT NULL DEFAULT 'f' CHECK (complete IN ('t', 'f'))
);

CREATE INDEX IF NOT EXISTS todos_list_id ON todos (list_id);
";

/// A single SQLite connection behind a mutex.
pub struct SqliteExecutor {
    conn: Mutex<Connection>,
}

impl SqliteExecutor {
    /// Open (or create) the database file at `path` and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> SqlResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened sqlite database");
        Self::init(conn)
    }

    /// A private in-memory database, gone when the executor is dropped.
    pub fn open_in_memory() -> SqlResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> SqlResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> SqlResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| SqlError::LockPoisoned)
    }
}

impl std::fmt::Debug for SqliteExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteExecutor").finish_non_exhaustive()
    }
}

/// Render a column value as text. NULL has no text form.
fn render(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(r) => Some(r.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    }
}

impl QueryExecutor for SqliteExecutor {
    fn query(&self, sql: &str, params: &[&str]) -> SqlResult<Vec<Row>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = HashMap::with_capacity(columns.len());
            for (index, column) in columns.iter().enumerate() {
                if let Some(text) = render(row.get_ref(index)?) {
                    values.insert(column.clone(), text);
                }
            }
            out.push(Row::new(values));
        }
        Ok(out)
    }

    fn execute(&self, sql: &str, params: &[&str]) -> SqlResult<u64> {
        let conn = self.lock()?;
        let affected = conn.execute(sql, params_from_iter(params.iter()))?;
        Ok(affected as u64)
    }
}
