use todo_store::StoreError;

/// Errors from the relational medium.
#[derive(Debug, thiserror::Error)]
pub enum SqlError {
    /// The SQLite driver rejected a statement or failed to run it.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A row lacks a column the store expected (or it was NULL).
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A column value could not be converted to the expected type.
    #[error("cannot decode column {column} value {value:?}: {reason}")]
    Decode {
        column: String,
        value: String,
        reason: String,
    },

    /// The connection mutex was poisoned by a panicking holder.
    #[error("connection lock poisoned")]
    LockPoisoned,
}

/// Result alias for executor operations.
pub type SqlResult<T> = Result<T, SqlError>;

impl From<SqlError> for StoreError {
    fn from(err: SqlError) -> Self {
        StoreError::medium(err)
    }
}
