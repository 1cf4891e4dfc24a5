use todo_types::{ListId, TodoId};

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No list with this id exists.
    #[error("list not found: {list_id}")]
    ListNotFound { list_id: ListId },

    /// The list exists but holds no todo with this id.
    #[error("todo {todo_id} not found in list {list_id}")]
    TodoNotFound { list_id: ListId, todo_id: TodoId },

    /// The session payload could not be read or written.
    #[error("session error: {0}")]
    Session(String),

    /// The underlying storage medium failed or rejected a statement.
    #[error("storage medium error: {0}")]
    Medium(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap a medium-specific error.
    pub fn medium(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Medium(Box::new(err))
    }

    /// Returns `true` for either flavour of not-found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ListNotFound { .. } | Self::TodoNotFound { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classification() {
        assert!(StoreError::ListNotFound { list_id: ListId::new(1) }.is_not_found());
        assert!(StoreError::TodoNotFound {
            list_id: ListId::new(1),
            todo_id: TodoId::new(2),
        }
        .is_not_found());
        assert!(!StoreError::Session("bad".into()).is_not_found());
    }

    #[test]
    fn messages() {
        let err = StoreError::TodoNotFound {
            list_id: ListId::new(1),
            todo_id: TodoId::new(5),
        };
        assert_eq!(err.to_string(), "todo 5 not found in list 1");

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = StoreError::medium(io);
        assert_eq!(err.to_string(), "storage medium error: disk gone");
        assert!(std::error::Error::source(&err).is_some());
    }
}
