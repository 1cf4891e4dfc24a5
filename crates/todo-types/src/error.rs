//! Validation errors raised by callers before they touch a store.

use std::fmt;

use thiserror::Error;

/// Which kind of entity a name belongs to. Only used to phrase messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameKind {
    List,
    Todo,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::List => write!(f, "List name"),
            NameKind::Todo => write!(f, "Todo"),
        }
    }
}

/// Errors produced while validating user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The trimmed name is empty or longer than the allowed maximum.
    #[error("{kind} must be between 1 and 100 characters.")]
    NameLength { kind: NameKind, length: usize },

    /// Another list already carries this name.
    #[error("List name must be unique.")]
    DuplicateListName { name: String },

    /// An identifier could not be parsed from text.
    #[error("invalid {what} id: {input:?}")]
    IdParse { what: &'static str, input: String },
}

/// Convenience type alias for validation results.
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_messages_name_the_entity() {
        let list = ValidationError::NameLength { kind: NameKind::List, length: 0 };
        assert_eq!(list.to_string(), "List name must be between 1 and 100 characters.");

        let todo = ValidationError::NameLength { kind: NameKind::Todo, length: 101 };
        assert_eq!(todo.to_string(), "Todo must be between 1 and 100 characters.");
    }

    #[test]
    fn duplicate_message() {
        let err = ValidationError::DuplicateListName { name: "Groceries".into() };
        assert_eq!(err.to_string(), "List name must be unique.");
    }
}
