//! Name validation for lists and todos.
//!
//! Rules:
//! - Surrounding whitespace is trimmed before any check
//! - The trimmed name must be 1 to 100 characters long (Unicode scalar values)
//! - List names must additionally be unique among all lists
//!
//! Stores take a [`Name`], so the length rule cannot be bypassed. Uniqueness
//! depends on the current contents of a store and is checked by the caller
//! with [`validate_list_name`] / [`validate_list_rename`].

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::entity::TodoList;
use crate::error::{NameKind, Result, ValidationError};
use crate::id::ListId;

/// Maximum length of a list or todo name, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// A trimmed, length-checked list or todo name.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Trim `raw` and check its length for the given kind of entity.
    pub fn parse(kind: NameKind, raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let length = trimmed.chars().count();
        if !(1..=MAX_NAME_CHARS).contains(&length) {
            return Err(ValidationError::NameLength { kind, length });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Name {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self> {
        // Serialized names carry no kind; todo rules are the same length rules.
        Self::parse(NameKind::Todo, &raw)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

/// Validate a todo name.
pub fn validate_todo_name(raw: &str) -> Result<Name> {
    Name::parse(NameKind::Todo, raw)
}

/// Validate the name of a new list against the lists that already exist.
///
/// # Examples
///
/// ```
/// use todo_types::{validate_list_name, ValidationError};
///
/// assert!(validate_list_name("Groceries", &[]).is_ok());
/// assert!(matches!(
///     validate_list_name("   ", &[]),
///     Err(ValidationError::NameLength { .. })
/// ));
/// ```
pub fn validate_list_name(raw: &str, existing: &[TodoList]) -> Result<Name> {
    let name = Name::parse(NameKind::List, raw)?;
    if existing.iter().any(|list| list.name == name.as_str()) {
        return Err(ValidationError::DuplicateListName {
            name: name.into_string(),
        });
    }
    Ok(name)
}

/// Validate a new name for list `id`.
///
/// Same as [`validate_list_name`], except that the list being renamed does not
/// collide with itself, so re-submitting the current name is accepted.
pub fn validate_list_rename(raw: &str, id: ListId, existing: &[TodoList]) -> Result<Name> {
    let name = Name::parse(NameKind::List, raw)?;
    if existing
        .iter()
        .any(|list| list.id != id && list.name == name.as_str())
    {
        return Err(ValidationError::DuplicateListName {
            name: name.into_string(),
        });
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(id: u64, name: &str) -> TodoList {
        TodoList::new(ListId::new(id), Name::parse(NameKind::List, name).unwrap())
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let name = validate_todo_name("  Milk \n").unwrap();
        assert_eq!(name.as_str(), "Milk");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(matches!(
            validate_todo_name(""),
            Err(ValidationError::NameLength { length: 0, .. })
        ));
        assert!(validate_todo_name(" \t ").is_err());
    }

    #[test]
    fn length_boundaries() {
        assert!(validate_todo_name(&"a".repeat(100)).is_ok());
        let err = validate_todo_name(&"a".repeat(101)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NameLength { kind: NameKind::Todo, length: 101 }
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 100 two-byte characters.
        assert!(validate_todo_name(&"é".repeat(100)).is_ok());
    }

    #[test]
    fn duplicate_list_name_is_rejected() {
        let lists = vec![list(1, "Groceries")];
        let err = validate_list_name("Groceries", &lists).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateListName { .. }));
        // Trimming happens before the comparison.
        assert!(validate_list_name(" Groceries ", &lists).is_err());
        assert!(validate_list_name("Chores", &lists).is_ok());
    }

    #[test]
    fn rename_to_own_name_is_allowed() {
        let lists = vec![list(1, "Groceries"), list(2, "Chores")];
        assert!(validate_list_rename("Groceries", ListId::new(1), &lists).is_ok());
        assert!(validate_list_rename("Chores", ListId::new(1), &lists).is_err());
    }

    #[test]
    fn deserializing_validates() {
        let ok: Name = serde_json::from_str("\"Milk\"").unwrap();
        assert_eq!(ok.as_str(), "Milk");
        assert!(serde_json::from_str::<Name>("\"\"").is_err());
    }
}
