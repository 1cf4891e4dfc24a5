//! Typed identifiers for lists and todos.
//!
//! Both are plain integers on the wire and in storage, but they live in
//! different scopes: a [`ListId`] is unique across all lists, a [`TodoId`] is
//! only unique within its parent list. Keeping them as separate types means a
//! todo id can never be passed where a list id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of a [`TodoList`](crate::TodoList), unique across all lists.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(u64);

impl ListId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListId({})", self.0)
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ListId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for ListId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError::IdParse {
                what: "list",
                input: s.to_string(),
            })
    }
}

/// Identifier of a [`Todo`](crate::Todo), unique only within its parent list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TodoId({})", self.0)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TodoId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for TodoId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError::IdParse {
                what: "todo",
                input: s.to_string(),
            })
    }
}

/// Anything that carries an integer identifier within some collection.
///
/// Id allocation only needs the raw value; the associated type lets the
/// allocator hand back an id of the right kind.
pub trait Entity {
    type Id: From<u64> + Copy;

    /// The raw integer id of this entity.
    fn raw_id(&self) -> u64;
}
