//! Session containers: per-client key/value state kept between requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key under which [`SessionPersistence`](crate::SessionPersistence) keeps the
/// list collection.
pub const LISTS_KEY: &str = "lists";

/// A string-keyed mapping that survives across one client's requests.
pub trait SessionContainer: Send + Sync {
    fn get(&self, key: &str) -> Option<&Value>;

    fn insert(&mut self, key: &str, value: Value);

    fn remove(&mut self, key: &str) -> Option<Value>;
}

/// A session held entirely in process memory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySession {
    values: HashMap<String, Value>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionContainer for MemorySession {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn insert(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }
}
