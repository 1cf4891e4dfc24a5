//! The [`QueryExecutor`] trait and the [`Row`] values it returns.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{SqlError, SqlResult};

/// Runs parameterised statements against a relational medium.
///
/// Parameters are positional (`?1`, `?2`, ...) and passed as text. Values come
/// back as text too; interpreting them is the caller's job.
pub trait QueryExecutor: Send + Sync {
    /// Run a statement that yields rows (a `SELECT`, or a write with
    /// `RETURNING`).
    fn query(&self, sql: &str, params: &[&str]) -> SqlResult<Vec<Row>>;

    /// Run a statement for its effect and return the number of affected rows.
    fn execute(&self, sql: &str, params: &[&str]) -> SqlResult<u64>;
}

/// One result row: column name to textual value. SQL NULLs are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    values: HashMap<String, String>,
}

impl Row {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// The raw text of `column`.
    pub fn get(&self, column: &str) -> SqlResult<&str> {
        self.values
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| SqlError::MissingColumn(column.to_string()))
    }

    /// Parse `column` with [`FromStr`].
    pub fn parse<T>(&self, column: &str) -> SqlResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.get(column)?;
        raw.parse().map_err(|e: T::Err| SqlError::Decode {
            column: column.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_parse() {
        let row: Row = [("id", "12"), ("name", "Groceries")].into_iter().collect();
        assert_eq!(row.get("name").unwrap(), "Groceries");
        assert_eq!(row.parse::<u64>("id").unwrap(), 12);
    }

    #[test]
    fn missing_column() {
        let row = Row::default();
        assert!(matches!(row.get("id"), Err(SqlError::MissingColumn(c)) if c == "id"));
    }

    #[test]
    fn parse_failure_reports_value() {
        let row: Row = [("id", "twelve")].into_iter().collect();
        let err = row.parse::<u64>("id").unwrap_err();
        assert!(matches!(err, SqlError::Decode { ref value, .. } if value == "twelve"));
    }
}
