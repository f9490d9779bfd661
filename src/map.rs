//! Ordered key/value pairs for SEDF objects.
//!
//! This module provides [`SedfMap`], the body of an object atom. It keeps pairs in
//! source order and keeps every pair, so an object such as `(:a 1 :a 2)` round-trips
//! through the parser without losing either value.
//!
//! ## Examples
//!
//! ```rust
//! use serde_sedf::{SedfMap, Value};
//!
//! let mut map = SedfMap::new();
//! map.push("name".to_string(), Value::from("Ada"));
//! map.push("age".to_string(), Value::from(36));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Ada"));
//! ```

use crate::Value;
use std::collections::TryReserveError;

/// An ordered sequence of key/value pairs.
///
/// Lookups return the first pair with a matching key.
///
/// # Examples
///
/// ```rust
/// use serde_sedf::{SedfMap, Value};
///
/// let map: SedfMap = vec![
///     ("first".to_string(), Value::from(1)),
///     ("second".to_string(), Value::from(2)),
/// ]
/// .into_iter()
/// .collect();
///
/// // Iteration maintains source order
/// let keys: Vec<_> = map.keys().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SedfMap(Vec<(String, Value)>);

impl SedfMap {
    /// Creates an empty `SedfMap`.
    #[must_use]
    pub fn new() -> Self {
        SedfMap(Vec::new())
    }

    /// Creates an empty `SedfMap` with room for `capacity` pairs.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SedfMap(Vec::with_capacity(capacity))
    }

    /// Tries to reserve room for `additional` more pairs.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.0.try_reserve(additional)
    }

    /// Appends a pair, keeping any earlier pair with the same key.
    pub fn push(&mut self, key: String, value: Value) {
        self.0.push((key, value));
    }

    /// Returns the value of the first pair whose key is `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sedf::{SedfMap, Value};
    ///
    /// let mut map = SedfMap::new();
    /// map.push("key".to_string(), Value::from(1));
    /// map.push("key".to_string(), Value::from(2));
    /// assert_eq!(map.get("key").and_then(|v| v.as_i64()), Some(1));
    /// assert_eq!(map.get("missing"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns every value stored under `key`, in source order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if some pair has the key `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Returns an iterator over the values, in source order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.iter().map(|(_, v)| v)
    }

    /// Returns an iterator over the pairs, in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl IntoIterator for SedfMap {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Value)> for SedfMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        SedfMap(iter.into_iter().collect())
    }
}

impl From<Vec<(String, Value)>> for SedfMap {
    fn from(pairs: Vec<(String, Value)>) -> Self {
        SedfMap(pairs)
    }
}
