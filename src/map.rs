//! Ordered field map for building records.
//!
//! [`FieldMap`] wraps an [`IndexMap`] so a record's fields keep their
//! declaration order. That order is the order fields are rendered in and the
//! order an evaluated record comes back with.
//!
//! ## Examples
//!
//! ```rust
//! use litexpr::{FieldMap, Value};
//!
//! let mut fields = FieldMap::new();
//! fields.insert("y", Value::from("b"));
//! fields.insert("x", Value::from(1.0));
//!
//! let names: Vec<_> = fields.keys().cloned().collect();
//! assert_eq!(names, vec!["y", "x"]);
//! ```

use crate::Value;
use indexmap::IndexMap;

/// An ordered map from field name to [`Value`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMap(IndexMap<String, Value>);

impl FieldMap {
    #[must_use]
    pub fn new() -> Self {
        FieldMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FieldMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field, keeping the original position if the name already exists.
    ///
    /// ```rust
    /// use litexpr::{FieldMap, Value};
    ///
    /// let mut map = FieldMap::new();
    /// assert!(map.insert("key", Value::from(1.0)).is_none());
    /// assert!(map.insert("key", Value::from(2.0)).is_some());
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert<K: Into<String>>(&mut self, name: K, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Removes a field, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.shift_remove(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in declaration order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Value)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        FieldMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_keeps_order() {
        let mut map: FieldMap = vec![
            ("a".to_string(), Value::from(1.0)),
            ("b".to_string(), Value::from(2.0)),
            ("c".to_string(), Value::from(3.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.remove("b"), Some(Value::from(2.0)));
        let names: Vec<_> = map.keys().cloned().collect();
        assert_eq!(names, vec!["a", "c"]);
    }
}
