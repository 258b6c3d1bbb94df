//! Absent-tolerant accessors over `serde_json::Value`
//!
//! Every read of the manifest goes through [`JsonExt`]. A missing key, a
//! `null`, or a value of the wrong shape all collapse to the same default
//! (empty slice, `None`, zero), so the extractors never probe keys ad hoc.

use serde_json::Value;

/// Defaulting accessors for loosely-shaped JSON
pub trait JsonExt {
    /// Returns the array stored under `key`, or an empty slice
    fn array_field(&self, key: &str) -> &[Value];

    /// Returns the string stored under `key`, if it is a string
    fn str_field(&self, key: &str) -> Option<&str>;

    /// Returns true if `key` is present on an object (even when `null`)
    fn has_field(&self, key: &str) -> bool;

    /// Returns the element at `index` of an array, if any
    fn element(&self, index: usize) -> Option<&Value>;

    /// Returns the value as `f64`, or `0.0`
    fn number_or_zero(&self) -> f64;

    /// Returns the value as an array slice, or an empty slice
    fn as_slice(&self) -> &[Value];
}

impl JsonExt for Value {
    fn array_field(&self, key: &str) -> &[Value] {
        self.get(key).map(JsonExt::as_slice).unwrap_or(&[])
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn has_field(&self, key: &str) -> bool {
        self.as_object().is_some_and(|obj| obj.contains_key(key))
    }

    fn element(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }

    fn number_or_zero(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }

    fn as_slice(&self) -> &[Value] {
        self.as_array().map(Vec::as_slice).unwrap_or(&[])
    }
}
