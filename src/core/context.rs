//! Context values attached to records
//!
//! This module provides:
//! - `FieldValue`: an opaque scalar carried in record data and context
//! - `Context`: a logger-scoped, shareable key-value map

use parking_lot::RwLock;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Value type for record data and context fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Logger-scoped context map
///
/// `Context` is a handle: cloning it yields another handle to the *same*
/// map, so writes through one clone are visible through all of them. Records
/// capture the handle, not a copy of the fields. Use [`Context::detached`] to
/// get an independent map with the same contents.
///
/// # Example
///
/// ```
/// use namedlog::Context;
///
/// let ctx = Context::new();
/// let alias = ctx.clone();
/// alias.set("env", "prod");
///
/// assert_eq!(ctx.len(), 1);
/// assert!(ctx.shares_with(&alias));
/// ```
#[derive(Clone, Default)]
pub struct Context {
    fields: Arc<RwLock<HashMap<String, FieldValue>>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, overwriting any previous value for the key
    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.write().insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<FieldValue> {
        self.fields.read().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<FieldValue> {
        self.fields.write().remove(key)
    }

    pub fn clear(&self) {
        self.fields.write().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fields.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.read().len()
    }

    /// Get a clone of all fields
    pub fn snapshot(&self) -> HashMap<String, FieldValue> {
        self.fields.read().clone()
    }

    /// Independent map holding a copy of the current fields
    pub fn detached(&self) -> Self {
        Self::from(self.snapshot())
    }

    /// True when both handles point at the same underlying map
    pub fn shares_with(&self, other: &Context) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    /// Format fields as `key=value` pairs sorted by key
    pub fn format_fields(&self) -> String {
        let fields = self.fields.read();
        let mut keys: Vec<&String> = fields.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|k| format!("{}={}", k, fields[k]))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<HashMap<String, FieldValue>> for Context {
    fn from(fields: HashMap<String, FieldValue>) -> Self {
        Self {
            fields: Arc::new(RwLock::new(fields)),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.read().iter()).finish()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.read().serialize(serializer)
    }
}
