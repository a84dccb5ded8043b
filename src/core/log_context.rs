//! Request-scoped context values and field extraction
//!
//! This module provides:
//! - `ContextSource`: read-only key/value lookup supplied by the caller
//! - `LogContext`: a cheaply cloneable context bag
//! - `extract_fields`: turns configured context keys into entry fields

use super::field::{Field, FieldValue};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Read-only key/value lookup carried alongside a request
pub trait ContextSource {
    /// Value stored under `key`, if any
    fn value(&self, key: &str) -> Option<FieldValue>;
}

impl<T: ContextSource + ?Sized> ContextSource for &T {
    fn value(&self, key: &str) -> Option<FieldValue> {
        (**self).value(key)
    }
}

impl<T: ContextSource + ?Sized> ContextSource for Arc<T> {
    fn value(&self, key: &str) -> Option<FieldValue> {
        (**self).value(key)
    }
}

impl<V> ContextSource for HashMap<String, V>
where
    V: Clone + Into<FieldValue>,
{
    fn value(&self, key: &str) -> Option<FieldValue> {
        self.get(key).cloned().map(Into::into)
    }
}

impl<V> ContextSource for BTreeMap<String, V>
where
    V: Clone + Into<FieldValue>,
{
    fn value(&self, key: &str) -> Option<FieldValue> {
        self.get(key).cloned().map(Into::into)
    }
}

/// Context bag for request-scoped values
///
/// Clones share storage until one of them is modified.
///
/// # Example
///
/// ```
/// use ctx_logger::core::{ContextSource, LogContext};
///
/// let ctx = LogContext::new()
///     .with_value("tid", 123456)
///     .with_value("user", "alice");
///
/// assert_eq!(ctx.len(), 2);
/// assert!(ctx.value("tid").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogContext {
    values: Arc<HashMap<String, FieldValue>>,
}

impl LogContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a context with `key` set to `value`
    #[must_use]
    pub fn with_value<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    /// Set `key` to `value` in place
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Arc::make_mut(&mut self.values).insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        Arc::make_mut(&mut self.values).remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ContextSource for LogContext {
    fn value(&self, key: &str) -> Option<FieldValue> {
        self.values.get(key).cloned()
    }
}

/// Collect the configured keys present in `ctx`, in key order.
///
/// Absent keys and null values are skipped.
pub fn extract_fields<C>(ctx: &C, keys: &[String]) -> Vec<Field>
where
    C: ContextSource + ?Sized,
{
    let mut fields = Vec::with_capacity(keys.len() + 2);
    for key in keys {
        match ctx.value(key) {
            None | Some(FieldValue::Json(serde_json::Value::Null)) => {}
            Some(value) => fields.push(Field {
                key: key.clone(),
                value,
            }),
        }
    }
    fields
}
