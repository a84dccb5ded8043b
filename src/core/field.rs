//! Structured field values and their line encoding
//!
//! A field value is one of a closed set of shapes, chosen when the value is
//! attached to an entry:
//!
//! - [`FieldValue::Text`] and [`FieldValue::Bytes`]: embedded verbatim when
//!   they already look like a JSON object or array, otherwise quoted
//! - [`FieldValue::Display`]: the `Display` output of a value, always quoted
//! - [`FieldValue::Json`]: any `Serialize` value, embedded as raw JSON
//! - [`FieldValue::Dump`]: the `Debug` output of a value whose serialization
//!   failed, always quoted
//!
//! Keys and quoted values are written without escaping. Callers that log
//! untrusted text containing `"` get a malformed field section.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Value attached to the dangling key of an odd-length field list
pub const MISSING_VALUE: &str = "??? key or value missing";

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bytes(Vec<u8>),
    Display(String),
    Json(serde_json::Value),
    Dump(String),
}

impl FieldValue {
    /// Capture the `Display` form of a value (quoted on output)
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        FieldValue::Display(value.to_string())
    }

    /// Serialize a value to JSON, falling back to its `Debug` form
    pub fn json<T: Serialize + fmt::Debug + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => FieldValue::Json(json),
            Err(_) => FieldValue::Dump(format!("{:?}", value)),
        }
    }

    /// Whether the value had to fall back to a debug dump
    pub fn is_fallback(&self) -> bool {
        matches!(self, FieldValue::Dump(_))
    }
}

/// Plain string form, used when a value has to act as a key
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Display(s) | FieldValue::Dump(s) => f.write_str(s),
            FieldValue::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            FieldValue::Json(serde_json::Value::String(s)) => f.write_str(s),
            FieldValue::Json(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::Text(s.clone())
    }
}

impl From<Cow<'_, str>> for FieldValue {
    fn from(s: Cow<'_, str>) -> Self {
        FieldValue::Text(s.into_owned())
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        FieldValue::Text(c.to_string())
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(b: Vec<u8>) -> Self {
        FieldValue::Bytes(b)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(b: &[u8]) -> Self {
        FieldValue::Bytes(b.to_vec())
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        FieldValue::Json(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into)
            .unwrap_or(FieldValue::Json(serde_json::Value::Null))
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(v: $t) -> Self {
                    FieldValue::json(&v)
                }
            }
        )*
    };
}

impl_from_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool);

/// One named value attached to an entry
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Whether `s` is non-empty and wrapped in `{...}` or `[...]`
pub fn is_json_shaped(s: &[u8]) -> bool {
    match (s.first(), s.last()) {
        (Some(b'{'), Some(b'}')) | (Some(b'['), Some(b']')) => s.len() > 1,
        _ => false,
    }
}

/// Append `"key":<value>` to `buf`
pub fn encode_field(buf: &mut Vec<u8>, key: &str, value: &FieldValue) {
    buf.push(b'"');
    buf.extend_from_slice(key.as_bytes());
    buf.extend_from_slice(b"\":");

    match value {
        FieldValue::Text(s) => write_raw_or_quoted(buf, s.as_bytes()),
        FieldValue::Bytes(b) => write_raw_or_quoted(buf, b),
        FieldValue::Display(s) | FieldValue::Dump(s) => write_quoted(buf, s.as_bytes()),
        FieldValue::Json(v) => {
            let start = buf.len();
            if serde_json::to_writer(&mut *buf, v).is_err() {
                buf.truncate(start);
                write_quoted(buf, format!("{:?}", v).as_bytes());
            }
        }
    }
}

/// Append `{f1,f2,...}` to `buf` in field order
pub fn encode_fields(buf: &mut Vec<u8>, fields: &[Field]) {
    buf.push(b'{');
    for (i, field) in fields.iter().enumerate() {
        if i != 0 {
            buf.push(b',');
        }
        encode_field(buf, &field.key, &field.value);
    }
    buf.push(b'}');
}

fn write_raw_or_quoted(buf: &mut Vec<u8>, s: &[u8]) {
    if is_json_shaped(s) {
        buf.extend_from_slice(s);
    } else {
        write_quoted(buf, s);
    }
}

fn write_quoted(buf: &mut Vec<u8>, s: &[u8]) {
    buf.push(b'"');
    buf.extend_from_slice(s);
    buf.push(b'"');
}
