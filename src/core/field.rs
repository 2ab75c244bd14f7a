//! Structured key/value fields attached to records and loggers

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// A deferred field value, computed only when a handler renders the record.
#[derive(Clone)]
pub struct LazyValue(Arc<dyn Fn() -> FieldValue + Send + Sync>);

impl LazyValue {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> FieldValue + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn evaluate(&self) -> FieldValue {
        (self.0)()
    }
}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LazyValue(..)")
    }
}

/// Value type for structured logging fields
#[derive(Debug, Clone)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Null,
    /// Arbitrary structured data, rendered as nested JSON.
    Json(serde_json::Value),
    /// Nested fields under one key.
    Group(Vec<Field>),
    Lazy(LazyValue),
}

impl FieldValue {
    /// Resolve lazy values; every other variant is borrowed unchanged.
    ///
    /// A lazy value producing another lazy value is resolved repeatedly.
    pub fn resolve(&self) -> Cow<'_, FieldValue> {
        match self {
            FieldValue::Lazy(lazy) => {
                let mut value = lazy.evaluate();
                while let FieldValue::Lazy(inner) = value {
                    value = inner.evaluate();
                }
                Cow::Owned(value)
            }
            other => Cow::Borrowed(other),
        }
    }

    /// Whether the value renders as a nested structure rather than a scalar.
    pub fn is_complex(&self) -> bool {
        match self {
            FieldValue::Group(_) => true,
            FieldValue::Json(value) => value.is_object() || value.is_array(),
            _ => false,
        }
    }

    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Json(value) => value.clone(),
            FieldValue::Group(fields) => {
                let mut map = serde_json::Map::with_capacity(fields.len());
                for field in fields {
                    map.insert(field.key.clone(), field.value.resolve().to_json_value());
                }
                serde_json::Value::Object(map)
            }
            FieldValue::Lazy(lazy) => lazy.evaluate().to_json_value(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
            FieldValue::Json(serde_json::Value::String(s)) => write!(f, "{}", s),
            FieldValue::Json(_) | FieldValue::Group(_) => write!(f, "{}", self.to_json_value()),
            FieldValue::Lazy(lazy) => write!(f, "{}", lazy.evaluate()),
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

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::Uint(u)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::Uint(u64::from(u))
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::Json(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// One structured key/value attribute.
#[derive(Debug, Clone)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// An `error` field carrying the error's display text.
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self::new("error", err.to_string())
    }

    /// A field holding any serializable value.
    ///
    /// Values that fail to serialize are recorded as their error text.
    pub fn any<K, T>(key: K, value: &T) -> Self
    where
        K: Into<String>,
        T: Serialize + ?Sized,
    {
        let value = match serde_json::to_value(value) {
            Ok(json) => FieldValue::Json(json),
            Err(err) => FieldValue::String(format!("!serialize: {}", err)),
        };
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn duration<K: Into<String>>(key: K, value: Duration) -> Self {
        Self::new(key, format!("{:?}", value))
    }

    pub fn group<K: Into<String>>(key: K, fields: Vec<Field>) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Group(fields),
        }
    }

    /// A field whose value is produced on demand by `f`.
    ///
    /// `f` runs only if a handler actually renders the record.
    pub fn lazy<K, F>(key: K, f: F) -> Self
    where
        K: Into<String>,
        F: Fn() -> FieldValue + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            value: FieldValue::Lazy(LazyValue::new(f)),
        }
    }

    /// A copy of this field with `prefix` prepended to the key.
    pub fn prefixed(&self, prefix: &str) -> Self {
        if prefix.is_empty() {
            return self.clone();
        }
        Self {
            key: format!("{}{}", prefix, self.key),
            value: self.value.clone(),
        }
    }
}

impl<K, V> From<(K, V)> for Field
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from((key, value): (K, V)) -> Self {
        Field::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_conversions() {
        assert!(matches!(Field::new("a", 1).value, FieldValue::Int(1)));
        assert!(matches!(Field::new("a", 1u64).value, FieldValue::Uint(1)));
        assert!(matches!(Field::new("a", true).value, FieldValue::Bool(true)));
        assert!(matches!(Field::new("a", None::<i64>).value, FieldValue::Null));
        assert!(matches!(Field::new("a", "x").value, FieldValue::String(ref s) if s == "x"));
    }

    #[test]
    fn test_lazy_evaluated_on_resolve_only() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let field = Field::lazy("expensive", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            FieldValue::Int(7)
        });

        let cloned = field.clone();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(matches!(cloned.value.resolve().as_ref(), FieldValue::Int(7)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_group_to_json() {
        let field = Field::group(
            "req",
            vec![Field::new("method", "GET"), Field::new("status", 200)],
        );
        assert!(field.value.is_complex());
        assert_eq!(
            field.value.to_json_value().to_string(),
            r#"{"method":"GET","status":200}"#
        );
    }

    #[test]
    fn test_any_serializes() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let field = Field::any("point", &Point { x: 1, y: 2 });
        assert_eq!(field.value.to_string(), r#"{"x":1,"y":2}"#);
    }

    #[test]
    fn test_error_field() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "network error");
        let field = Field::error(&err);
        assert_eq!(field.key, "error");
        assert_eq!(field.value.to_string(), "network error");
    }

    #[test]
    fn test_prefixed() {
        let field = Field::new("id", 5).prefixed("db.");
        assert_eq!(field.key, "db.id");
    }
}
