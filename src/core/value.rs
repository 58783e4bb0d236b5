//! Typed attribute values carried by records and handlers

use chrono::{DateTime, FixedOffset, Local, Utc};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Value type for structured logging fields
#[derive(Clone)]
pub enum Value {
    String(String),
    Time(DateTime<FixedOffset>),
    /// Ordered sub-list of attributes; groups may nest
    Group(Vec<Attr>),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    /// Anything else, rendered through its `Display` impl
    Any(Arc<dyn fmt::Display + Send + Sync>),
}

impl Value {
    /// Wrap an arbitrary displayable value
    pub fn any<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Value::Any(Arc::new(value))
    }

    /// True for a group with nothing to render: no members, or only
    /// members that are themselves empty groups
    pub fn is_empty_group(&self) -> bool {
        match self {
            Value::Group(attrs) => attrs.iter().all(|a| a.value.is_empty_group()),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Time(t) => f.debug_tuple("Time").field(t).finish(),
            Value::Group(attrs) => f.debug_tuple("Group").field(attrs).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Value::Float(fl) => f.debug_tuple("Float").field(fl).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Duration(d) => f.debug_tuple("Duration").field(d).finish(),
            Value::Any(v) => f.debug_tuple("Any").field(&v.to_string()).finish(),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint(u64::from(u))
    }
}

impl From<u16> for Value {
    fn from(u: u16) -> Self {
        Value::Uint(u64::from(u))
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::Uint(u as u64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Value::Time(t)
    }
}

impl From<DateTime<Local>> for Value {
    fn from(t: DateTime<Local>) -> Self {
        Value::Time(t.fixed_offset())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t.fixed_offset())
    }
}

impl From<Vec<Attr>> for Value {
    fn from(attrs: Vec<Attr>) -> Self {
        Value::Group(attrs)
    }
}

/// A key/value pair attached to a record or bound to a handler
#[derive(Debug, Clone)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a group attribute from its members
    pub fn group<K, I>(key: K, attrs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = Attr>,
    {
        Self {
            key: key.into(),
            value: Value::Group(attrs.into_iter().collect()),
        }
    }
}

impl<K, V> From<(K, V)> for Attr
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from((key, value): (K, V)) -> Self {
        Attr::new(key, value)
    }
}
