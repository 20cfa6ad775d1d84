//! Bindable values.
//!
//! Every argument handed to a builder is converted once into a [`Value`]. The
//! interpolation engine and the drivers only ever see this closed set of
//! kinds, so encoding is a single exhaustive match.

use crate::builder::Builder;
use crate::error::{QlError, QlResult};
use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

/// A value bound to a placeholder.
#[derive(Clone, Default)]
pub enum Value {
    /// SQL `NULL`.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    /// A timestamp, normalized to UTC.
    Time(NaiveDateTime),
    Bytes(Vec<u8>),
    /// A sequence, rendered as `(a,b,...)` or expanded into `IN (?,?)`.
    List(Vec<Value>),
    /// A nested statement or expression, built with the outer dialect.
    Builder(Arc<dyn Builder>),
    /// A value resolved lazily when the statement is interpolated or sent.
    Valuer(Arc<dyn Valuer>),
}

/// A value that knows how to produce its own [`Value`].
///
/// Resolution happens right before literal encoding, so errors surface from
/// interpolation or execution, not from the builder call.
pub trait Valuer: fmt::Debug + Send + Sync {
    fn value(&self) -> QlResult<Value>;
}

impl Value {
    /// Wrap a nested builder.
    pub fn builder(builder: impl Builder + 'static) -> Self {
        Value::Builder(Arc::new(builder))
    }

    /// Wrap a lazily-resolved value.
    pub fn valuer(valuer: impl Valuer + 'static) -> Self {
        Value::Valuer(Arc::new(valuer))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the value kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Time(_) => "time",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Builder(_) => "builder",
            Value::Valuer(_) => "valuer",
        }
    }

    /// Resolve `Valuer` values (recursively, including list elements).
    ///
    /// Nested builders are left untouched.
    pub fn resolve(&self) -> QlResult<Value> {
        match self {
            Value::Valuer(v) => v.value()?.resolve(),
            Value::List(items) => items
                .iter()
                .map(Value::resolve)
                .collect::<QlResult<Vec<_>>>()
                .map(Value::List),
            other => Ok(other.clone()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Value::Time(v) => f.debug_tuple("Time").field(v).finish(),
            Value::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
            Value::List(v) => f.debug_tuple("List").field(v).finish(),
            Value::Builder(b) => f.debug_tuple("Builder").field(b).finish(),
            Value::Valuer(v) => f.debug_tuple("Valuer").field(v).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Builder(a), Value::Builder(b)) => Arc::ptr_eq(a, b),
            (Value::Valuer(a), Value::Valuer(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// ── Conversions ──

macro_rules! impl_from_int {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64, isize, u8, u16, u32);
impl_from_int!(UInt as u64: u64, usize);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Time(v)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(v: DateTime<Tz>) -> Self {
        Value::Time(v.naive_utc())
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Value::Text(v.hyphenated().to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Text(v.to_string())
    }
}

#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for Value {
    fn from(v: rust_decimal::Decimal) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Clone + Into<Value>> From<&T> for Value {
    fn from(v: &T) -> Self {
        v.clone().into()
    }
}

impl<T: Into<Value>> From<Box<T>> for Value {
    fn from(v: Box<T>) -> Self {
        (*v).into()
    }
}

impl From<Arc<dyn Builder>> for Value {
    fn from(v: Arc<dyn Builder>) -> Self {
        Value::Builder(v)
    }
}

impl From<Arc<dyn Valuer>> for Value {
    fn from(v: Arc<dyn Valuer>) -> Self {
        Value::Valuer(v)
    }
}

// `Vec<u8>` is bytes, so lists are implemented per element type.
macro_rules! impl_from_list {
    ($($t:ty),*) => {
        $(
            impl From<Vec<$t>> for Value {
                fn from(v: Vec<$t>) -> Self {
                    Value::List(v.into_iter().map(Value::from).collect())
                }
            }

            impl From<&[$t]> for Value {
                fn from(v: &[$t]) -> Self {
                    Value::List(v.iter().cloned().map(Value::from).collect())
                }
            }

            impl<const N: usize> From<[$t; N]> for Value {
                fn from(v: [$t; N]) -> Self {
                    Value::List(v.into_iter().map(Value::from).collect())
                }
            }
        )*
    };
}

impl_from_list!(
    Value, bool, i16, i32, i64, u16, u32, u64, f32, f64, String, &str, NaiveDateTime, uuid::Uuid
);

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```ignore
/// let row = qlkit::values![1, "alice", None::<i64>];
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($v:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($v)),+]
    };
}

// ── Json ──

/// Wrapper that binds (and decodes) a value as JSON text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Valuer for Json<T>
where
    T: Serialize + fmt::Debug + Send + Sync,
{
    fn value(&self) -> QlResult<Value> {
        serde_json::to_string(&self.0)
            .map(Value::Text)
            .map_err(|e| QlError::valuer(e.to_string()))
    }
}

impl<T> From<Json<T>> for Value
where
    T: Serialize + fmt::Debug + Send + Sync + 'static,
{
    fn from(v: Json<T>) -> Self {
        Value::Valuer(Arc::new(v))
    }
}

impl<T: DeserializeOwned> Json<T> {
    /// Decode JSON text produced by a driver.
    pub fn parse(text: &str) -> QlResult<Self> {
        serde_json::from_str(text)
            .map(Json)
            .map_err(|e| QlError::decode("<json>", e.to_string()))
    }
}
