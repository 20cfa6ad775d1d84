//! Result rows and row mapping traits

use crate::error::{QlError, QlResult};
use crate::value::{Json, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// One result row: column names shared across the result set plus values.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Create a row. `columns` is usually shared by every row of a result set.
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Build a standalone row from `(column, value)` pairs.
    pub fn from_pairs<I, S, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        let (columns, values): (Vec<String>, Vec<Value>) = pairs
            .into_iter()
            .map(|(c, v)| (c.into(), v.into()))
            .unzip();
        Self::new(columns.into(), values)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of `column`, matched exactly first and then ASCII case-insensitively.
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .or_else(|| self.columns.iter().position(|c| c.eq_ignore_ascii_case(column)))
    }

    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn get_by_name(&self, column: &str) -> Option<&Value> {
        self.index_of(column).and_then(|idx| self.values.get(idx))
    }

    /// Decode the named column.
    pub fn try_get<T: FromValue>(&self, column: &str) -> QlResult<T> {
        let value = self
            .get_by_name(column)
            .ok_or_else(|| QlError::decode(column, "column not found"))?;
        decode_as(column, value)
    }

    /// Decode the named column, or `T::default()` if the result has no such column.
    pub fn try_get_or_default<T: FromValue + Default>(&self, column: &str) -> QlResult<T> {
        match self.get_by_name(column) {
            Some(value) => decode_as(column, value),
            None => Ok(T::default()),
        }
    }

    /// Decode the column at `idx`.
    pub fn try_get_index<T: FromValue>(&self, idx: usize) -> QlResult<T> {
        let name = self
            .columns
            .get(idx)
            .map_or_else(|| format!("#{idx}"), Clone::clone);
        let value = self
            .values
            .get(idx)
            .ok_or_else(|| QlError::decode(&name, "column index out of range"))?;
        decode_as(&name, value)
    }
}

fn decode_as<T: FromValue>(column: &str, value: &Value) -> QlResult<T> {
    T::from_value(value).map_err(|e| match e {
        QlError::Decode { message, .. } => QlError::decode(column, message),
        other => other,
    })
}

/// Trait for types that can be decoded from a single [`Value`].
///
/// Conversions are lenient about the representation drivers commonly use
/// (numbers and timestamps returned as text, booleans as integers).
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> QlResult<Self>;
}

fn mismatch<T>(expected: &str, value: &Value) -> QlResult<T> {
    Err(QlError::decode(
        "",
        format!("cannot decode {} as {expected}", value.kind()),
    ))
}

fn parse_error<T>(expected: &str, text: &str, err: impl std::fmt::Display) -> QlResult<T> {
    Err(QlError::decode(
        "",
        format!("cannot parse {text:?} as {expected}: {err}"),
    ))
}

impl FromValue for Value {
    fn from_value(value: &Value) -> QlResult<Self> {
        value.resolve()
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> QlResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> QlResult<Self> {
        match value {
            Value::Bool(v) => Ok(*v),
            Value::Int(v) => Ok(*v != 0),
            Value::UInt(v) => Ok(*v != 0),
            Value::Text(s) => match s.to_ascii_lowercase().as_str() {
                "1" | "t" | "true" => Ok(true),
                "0" | "f" | "false" => Ok(false),
                _ => parse_error("bool", s, "expected 1/0/true/false"),
            },
            Value::Bytes(b) if b.len() == 1 => Ok(b[0] != 0 && b[0] != b'0'),
            other => mismatch("bool", other),
        }
    }
}

macro_rules! impl_from_value_int {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> QlResult<Self> {
                    let out_of_range = |v: &dyn std::fmt::Display| {
                        QlError::decode("", format!("{v} out of range for {}", stringify!($t)))
                    };
                    match value {
                        Value::Int(v) => <$t>::try_from(*v).map_err(|_| out_of_range(v)),
                        Value::UInt(v) => <$t>::try_from(*v).map_err(|_| out_of_range(v)),
                        Value::Bool(v) => Ok(<$t>::from(*v)),
                        Value::Float(v) if v.fract() == 0.0 => {
                            let i = *v as i128;
                            <$t>::try_from(i).map_err(|_| out_of_range(v))
                        }
                        Value::Text(s) => match s.trim().parse::<$t>() {
                            Ok(v) => Ok(v),
                            Err(e) => parse_error(stringify!($t), s, e),
                        },
                        other => mismatch(stringify!($t), other),
                    }
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_from_value_float {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> QlResult<Self> {
                    match value {
                        Value::Float(v) => Ok(*v as $t),
                        Value::Int(v) => Ok(*v as $t),
                        Value::UInt(v) => Ok(*v as $t),
                        Value::Text(s) => match s.trim().parse::<$t>() {
                            Ok(v) => Ok(v),
                            Err(e) => parse_error(stringify!($t), s, e),
                        },
                        other => mismatch(stringify!($t), other),
                    }
                }
            }
        )*
    };
}

impl_from_value_float!(f32, f64);

impl FromValue for String {
    fn from_value(value: &Value) -> QlResult<Self> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            Value::Int(v) => Ok(v.to_string()),
            Value::UInt(v) => Ok(v.to_string()),
            Value::Float(v) => Ok(v.to_string()),
            Value::Bool(v) => Ok(v.to_string()),
            Value::Time(t) => Ok(t.format(crate::dialect::TIME_FORMAT).to_string()),
            Value::Bytes(b) => String::from_utf8(b.clone())
                .map_err(|e| QlError::decode("", format!("invalid utf-8: {e}"))),
            other => mismatch("String", other),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> QlResult<Self> {
        match value {
            Value::Bytes(b) => Ok(b.clone()),
            Value::Text(s) => Ok(s.clone().into_bytes()),
            other => mismatch("Vec<u8>", other),
        }
    }
}

fn parse_datetime(s: &str) -> QlResult<NaiveDateTime> {
    const FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
    for fmt in FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(t);
        }
    }
    match DateTime::parse_from_rfc3339(s) {
        Ok(t) => Ok(t.naive_utc()),
        Err(e) => parse_error("timestamp", s, e),
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: &Value) -> QlResult<Self> {
        match value {
            Value::Time(t) => Ok(*t),
            Value::Text(s) => parse_datetime(s.trim()),
            other => mismatch("NaiveDateTime", other),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> QlResult<Self> {
        NaiveDateTime::from_value(value).map(|t| t.and_utc())
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: &Value) -> QlResult<Self> {
        match value {
            Value::Time(t) => Ok(t.date()),
            Value::Text(s) => match NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
                Ok(d) => Ok(d),
                Err(_) => parse_datetime(s.trim()).map(|t| t.date()),
            },
            other => mismatch("NaiveDate", other),
        }
    }
}

impl FromValue for uuid::Uuid {
    fn from_value(value: &Value) -> QlResult<Self> {
        match value {
            Value::Text(s) => uuid::Uuid::parse_str(s.trim()).or_else(|e| parse_error("uuid", s, e)),
            Value::Bytes(b) => uuid::Uuid::from_slice(b)
                .map_err(|e| QlError::decode("", format!("invalid uuid bytes: {e}"))),
            other => mismatch("Uuid", other),
        }
    }
}

impl FromValue for serde_json::Value {
    fn from_value(value: &Value) -> QlResult<Self> {
        match value {
            Value::Text(s) => serde_json::from_str(s).or_else(|e| parse_error("json", s, e)),
            Value::Bytes(b) => serde_json::from_slice(b)
                .map_err(|e| QlError::decode("", format!("invalid json: {e}"))),
            other => mismatch("json", other),
        }
    }
}

impl<T: DeserializeOwned> FromValue for Json<T> {
    fn from_value(value: &Value) -> QlResult<Self> {
        match value {
            Value::Text(s) => Json::parse(s),
            Value::Bytes(b) => serde_json::from_slice(b)
                .map(Json)
                .map_err(|e| QlError::decode("", format!("invalid json: {e}"))),
            other => mismatch("json", other),
        }
    }
}

#[cfg(feature = "rust_decimal")]
impl FromValue for rust_decimal::Decimal {
    fn from_value(value: &Value) -> QlResult<Self> {
        use std::str::FromStr;
        match value {
            Value::Text(s) => rust_decimal::Decimal::from_str(s.trim())
                .or_else(|e| parse_error("decimal", s, e)),
            Value::Int(v) => Ok((*v).into()),
            Value::UInt(v) => Ok((*v).into()),
            Value::Float(v) => rust_decimal::Decimal::try_from(*v)
                .map_err(|e| QlError::decode("", e.to_string())),
            other => mismatch("decimal", other),
        }
    }
}

/// Trait for mapping a result row into a Rust type.
///
/// Derive it for structs with `#[derive(FromRow)]`; scalars read the first
/// column and tuples read columns by position.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> QlResult<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> QlResult<Self> {
        Ok(row.clone())
    }
}

impl<T: FromValue> FromRow for Option<T> {
    fn from_row(row: &Row) -> QlResult<Self> {
        row.try_get_index(0)
    }
}

macro_rules! impl_from_row_scalar {
    ($($t:ty),*) => {
        $(
            impl FromRow for $t {
                fn from_row(row: &Row) -> QlResult<Self> {
                    row.try_get_index(0)
                }
            }
        )*
    };
}

impl_from_row_scalar!(
    Value, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String, Vec<u8>,
    NaiveDateTime, NaiveDate, DateTime<Utc>, uuid::Uuid, serde_json::Value
);

#[cfg(feature = "rust_decimal")]
impl_from_row_scalar!(rust_decimal::Decimal);

impl<T: DeserializeOwned> FromRow for Json<T> {
    fn from_row(row: &Row) -> QlResult<Self> {
        row.try_get_index(0)
    }
}

macro_rules! impl_from_row_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: FromValue),+> FromRow for ($($name,)+) {
            fn from_row(row: &Row) -> QlResult<Self> {
                Ok(($(row.try_get_index::<$name>($idx)?,)+))
            }
        }
    };
}

impl_from_row_tuple!(A: 0);
impl_from_row_tuple!(A: 0, B: 1);
impl_from_row_tuple!(A: 0, B: 1, C: 2);
impl_from_row_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_from_row_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_from_row_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::from_pairs([
            ("id", Value::Int(7)),
            ("Name", Value::from("alice")),
            ("score", Value::from("1.5")),
            ("active", Value::Int(1)),
            ("deleted_at", Value::Null),
            ("created_at", Value::from("2020-01-02 03:04:05")),
        ])
    }

    #[test]
    fn test_try_get_by_name() {
        let row = row();
        assert_eq!(row.try_get::<i64>("id").unwrap(), 7);
        assert_eq!(row.try_get::<String>("name").unwrap(), "alice");
        assert_eq!(row.try_get::<f64>("score").unwrap(), 1.5);
        assert!(row.try_get::<bool>("active").unwrap());
        assert_eq!(row.try_get::<Option<String>>("deleted_at").unwrap(), None);

        let created: NaiveDateTime = row.try_get("created_at").unwrap();
        assert_eq!(created.to_string(), "2020-01-02 03:04:05");
    }

    #[test]
    fn test_decode_errors_name_the_column() {
        let row = row();
        match row.try_get::<i64>("deleted_at").unwrap_err() {
            QlError::Decode { column, .. } => assert_eq!(column, "deleted_at"),
            other => panic!("unexpected error: {other}"),
        }
        match row.try_get::<i64>("missing").unwrap_err() {
            QlError::Decode { column, message } => {
                assert_eq!(column, "missing");
                assert_eq!(message, "column not found");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(row.try_get::<u8>("id").is_ok());
        assert!(Row::from_pairs([("n", 300)]).try_get::<u8>("n").is_err());
    }

    #[test]
    fn test_try_get_or_default() {
        let row = row();
        assert_eq!(row.try_get_or_default::<i64>("missing").unwrap(), 0);
        assert_eq!(row.try_get_or_default::<i64>("id").unwrap(), 7);
    }

    #[test]
    fn test_scalar_and_tuple_rows() {
        let row = row();
        assert_eq!(i64::from_row(&row).unwrap(), 7);
        let (id, name): (i64, String) = FromRow::from_row(&row).unwrap();
        assert_eq!((id, name.as_str()), (7, "alice"));
        assert_eq!(Option::<i64>::from_row(&Row::from_pairs([("x", Value::Null)])).unwrap(), None);
    }

    #[test]
    fn test_json_and_uuid() {
        let id = uuid::Uuid::new_v4();
        let row = Row::from_pairs([
            ("id", Value::from(id)),
            ("tags", Value::from("[\"a\",\"b\"]")),
        ]);
        assert_eq!(row.try_get::<uuid::Uuid>("id").unwrap(), id);
        let tags: Json<Vec<String>> = row.try_get("tags").unwrap();
        assert_eq!(tags.0, vec!["a", "b"]);
    }
}
