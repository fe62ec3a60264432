//! Dynamic value model
//!
//! `Value` represents an input of unknown or loosely-known runtime type, as
//! received from user input, a database row, or deserialized data. Two
//! distinct markers represent "no value": `Null` is plain absence, while
//! `DbNull` is the explicit null sentinel used by tabular and record data
//! sources. The conversion engine treats both as empty.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::descriptor::{EnumType, TypeDesc};

/// A dynamically-typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence: no value at all.
    Null,
    /// Explicit data-source null marker, distinct from plain absence.
    DbNull,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    /// An exact base-10 number, for quantities where binary floats drift.
    Decimal(Decimal),
    Str(String),
    DateTime(DateTime<Utc>),
    Duration(TimeDelta),
    Guid(Uuid),
    /// A value of an enum-backed integer type, tagged with its descriptor.
    Enum(&'static EnumType, i64),
    List(Vec<Value>),
}

impl Value {
    /// Human-readable name of this value's runtime type.
    ///
    /// Used when reporting cast failures, so the caller can see both sides
    /// of the failed conversion.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::DbNull => "db-null",
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Decimal(_) => "decimal",
            Value::Str(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Duration(_) => "duration",
            Value::Guid(_) => "guid",
            Value::Enum(ty, _) => ty.name,
            Value::List(_) => "list",
        }
    }

    /// Descriptor of this value's runtime type.
    ///
    /// The empty markers have no runtime type and yield `None`. List element
    /// types are taken from the first element; an empty list has no
    /// inferable element type.
    pub fn type_desc(&self) -> Option<TypeDesc> {
        match self {
            Value::Null | Value::DbNull => None,
            Value::Bool(_) => Some(TypeDesc::Bool),
            Value::I8(_) => Some(TypeDesc::I8),
            Value::I16(_) => Some(TypeDesc::I16),
            Value::I32(_) => Some(TypeDesc::I32),
            Value::I64(_) => Some(TypeDesc::I64),
            Value::U8(_) => Some(TypeDesc::U8),
            Value::U16(_) => Some(TypeDesc::U16),
            Value::U32(_) => Some(TypeDesc::U32),
            Value::U64(_) => Some(TypeDesc::U64),
            Value::F32(_) => Some(TypeDesc::F32),
            Value::F64(_) => Some(TypeDesc::F64),
            Value::Decimal(_) => Some(TypeDesc::Decimal),
            Value::Str(_) => Some(TypeDesc::Str),
            Value::DateTime(_) => Some(TypeDesc::DateTime),
            Value::Duration(_) => Some(TypeDesc::Duration),
            Value::Guid(_) => Some(TypeDesc::Guid),
            Value::Enum(ty, _) => Some(TypeDesc::Enum(ty)),
            Value::List(items) => items
                .first()
                .and_then(|item| item.type_desc())
                .map(TypeDesc::list),
        }
    }

    /// True for the two empty markers (`Null` and `DbNull`).
    pub fn is_empty_marker(&self) -> bool {
        matches!(self, Value::Null | Value::DbNull)
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    String => Str,
    DateTime<Utc> => DateTime,
    TimeDelta => Duration,
    Uuid => Guid,
    Vec<Value> => List,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// Lossless-enough export into the serde data model, for handing converted
/// values back to serde-based pipelines. Timestamps render as RFC 3339,
/// guids as hyphenated strings, enums as their declared member name when
/// one exists, decimals as their exact base-10 rendering.
impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        use serde_json::Number;
        match value {
            Value::Null | Value::DbNull => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::I8(n) => serde_json::Value::Number(n.into()),
            Value::I16(n) => serde_json::Value::Number(n.into()),
            Value::I32(n) => serde_json::Value::Number(n.into()),
            Value::I64(n) => serde_json::Value::Number(n.into()),
            Value::U8(n) => serde_json::Value::Number(n.into()),
            Value::U16(n) => serde_json::Value::Number(n.into()),
            Value::U32(n) => serde_json::Value::Number(n.into()),
            Value::U64(n) => serde_json::Value::Number(n.into()),
            Value::F32(n) => Number::from_f64(f64::from(n))
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::F64(n) => Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Decimal(d) => serde_json::Value::String(d.to_string()),
            Value::Str(s) => serde_json::Value::String(s),
            Value::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            Value::Duration(d) => serde_json::Value::String(d.to_string()),
            Value::Guid(g) => serde_json::Value::String(g.to_string()),
            Value::Enum(ty, n) => match ty.name_of(n) {
                Some(name) => serde_json::Value::String(name.to_string()),
                None => serde_json::Value::Number(n.into()),
            },
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
        }
    }
}
