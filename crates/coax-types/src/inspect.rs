//! Type inspection queries
//!
//! The query set the conversion engine needs to classify a target type:
//! numeric and integer detection (enums count as integers), nullable
//! unwrapping, enumerable probing, capability queries, zero values, and
//! runtime instance checks. These are the only introspection primitives the
//! engine relies on.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::descriptor::TypeDesc;
use crate::value::Value;

/// A queryable shape capability of a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The type is a sequence of elements.
    Enumerable,
    /// The type can represent "no value".
    Nullable,
}

/// True if the type is numeric: integer, float, or enum-backed.
pub fn is_number_type(ty: &TypeDesc) -> bool {
    matches!(
        ty,
        TypeDesc::I8
            | TypeDesc::I16
            | TypeDesc::I32
            | TypeDesc::I64
            | TypeDesc::U8
            | TypeDesc::U16
            | TypeDesc::U32
            | TypeDesc::U64
            | TypeDesc::F32
            | TypeDesc::F64
            | TypeDesc::Decimal
            | TypeDesc::Enum(_)
    )
}

/// True if the type is an integer type. Enum-backed types count.
pub fn is_integer_type(ty: &TypeDesc) -> bool {
    matches!(
        ty,
        TypeDesc::I8
            | TypeDesc::I16
            | TypeDesc::I32
            | TypeDesc::I64
            | TypeDesc::U8
            | TypeDesc::U16
            | TypeDesc::U32
            | TypeDesc::U64
            | TypeDesc::Enum(_)
    )
}

/// If the type is a nullable wrapper, return the inner type.
pub fn nullable_of(ty: &TypeDesc) -> Option<&TypeDesc> {
    match ty {
        TypeDesc::Nullable(inner) => Some(inner),
        _ => None,
    }
}

/// Probe whether the type is a sequence, and of what.
///
/// Lists yield `Some(Some(element))`. Strings are sequences with no element
/// descriptor of their own, yielding `Some(None)`, unless `exclude_string`
/// is set. Everything else yields `None`.
pub fn is_enumerable_of(ty: &TypeDesc, exclude_string: bool) -> Option<Option<&TypeDesc>> {
    match ty {
        TypeDesc::List(element) => Some(Some(element)),
        TypeDesc::Str if !exclude_string => Some(None),
        _ => None,
    }
}

/// Query whether a type implements a capability, returning the capability's
/// type arguments when it does.
pub fn implements(ty: &TypeDesc, capability: Capability) -> Option<Vec<TypeDesc>> {
    match capability {
        Capability::Enumerable => match ty {
            TypeDesc::List(element) => Some(vec![(**element).clone()]),
            TypeDesc::Str => Some(vec![]),
            _ => None,
        },
        Capability::Nullable => match ty {
            TypeDesc::Nullable(inner) => Some(vec![(**inner).clone()]),
            _ => None,
        },
    }
}

/// The zero/default representation of a type.
///
/// Nullable targets default to absence; everything else defaults to its
/// natural zero.
pub fn zero_value(ty: &TypeDesc) -> Value {
    match ty {
        TypeDesc::Bool => Value::Bool(false),
        TypeDesc::I8 => Value::I8(0),
        TypeDesc::I16 => Value::I16(0),
        TypeDesc::I32 => Value::I32(0),
        TypeDesc::I64 => Value::I64(0),
        TypeDesc::U8 => Value::U8(0),
        TypeDesc::U16 => Value::U16(0),
        TypeDesc::U32 => Value::U32(0),
        TypeDesc::U64 => Value::U64(0),
        TypeDesc::F32 => Value::F32(0.0),
        TypeDesc::F64 => Value::F64(0.0),
        TypeDesc::Decimal => Value::Decimal(Decimal::ZERO),
        TypeDesc::Str => Value::Str(String::new()),
        TypeDesc::DateTime => Value::DateTime(DateTime::<Utc>::MIN_UTC),
        TypeDesc::Duration => Value::Duration(TimeDelta::zero()),
        TypeDesc::Guid => Value::Guid(Uuid::nil()),
        TypeDesc::Enum(ty) => Value::Enum(ty, 0),
        TypeDesc::Nullable(_) => Value::Null,
        TypeDesc::List(_) => Value::List(Vec::new()),
    }
}

/// True if the value is already an instance of the described type.
///
/// `Nullable(t)` accepts absence and instances of `t`. Lists require every
/// element to be an instance of the element type. Enum instances must carry
/// the same descriptor.
pub fn is_instance_of(ty: &TypeDesc, value: &Value) -> bool {
    match (ty, value) {
        (TypeDesc::Nullable(inner), _) => {
            matches!(value, Value::Null) || is_instance_of(inner, value)
        }
        (TypeDesc::Bool, Value::Bool(_)) => true,
        (TypeDesc::I8, Value::I8(_)) => true,
        (TypeDesc::I16, Value::I16(_)) => true,
        (TypeDesc::I32, Value::I32(_)) => true,
        (TypeDesc::I64, Value::I64(_)) => true,
        (TypeDesc::U8, Value::U8(_)) => true,
        (TypeDesc::U16, Value::U16(_)) => true,
        (TypeDesc::U32, Value::U32(_)) => true,
        (TypeDesc::U64, Value::U64(_)) => true,
        (TypeDesc::F32, Value::F32(_)) => true,
        (TypeDesc::F64, Value::F64(_)) => true,
        (TypeDesc::Decimal, Value::Decimal(_)) => true,
        (TypeDesc::Str, Value::Str(_)) => true,
        (TypeDesc::DateTime, Value::DateTime(_)) => true,
        (TypeDesc::Duration, Value::Duration(_)) => true,
        (TypeDesc::Guid, Value::Guid(_)) => true,
        // Descriptors are 'static singletons; identity is pointer identity,
        // so two distinct enums with identical member tables stay distinct.
        (TypeDesc::Enum(expected), Value::Enum(actual, _)) => std::ptr::eq(*expected, *actual),
        (TypeDesc::List(element), Value::List(items)) => {
            items.iter().all(|item| is_instance_of(element, item))
        }
        _ => false,
    }
}
