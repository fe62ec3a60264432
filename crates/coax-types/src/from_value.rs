//! Statically-typed conversion targets
//!
//! `FromValue` lets a caller name a conversion target as a Rust type. The
//! trait supplies the runtime descriptor the engine dispatches on, and the
//! extraction that turns the engine's dynamically-typed result back into the
//! static type. `Option<T>` is the nullable wrapper; `Vec<T>` is the list
//! shape.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::descriptor::TypeDesc;
use crate::value::Value;

/// A Rust type that can serve as a conversion target.
pub trait FromValue: Sized {
    /// The runtime descriptor the conversion engine dispatches on.
    fn type_desc() -> TypeDesc;

    /// Extract the statically-typed value from an engine result.
    ///
    /// Returns `None` when the value is not an instance of this type; the
    /// engine guarantees instance-ness for its own successful results.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($($ty:ty => $desc:ident / $variant:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::$desc
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool / Bool,
    i8 => I8 / I8,
    i16 => I16 / I16,
    i32 => I32 / I32,
    i64 => I64 / I64,
    u8 => U8 / U8,
    u16 => U16 / U16,
    u32 => U32 / U32,
    u64 => U64 / U64,
    f32 => F32 / F32,
    f64 => F64 / F64,
    Decimal => Decimal / Decimal,
    String => Str / Str,
    DateTime<Utc> => DateTime / DateTime,
    TimeDelta => Duration / Duration,
    Uuid => Guid / Guid,
}

impl<T: FromValue> FromValue for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::nullable(T::type_desc())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null | Value::DbNull => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::list(T::type_desc())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_descriptors() {
        assert_eq!(<i32 as FromValue>::type_desc(), TypeDesc::I32);
        assert_eq!(<String as FromValue>::type_desc(), TypeDesc::Str);
        assert_eq!(
            <Option<i32> as FromValue>::type_desc(),
            TypeDesc::nullable(TypeDesc::I32)
        );
        assert_eq!(
            <Vec<String> as FromValue>::type_desc(),
            TypeDesc::list(TypeDesc::Str)
        );
    }

    #[test]
    fn test_scalar_extraction() {
        assert_eq!(i32::from_value(Value::I32(42)), Some(42));
        assert_eq!(i32::from_value(Value::I64(42)), None);
        assert_eq!(String::from_value(Value::Str("hi".into())), Some("hi".into()));
    }

    #[test]
    fn test_option_extraction() {
        assert_eq!(Option::<i32>::from_value(Value::Null), Some(None));
        assert_eq!(Option::<i32>::from_value(Value::DbNull), Some(None));
        assert_eq!(Option::<i32>::from_value(Value::I32(7)), Some(Some(7)));
        assert_eq!(Option::<i32>::from_value(Value::Str("7".into())), None);
    }

    #[test]
    fn test_vec_extraction() {
        let list = Value::List(vec![Value::I32(1), Value::I32(2)]);
        assert_eq!(Vec::<i32>::from_value(list), Some(vec![1, 2]));

        let mixed = Value::List(vec![Value::I32(1), Value::Str("2".into())]);
        assert_eq!(Vec::<i32>::from_value(mixed), None);
    }
}
