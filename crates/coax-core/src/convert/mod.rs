//! Conversion entry points
//!
//! Two primitive operations cover the whole surface: `to` (strict by
//! policy, fails with a typed error) and `force` (absorbs conversion
//! failures and substitutes a default). Each comes in a statically-typed
//! form dispatching on a [`FromValue`] target and a dynamic form dispatching
//! on a runtime [`TypeDesc`]. Every type-specific alias routes through the
//! same internal decision table, so semantics never drift between entry
//! points.

mod alias;
mod engine;
pub mod null;

#[cfg(test)]
mod tests;

pub use alias::*;

use coax_types::{FromValue, TypeDesc, Value};

use crate::error::{Error, Result};
use crate::options::ConvertOptions;

/// Convert a value to the target described at runtime.
///
/// Fails with [`Error::NullConversion`] when an empty input targets a
/// non-nullable type without `NULL_TO_VALUE_DEFAULT`, and with
/// [`Error::InvalidCast`] when no conversion strategy applies.
pub fn to_value(value: impl Into<Value>, target: &TypeDesc, options: ConvertOptions) -> Result<Value> {
    engine::convert_value(value.into(), target, options, false, None)
}

/// Convert a value to the target described at runtime, substituting the
/// supplied default (or the target's zero value) for any conversion
/// failure. Only programmer errors surface.
pub fn force_value(
    value: impl Into<Value>,
    target: &TypeDesc,
    options: ConvertOptions,
    default: Option<Value>,
) -> Result<Value> {
    engine::convert_value(value.into(), target, options, true, default.as_ref())
}

/// Convert a value to a statically-known target type.
///
/// Identical in behavior to [`to_value`] with `T::type_desc()`; only the
/// way the target is supplied differs.
pub fn to<T: FromValue>(value: impl Into<Value>, options: ConvertOptions) -> Result<T> {
    let converted = engine::convert_value(value.into(), &T::type_desc(), options, false, None)?;
    extract(converted)
}

/// Convert a value to a statically-known target type, substituting the
/// target's zero value for any conversion failure.
pub fn force<T: FromValue>(value: impl Into<Value>, options: ConvertOptions) -> Result<T> {
    let converted = engine::convert_value(value.into(), &T::type_desc(), options, true, None)?;
    extract(converted)
}

/// Convert a value to a statically-known target type, substituting the
/// supplied default for any conversion failure.
pub fn force_or<T>(value: impl Into<Value>, default: T, options: ConvertOptions) -> Result<T>
where
    T: FromValue + Into<Value>,
{
    let fallback = default.into();
    let converted =
        engine::convert_value(value.into(), &T::type_desc(), options, true, Some(&fallback))?;
    extract(converted)
}

fn extract<T: FromValue>(converted: Value) -> Result<T> {
    let source_type = converted.type_name();
    T::from_value(converted).ok_or_else(|| Error::InvalidCast {
        source_type: source_type.to_string(),
        target: T::type_desc().to_string(),
        message: "engine produced a value of the wrong shape".to_string(),
        source: None,
    })
}
