//! The conversion decision table
//!
//! One internal function, `convert_value`, decides for every (value, target,
//! options) triple whether and how a conversion succeeds. Every public entry
//! point, typed or dynamic, strict or forcing, routes through it so that the
//! leniency rules stay consistent across the whole API surface.
//!
//! Strategy order:
//! 1. empty input handling (nullable targets absorb absence, always)
//! 2. identity short-circuit when the value already has the target shape
//! 3. nullable unwrap and recursion
//! 4. string parsing for numeric and enum targets (hex forms per options)
//! 5. native conversions between scalar shapes
//!
//! The engine never logs a failure; every outcome is a returned value or a
//! returned error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use coax_types::{inspect, EnumType, TypeDesc, Value};
use regex::Regex;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::options::ConvertOptions;

/// Convert `value` to `target` under `options`.
///
/// When `ignore_errors` is set, every conversion failure (but not a
/// programmer error) is replaced by `default_value`, or by the target's zero
/// value when no default is supplied. The default also substitutes for empty
/// input under `NULL_TO_VALUE_DEFAULT`.
pub(crate) fn convert_value(
    value: Value,
    target: &TypeDesc,
    options: ConvertOptions,
    ignore_errors: bool,
    default_value: Option<&Value>,
) -> Result<Value> {
    tracing::trace!(source = value.type_name(), target = %target, "converting value");
    validate_target(target)?;

    if is_empty(&value, options) {
        if matches!(target, TypeDesc::Nullable(_)) {
            // Absence is not an error when the target can represent it.
            return Ok(Value::Null);
        }
        if options.contains(ConvertOptions::NULL_TO_VALUE_DEFAULT) || ignore_errors {
            return Ok(substitute(target, default_value));
        }
        return Err(Error::null_conversion(target));
    }

    if inspect::is_instance_of(target, &value) {
        return Ok(value);
    }

    if let Some(inner) = inspect::nullable_of(target) {
        // Empty input was handled above, so the inner conversion sees a
        // real value and its result needs no re-wrapping.
        return convert_value(value, inner, options, ignore_errors, default_value);
    }

    match try_convert(&value, target, options) {
        Ok(converted) => Ok(converted),
        Err(err) if ignore_errors && err.is_conversion_failure() => {
            Ok(substitute(target, default_value))
        }
        Err(err) => Err(err),
    }
}

/// True if the value counts as empty under the options: absence, the
/// explicit null marker, or an empty string when `EMPTY_STRING_AS_NULL`.
pub(crate) fn is_empty(value: &Value, options: ConvertOptions) -> bool {
    match value {
        Value::Null | Value::DbNull => true,
        Value::Str(s) => s.is_empty() && options.contains(ConvertOptions::EMPTY_STRING_AS_NULL),
        _ => false,
    }
}

fn substitute(target: &TypeDesc, default_value: Option<&Value>) -> Value {
    match default_value {
        Some(default) => default.clone(),
        None => inspect::zero_value(target),
    }
}

/// Reject malformed target descriptors before they reach the decision
/// table. These are programmer errors, not conversion failures, and are
/// never absorbed by the forcing entry points.
fn validate_target(target: &TypeDesc) -> Result<()> {
    match target {
        TypeDesc::Nullable(inner) => match &**inner {
            TypeDesc::Nullable(_) => Err(Error::argument(format!(
                "nested nullable target {target} is not a valid conversion target"
            ))),
            other => validate_target(other),
        },
        TypeDesc::Enum(ty) => {
            if integer_range(&ty.underlying).is_none() {
                return Err(Error::argument(format!(
                    "enum {} must be backed by an integer kind, not {}",
                    ty.name, ty.underlying
                )));
            }
            Ok(())
        }
        TypeDesc::List(element) => validate_target(element),
        _ => Ok(()),
    }
}

/// A parsed or extracted number on its way to a numeric target.
pub(crate) enum Number {
    Int(i128),
    Float(f64),
    Dec(Decimal),
}

impl Number {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Int(n) => Some(*n as f64),
            Number::Float(f) => Some(*f),
            Number::Dec(d) => d.to_f64(),
        }
    }

    /// Integral interpretation, rounding fractional values half-to-even the
    /// way the host numeric conversions do.
    fn as_integral(&self) -> Option<i128> {
        match self {
            Number::Int(n) => Some(*n),
            Number::Float(f) => {
                if !f.is_finite() {
                    return None;
                }
                let rounded = f.round_ties_even();
                if rounded < i128::MIN as f64 || rounded > i128::MAX as f64 {
                    return None;
                }
                Some(rounded as i128)
            }
            // Decimal::round is banker's rounding to zero decimal places.
            Number::Dec(d) => d.round().to_i128(),
        }
    }

    fn is_nonzero(&self) -> bool {
        match self {
            Number::Int(n) => *n != 0,
            Number::Float(f) => *f != 0.0,
            Number::Dec(d) => !d.is_zero(),
        }
    }
}

/// Numeric interpretation of a value's runtime type. Booleans are not
/// numbers; they get their own coercions.
pub(crate) fn numeric_of(value: &Value) -> Option<Number> {
    match value {
        Value::I8(n) => Some(Number::Int(i128::from(*n))),
        Value::I16(n) => Some(Number::Int(i128::from(*n))),
        Value::I32(n) => Some(Number::Int(i128::from(*n))),
        Value::I64(n) => Some(Number::Int(i128::from(*n))),
        Value::U8(n) => Some(Number::Int(i128::from(*n))),
        Value::U16(n) => Some(Number::Int(i128::from(*n))),
        Value::U32(n) => Some(Number::Int(i128::from(*n))),
        Value::U64(n) => Some(Number::Int(i128::from(*n))),
        Value::F32(f) => Some(Number::Float(f64::from(*f))),
        Value::F64(f) => Some(Number::Float(*f)),
        Value::Decimal(d) => Some(Number::Dec(*d)),
        Value::Enum(_, n) => Some(Number::Int(i128::from(*n))),
        _ => None,
    }
}

/// Parse a string as a number under the native literal rules, extended by
/// the hex forms the options allow. Leading and trailing whitespace is
/// tolerated.
pub(crate) fn parse_number_str(text: &str, options: ConvertOptions) -> Option<Number> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(hex) = parse_hex(trimmed, options) {
        return Some(Number::Int(hex));
    }
    if let Ok(n) = trimmed.parse::<i128>() {
        return Some(Number::Int(n));
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return Some(Number::Float(f));
        }
    }
    None
}

fn parse_hex(text: &str, options: ConvertOptions) -> Option<i128> {
    let vb = options
        .contains(ConvertOptions::ALLOW_VB_HEX)
        .then(|| text.strip_prefix("&H").or_else(|| text.strip_prefix("&h")))
        .flatten();
    let c_style = options
        .contains(ConvertOptions::ALLOW_0X_HEX)
        .then(|| text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")))
        .flatten();
    let digits = vb.or(c_style)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    i128::from_str_radix(digits, 16).ok()
}

fn integer_range(kind: &TypeDesc) -> Option<(i128, i128)> {
    match kind {
        TypeDesc::I8 => Some((i128::from(i8::MIN), i128::from(i8::MAX))),
        TypeDesc::I16 => Some((i128::from(i16::MIN), i128::from(i16::MAX))),
        TypeDesc::I32 => Some((i128::from(i32::MIN), i128::from(i32::MAX))),
        TypeDesc::I64 => Some((i128::from(i64::MIN), i128::from(i64::MAX))),
        TypeDesc::U8 => Some((0, i128::from(u8::MAX))),
        TypeDesc::U16 => Some((0, i128::from(u16::MAX))),
        TypeDesc::U32 => Some((0, i128::from(u32::MAX))),
        TypeDesc::U64 => Some((0, i128::from(u64::MAX))),
        _ => None,
    }
}

/// Apply the type-specific strategies for a non-empty, non-identity value.
fn try_convert(value: &Value, target: &TypeDesc, options: ConvertOptions) -> Result<Value> {
    match target {
        TypeDesc::Bool => to_bool(value, target),
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
        | TypeDesc::Decimal => to_numeric(value, target, options),
        TypeDesc::Enum(ty) => to_enum(value, ty, target, options),
        TypeDesc::Str => to_str(value, target),
        TypeDesc::DateTime => to_datetime(value, target),
        TypeDesc::Duration => to_duration(value, target),
        TypeDesc::Guid => to_guid(value, target),
        TypeDesc::Nullable(_) | TypeDesc::List(_) => Err(Error::invalid_cast(
            value,
            target,
            "no conversion strategy applies",
        )),
    }
}

fn to_bool(value: &Value, target: &TypeDesc) -> Result<Value> {
    match value {
        Value::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(Error::invalid_cast(
                value,
                target,
                "string is not a recognized boolean",
            )),
        },
        other => numeric_of(other)
            .map(|n| Value::Bool(n.is_nonzero()))
            .ok_or_else(|| Error::invalid_cast(value, target, "no conversion strategy applies")),
    }
}

fn to_numeric(value: &Value, target: &TypeDesc, options: ConvertOptions) -> Result<Value> {
    let number = match value {
        Value::Str(s) => {
            // Decimal targets parse plain base-10 text exactly, before the
            // float fallback can introduce binary noise.
            if matches!(target, TypeDesc::Decimal) {
                if let Ok(d) = s.trim().parse::<Decimal>() {
                    return Ok(Value::Decimal(d));
                }
            }
            parse_number_str(s, options).ok_or_else(|| {
                Error::invalid_cast(value, target, "string is not a recognized number")
            })?
        }
        Value::Bool(b) => Number::Int(i128::from(*b)),
        other => numeric_of(other)
            .ok_or_else(|| Error::invalid_cast(value, target, "no conversion strategy applies"))?,
    };
    number_to_value(&number, target)
        .ok_or_else(|| Error::invalid_cast(value, target, "value does not fit the target type"))
}

fn number_to_value(number: &Number, target: &TypeDesc) -> Option<Value> {
    match target {
        TypeDesc::F64 => number.as_f64().map(Value::F64),
        TypeDesc::F32 => {
            let wide = number.as_f64()?;
            let narrow = wide as f32;
            if wide.is_finite() && narrow.is_infinite() {
                return None;
            }
            Some(Value::F32(narrow))
        }
        TypeDesc::Decimal => match number {
            Number::Int(n) => Decimal::try_from_i128_with_scale(*n, 0)
                .ok()
                .map(Value::Decimal),
            Number::Float(f) => Decimal::from_f64(*f).map(Value::Decimal),
            Number::Dec(d) => Some(Value::Decimal(*d)),
        },
        _ => {
            let int = number.as_integral()?;
            match target {
                TypeDesc::I8 => i8::try_from(int).ok().map(Value::I8),
                TypeDesc::I16 => i16::try_from(int).ok().map(Value::I16),
                TypeDesc::I32 => i32::try_from(int).ok().map(Value::I32),
                TypeDesc::I64 => i64::try_from(int).ok().map(Value::I64),
                TypeDesc::U8 => u8::try_from(int).ok().map(Value::U8),
                TypeDesc::U16 => u16::try_from(int).ok().map(Value::U16),
                TypeDesc::U32 => u32::try_from(int).ok().map(Value::U32),
                TypeDesc::U64 => u64::try_from(int).ok().map(Value::U64),
                _ => None,
            }
        }
    }
}

fn to_enum(
    value: &Value,
    ty: &'static EnumType,
    target: &TypeDesc,
    options: ConvertOptions,
) -> Result<Value> {
    let number = match value {
        Value::Str(s) => {
            let trimmed = s.trim();
            // Declared names win over numeric interpretation.
            match ty.value_of(trimmed) {
                Some(member) => Number::Int(i128::from(member)),
                None => parse_number_str(trimmed, options).ok_or_else(|| {
                    Error::invalid_cast(
                        value,
                        target,
                        format!("string is neither a declared {} member nor a number", ty.name),
                    )
                })?,
            }
        }
        other => numeric_of(other)
            .ok_or_else(|| Error::invalid_cast(value, target, "no conversion strategy applies"))?,
    };

    let int = number
        .as_integral()
        .ok_or_else(|| Error::invalid_cast(value, target, "value does not fit the target type"))?;
    // validate_target guarantees an integer underlying kind.
    let (min, max) = integer_range(&ty.underlying)
        .ok_or_else(|| Error::argument(format!("enum {} has a non-integer underlying kind", ty.name)))?;
    if int < min || int > max {
        return Err(Error::invalid_cast(
            value,
            target,
            format!("value is out of range for {}", ty.underlying),
        ));
    }
    Ok(Value::Enum(ty, int as i64))
}

fn to_str(value: &Value, target: &TypeDesc) -> Result<Value> {
    let rendered = match value {
        Value::Bool(b) => b.to_string(),
        Value::I8(n) => n.to_string(),
        Value::I16(n) => n.to_string(),
        Value::I32(n) => n.to_string(),
        Value::I64(n) => n.to_string(),
        Value::U8(n) => n.to_string(),
        Value::U16(n) => n.to_string(),
        Value::U32(n) => n.to_string(),
        Value::U64(n) => n.to_string(),
        Value::F32(f) => f.to_string(),
        Value::F64(f) => f.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::Str(s) => s.clone(),
        Value::DateTime(dt) => dt.to_rfc3339(),
        Value::Duration(d) => format_timespan(d),
        Value::Guid(g) => g.to_string(),
        Value::Enum(ty, n) => match ty.name_of(*n) {
            Some(name) => name.to_string(),
            None => n.to_string(),
        },
        Value::Null | Value::DbNull | Value::List(_) => {
            return Err(Error::invalid_cast(
                value,
                target,
                "no conversion strategy applies",
            ))
        }
    };
    Ok(Value::Str(rendered))
}

fn to_datetime(value: &Value, target: &TypeDesc) -> Result<Value> {
    let Value::Str(s) = value else {
        return Err(Error::invalid_cast(value, target, "no conversion strategy applies"));
    };
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Value::DateTime(dt.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(Value::DateTime(naive.and_utc()));
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Ok(Value::DateTime(date.and_time(NaiveTime::MIN).and_utc())),
        Err(err) => Err(Error::invalid_cast_from(
            value,
            target,
            "string is not a recognized date/time",
            err,
        )),
    }
}

fn to_guid(value: &Value, target: &TypeDesc) -> Result<Value> {
    let Value::Str(s) = value else {
        return Err(Error::invalid_cast(value, target, "no conversion strategy applies"));
    };
    Uuid::parse_str(s.trim())
        .map(Value::Guid)
        .map_err(|err| Error::invalid_cast_from(value, target, "string is not a valid guid", err))
}

const TIMESPAN_PATTERN: &str =
    r"^(?P<sign>[+-])?(?:(?P<days>\d+)\.)?(?P<hours>\d{1,2}):(?P<mins>[0-5]?\d)(?::(?P<secs>[0-5]?\d))?(?:\.(?P<frac>\d{1,9}))?$";

fn to_duration(value: &Value, target: &TypeDesc) -> Result<Value> {
    let Value::Str(s) = value else {
        return Err(Error::invalid_cast(value, target, "no conversion strategy applies"));
    };
    let pattern = Regex::new(TIMESPAN_PATTERN)
        .map_err(|err| Error::argument(format!("invalid timespan pattern: {err}")))?;
    let captures = pattern.captures(s.trim()).ok_or_else(|| {
        Error::invalid_cast(value, target, "string is not a recognized timespan")
    })?;

    // A present component that fails to parse has overflowed i64; that is
    // an out-of-range timespan, not an absent field.
    let component = |name: &str| -> Result<i64> {
        match captures.name(name) {
            None => Ok(0),
            Some(m) => m.as_str().parse::<i64>().map_err(|err| {
                Error::invalid_cast_from(value, target, "timespan is out of range", err)
            }),
        }
    };
    let days = component("days")?;
    let hours = component("hours")?;
    if hours > 23 {
        return Err(Error::invalid_cast(
            value,
            target,
            "hours component must be below 24",
        ));
    }
    let minutes = component("mins")?;
    let whole_seconds = component("secs")?;
    let seconds = days
        .checked_mul(86_400)
        .and_then(|total| total.checked_add(hours * 3_600 + minutes * 60 + whole_seconds))
        .ok_or_else(|| Error::invalid_cast(value, target, "timespan is out of range"))?;
    let nanos = captures
        .name("frac")
        .and_then(|m| format!("{:0<9}", m.as_str()).parse::<i64>().ok())
        .unwrap_or(0);

    let mut duration = TimeDelta::try_seconds(seconds)
        .ok_or_else(|| Error::invalid_cast(value, target, "timespan is out of range"))?
        + TimeDelta::nanoseconds(nanos);
    if captures.name("sign").is_some_and(|m| m.as_str() == "-") {
        duration = -duration;
    }
    Ok(Value::Duration(duration))
}

/// Render a duration in the same `[-][d.]HH:MM:SS[.frac]` shape the string
/// parser accepts.
pub(crate) fn format_timespan(duration: &TimeDelta) -> String {
    let negative = *duration < TimeDelta::zero();
    let abs = if negative { -*duration } else { *duration };
    let total_seconds = abs.num_seconds();
    let days = total_seconds / 86_400;
    let hours = (total_seconds / 3_600) % 24;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;
    let nanos = abs.subsec_nanos();

    let mut rendered = String::new();
    if negative {
        rendered.push('-');
    }
    if days > 0 {
        rendered.push_str(&format!("{days}."));
    }
    rendered.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if nanos > 0 {
        let frac = format!("{nanos:09}");
        rendered.push('.');
        rendered.push_str(frac.trim_end_matches('0'));
    }
    rendered
}
