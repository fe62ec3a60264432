//! Empty-value detection and transforms
//!
//! Helpers for classifying empty inputs and for moving between the two
//! empty representations: plain absence (`Value::Null`) and the explicit
//! data-source null marker (`Value::DbNull`). The marker matters for
//! tabular and record contexts that distinguish "no value" from "absent".

use coax_types::{inspect, Value};

use crate::convert::engine;
use crate::options::ConvertOptions;

/// True if the value is absence or the null marker, or an empty string when
/// the options include `EMPTY_STRING_AS_NULL`.
pub fn is_null(value: &Value, options: ConvertOptions) -> bool {
    engine::is_empty(value, options)
}

/// True if the value is absence, the null marker, or an empty string,
/// unconditionally.
pub fn is_null_or_empty(value: &Value) -> bool {
    match value {
        Value::Null | Value::DbNull => true,
        Value::Str(s) => s.is_empty(),
        _ => false,
    }
}

/// True if the value is absence, the null marker, or a string that is empty
/// or contains only whitespace.
pub fn is_null_or_whitespace(value: &Value) -> bool {
    match value {
        Value::Null | Value::DbNull => true,
        Value::Str(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// True if the value is empty or equals the zero value of its own runtime
/// type.
pub fn is_default(value: &Value) -> bool {
    if value.is_empty_marker() {
        return true;
    }
    match value.type_desc() {
        Some(ty) => *value == inspect::zero_value(&ty),
        None => false,
    }
}

/// True if the value's runtime type is numeric or enum-backed, or if it is
/// a string parseable as a number under the native rules extended by the
/// hex forms the options allow.
pub fn is_numeric(value: &Value, options: ConvertOptions) -> bool {
    match value {
        Value::Str(s) => engine::parse_number_str(s, options).is_some(),
        other => engine::numeric_of(other).is_some(),
    }
}

/// Convert empty input to plain absence; pass everything else through.
pub fn to_null(value: Value, empty_string_as_null: bool) -> Value {
    if engine::is_empty(&value, empty_string_options(empty_string_as_null)) {
        Value::Null
    } else {
        value
    }
}

/// Convert empty input to the explicit null marker; pass everything else
/// through.
pub fn to_db_null(value: Value, empty_string_as_null: bool) -> Value {
    if engine::is_empty(&value, empty_string_options(empty_string_as_null)) {
        Value::DbNull
    } else {
        value
    }
}

/// Convert the zero value of a value's own runtime type (or a supplied
/// explicit default) to the null marker; pass everything else through.
/// Empty input maps to the marker as well.
pub fn default_to_db_null(value: Value, default: Option<&Value>) -> Value {
    if value.is_empty_marker() {
        return Value::DbNull;
    }
    let matches_default = match default {
        Some(expected) => value == *expected,
        None => value
            .type_desc()
            .map(|ty| value == inspect::zero_value(&ty))
            .unwrap_or(false),
    };
    if matches_default {
        Value::DbNull
    } else {
        value
    }
}

fn empty_string_options(empty_string_as_null: bool) -> ConvertOptions {
    if empty_string_as_null {
        ConvertOptions::EMPTY_STRING_AS_NULL
    } else {
        ConvertOptions::STRICT
    }
}
