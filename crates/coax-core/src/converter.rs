//! Policy-bound converter instances
//!
//! A `Converter` binds a fixed [`ConvertOptions`] to the conversion engine,
//! exposing the same operations without threading the options through every
//! call. The three shared presets (`STRICT`, `DEFAULT`, `RELAXED`) are
//! consts of a plain value type: immutable, resource-free, and safe to
//! alias from any number of threads.

use chrono::{DateTime, TimeDelta, Utc};
use coax_types::{FromValue, TypeDesc, Value};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::convert;
use crate::error::Result;
use crate::options::ConvertOptions;

/// Conversion operations bound to a fixed option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Converter {
    options: ConvertOptions,
}

macro_rules! converter_aliases {
    ($(($to:ident, $force:ident, $force_or:ident, $ty:ty, $what:literal)),* $(,)?) => {
        $(
            #[doc = concat!("Convert any input value to ", $what, " under this converter's options.")]
            ///
            /// Empty input, or input with no meaningful equivalent, is an
            /// error.
            pub fn $to(&self, value: impl Into<Value>) -> Result<$ty> {
                self.to::<$ty>(value)
            }

            #[doc = concat!("Convert any input value to ", $what, ", substituting the zero value")]
            /// when the input is empty or has no meaningful equivalent.
            pub fn $force(&self, value: impl Into<Value>) -> Result<$ty> {
                self.force::<$ty>(value)
            }

            #[doc = concat!("Convert any input value to ", $what, ", substituting the provided")]
            /// default when the input is empty or has no meaningful
            /// equivalent.
            pub fn $force_or(&self, value: impl Into<Value>, default: $ty) -> Result<$ty> {
                self.force_or::<$ty>(value, default)
            }
        )*
    };
}

impl Converter {
    /// Preset with no leniency at all.
    pub const STRICT: Converter = Converter::new(ConvertOptions::STRICT);
    /// Baseline preset: empty strings count as empty.
    pub const DEFAULT: Converter = Converter::new(ConvertOptions::DEFAULT);
    /// Maximally forgiving preset: empty input yields zero values.
    pub const RELAXED: Converter = Converter::new(ConvertOptions::RELAXED);

    /// Create a converter bound to a custom option set.
    pub const fn new(options: ConvertOptions) -> Self {
        Converter { options }
    }

    /// The option set this converter applies to every call.
    pub const fn options(&self) -> ConvertOptions {
        self.options
    }

    /// Convert a value to a statically-known target type.
    pub fn to<T: FromValue>(&self, value: impl Into<Value>) -> Result<T> {
        convert::to(value, self.options)
    }

    /// Convert a value to the target described at runtime.
    pub fn to_value(&self, value: impl Into<Value>, target: &TypeDesc) -> Result<Value> {
        convert::to_value(value, target, self.options)
    }

    /// Convert a value to a statically-known target type, substituting the
    /// target's zero value for any conversion failure.
    pub fn force<T: FromValue>(&self, value: impl Into<Value>) -> Result<T> {
        convert::force(value, self.options)
    }

    /// Convert a value to a statically-known target type, substituting the
    /// supplied default for any conversion failure.
    pub fn force_or<T>(&self, value: impl Into<Value>, default: T) -> Result<T>
    where
        T: FromValue + Into<Value>,
    {
        convert::force_or(value, default, self.options)
    }

    /// Convert a value to the target described at runtime, substituting the
    /// supplied default (or the target's zero value) for any conversion
    /// failure.
    pub fn force_value(
        &self,
        value: impl Into<Value>,
        target: &TypeDesc,
        default: Option<Value>,
    ) -> Result<Value> {
        convert::force_value(value, target, self.options, default)
    }

    /// True if the value counts as empty under this converter's options.
    pub fn is_null(&self, value: &Value) -> bool {
        convert::null::is_null(value, self.options)
    }

    /// True if the value is numeric, or a string parseable as a number
    /// under this converter's options.
    pub fn is_numeric(&self, value: &Value) -> bool {
        convert::null::is_numeric(value, self.options)
    }

    /// Convert empty input to plain absence; pass everything else through.
    pub fn to_null(&self, value: impl Into<Value>) -> Value {
        convert::null::to_null(
            value.into(),
            self.options.contains(ConvertOptions::EMPTY_STRING_AS_NULL),
        )
    }

    /// Convert empty input to the explicit null marker; pass everything
    /// else through.
    pub fn to_db_null(&self, value: impl Into<Value>) -> Value {
        convert::null::to_db_null(
            value.into(),
            self.options.contains(ConvertOptions::EMPTY_STRING_AS_NULL),
        )
    }

    /// Convert a value equal to its runtime type's zero (or the supplied
    /// explicit default) to the null marker; pass everything else through.
    pub fn default_to_db_null(&self, value: impl Into<Value>, default: Option<&Value>) -> Value {
        convert::null::default_to_db_null(value.into(), default)
    }

    converter_aliases! {
        (to_bool, force_bool, force_bool_or, bool, "an equivalent boolean value"),
        (to_date, force_date, force_date_or, DateTime<Utc>, "an equivalent date-time value"),
        (to_dec, force_dec, force_dec_or, Decimal, "an equivalent exact decimal value"),
        (to_double, force_double, force_double_or, f64, "an equivalent double-precision floating point value"),
        (to_guid, force_guid, force_guid_or, Uuid, "an equivalent globally unique identifier"),
        (to_int, force_int, force_int_or, i32, "an equivalent 32-bit signed integer"),
        (to_long, force_long, force_long_or, i64, "an equivalent 64-bit signed integer"),
        (to_str, force_str, force_str_or, String, "an equivalent string value"),
        (to_timespan, force_timespan, force_timespan_or, TimeDelta, "an equivalent timespan value"),
    }
}

impl Default for Converter {
    fn default() -> Self {
        Converter::DEFAULT
    }
}
