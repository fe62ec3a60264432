//! Type-specific conversion wrappers over the `to` and `force` primitives
//!
//! Pure sugar: each alias is exactly a `to::<T>` or `force::<T>` call under
//! the baseline options, generated from one table so the alias surface can
//! never drift from the engine. The alias tests assert that equivalence.

use chrono::{DateTime, TimeDelta, Utc};
use coax_types::Value;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::Result;
use crate::options::ConvertOptions;

macro_rules! convert_aliases {
    ($(($to:ident, $force:ident, $force_or:ident, $ty:ty, $what:literal)),* $(,)?) => {
        $(
            #[doc = concat!("Convert any input value to ", $what, " under the baseline options.")]
            ///
            /// Empty input, or input with no meaningful equivalent, is an
            /// error.
            pub fn $to(value: impl Into<Value>) -> Result<$ty> {
                super::to::<$ty>(value, ConvertOptions::DEFAULT)
            }

            #[doc = concat!("Convert any input value to ", $what, ", substituting the zero value")]
            /// when the input is empty or has no meaningful equivalent.
            pub fn $force(value: impl Into<Value>) -> Result<$ty> {
                super::force::<$ty>(value, ConvertOptions::DEFAULT)
            }

            #[doc = concat!("Convert any input value to ", $what, ", substituting the provided")]
            /// default when the input is empty or has no meaningful
            /// equivalent.
            pub fn $force_or(value: impl Into<Value>, default: $ty) -> Result<$ty> {
                super::force_or::<$ty>(value, default, ConvertOptions::DEFAULT)
            }
        )*
    };
}

convert_aliases! {
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
