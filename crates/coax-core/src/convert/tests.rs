//! Decision-table tests for the conversion engine
//!
//! Exercises every branch of the decision table across option permutations:
//! empty handling, identity, nullable unwrapping, string parsing with hex
//! gating, enum names, native scalar conversions, and the strict/forcing
//! error split.

use chrono::{TimeDelta, TimeZone, Utc};
use coax_types::{EnumType, TypeDesc, Value};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::convert;
use crate::error::{Error, Result};
use crate::options::ConvertOptions;

static SAMPLE: EnumType = EnumType {
    name: "Sample",
    underlying: TypeDesc::I16,
    members: &[("One", 1), ("FortyNine", 49)],
};

/// All distinct inputs that should convert to the integer 49.
fn inputs_49() -> Vec<Value> {
    vec![
        Value::U8(49),
        Value::U16(49),
        Value::I64(49),
        Value::F64(49.0),
        Value::Decimal(Decimal::from(49)),
        Value::from("49"),
        Value::from("4.9e+1"),
        Value::Enum(&SAMPLE, 49),
    ]
}

fn empty_inputs() -> Vec<Value> {
    vec![Value::Null, Value::DbNull]
}

/// Option permutations mirroring the engine's leniency axes: base flags,
/// forcing on/off, explicit default present/absent.
fn permutations(default: Value) -> Vec<(ConvertOptions, bool, Option<Value>)> {
    let flag_sets = [
        ConvertOptions::STRICT,
        ConvertOptions::EMPTY_STRING_AS_NULL,
        ConvertOptions::NULL_TO_VALUE_DEFAULT,
    ];
    let mut all = Vec::new();
    for options in flag_sets {
        all.push((options, false, None));
        all.push((options, true, None));
        all.push((options, true, Some(default.clone())));
    }
    all
}

fn run(
    value: Value,
    target: &TypeDesc,
    options: ConvertOptions,
    forcing: bool,
    default: Option<Value>,
) -> Result<Value> {
    if forcing {
        convert::force_value(value, target, options, default)
    } else {
        convert::to_value(value, target, options)
    }
}

#[test]
fn empty_input_for_nullable_returns_null_under_every_permutation() {
    let target = TypeDesc::nullable(TypeDesc::I32);
    for (options, forcing, default) in permutations(Value::I32(342)) {
        for input in empty_inputs() {
            let result = run(input, &target, options, forcing, default.clone()).unwrap();
            assert_eq!(result, Value::Null);
        }
    }
    // Empty string counts once the flag is in play.
    let result = convert::to_value("", &target, ConvertOptions::EMPTY_STRING_AS_NULL).unwrap();
    assert_eq!(result, Value::Null);
}

#[test]
fn identity_is_preserved_under_every_permutation() {
    for (options, forcing, default) in permutations(Value::from("a different string")) {
        let result = run(
            Value::from("foo bar baz"),
            &TypeDesc::Str,
            options,
            forcing,
            default,
        )
        .unwrap();
        assert_eq!(result, Value::from("foo bar baz"));
    }
    for (options, forcing, default) in permutations(Value::I32(923)) {
        let result = run(Value::I32(42), &TypeDesc::I32, options, forcing, default).unwrap();
        assert_eq!(result, Value::I32(42));
    }
}

#[test]
fn non_empty_input_for_nullable_returns_underlying_value() {
    let target = TypeDesc::nullable(TypeDesc::I32);
    for (options, forcing, default) in permutations(Value::I32(342)) {
        for input in inputs_49() {
            let result = run(input, &target, options, forcing, default.clone()).unwrap();
            assert_eq!(result, Value::I32(49));
        }
    }
}

#[test]
fn non_empty_input_for_nullable_enum_returns_underlying_value() {
    let target = TypeDesc::nullable(TypeDesc::Enum(&SAMPLE));
    for (options, forcing, default) in permutations(Value::Enum(&SAMPLE, 1)) {
        for input in inputs_49() {
            let result = run(input, &target, options, forcing, default.clone()).unwrap();
            assert_eq!(result, Value::Enum(&SAMPLE, 49));
        }
    }
}

#[test]
fn null_to_value_default_substitutes_zero() {
    let options = ConvertOptions::NULL_TO_VALUE_DEFAULT;
    let with_empty_string = options | ConvertOptions::EMPTY_STRING_AS_NULL;

    assert_eq!(convert::to_value(Value::Null, &TypeDesc::I32, options).unwrap(), Value::I32(0));
    assert_eq!(convert::to_value(Value::DbNull, &TypeDesc::I32, options).unwrap(), Value::I32(0));
    assert_eq!(convert::to_value("", &TypeDesc::I32, with_empty_string).unwrap(), Value::I32(0));

    let enum_target = TypeDesc::Enum(&SAMPLE);
    assert_eq!(
        convert::to_value(Value::Null, &enum_target, options).unwrap(),
        Value::Enum(&SAMPLE, 0)
    );
    assert_eq!(
        convert::to_value("", &enum_target, with_empty_string).unwrap(),
        Value::Enum(&SAMPLE, 0)
    );
}

#[test]
fn null_to_value_default_prefers_explicit_default() {
    let options = ConvertOptions::NULL_TO_VALUE_DEFAULT;
    for input in empty_inputs() {
        let result =
            convert::force_value(input, &TypeDesc::I32, options, Some(Value::I32(42))).unwrap();
        assert_eq!(result, Value::I32(42));
    }
    let result = convert::force_value(
        Value::Null,
        &TypeDesc::Enum(&SAMPLE),
        options,
        Some(Value::Enum(&SAMPLE, 1)),
    )
    .unwrap();
    assert_eq!(result, Value::Enum(&SAMPLE, 1));
}

#[test]
fn forcing_substitutes_for_empty_input_even_without_the_flag() {
    for input in empty_inputs() {
        assert_eq!(
            convert::force_value(input.clone(), &TypeDesc::I32, ConvertOptions::STRICT, None)
                .unwrap(),
            Value::I32(0)
        );
        assert_eq!(
            convert::force_value(
                input,
                &TypeDesc::I32,
                ConvertOptions::STRICT,
                Some(Value::I32(42))
            )
            .unwrap(),
            Value::I32(42)
        );
    }
    assert_eq!(
        convert::force_value("", &TypeDesc::I32, ConvertOptions::EMPTY_STRING_AS_NULL, None)
            .unwrap(),
        Value::I32(0)
    );
}

#[test]
fn empty_input_to_value_type_raises_null_conversion() {
    for input in empty_inputs() {
        let err = convert::to_value(input, &TypeDesc::I32, ConvertOptions::STRICT).unwrap_err();
        assert!(matches!(err, Error::NullConversion { .. }));
    }
    let err = convert::to_value("", &TypeDesc::I32, ConvertOptions::EMPTY_STRING_AS_NULL)
        .unwrap_err();
    assert!(matches!(err, Error::NullConversion { .. }));

    let err =
        convert::to_value(Value::Null, &TypeDesc::Enum(&SAMPLE), ConvertOptions::STRICT).unwrap_err();
    assert!(matches!(err, Error::NullConversion { .. }));
}

#[test]
fn forcing_substitutes_for_unconvertible_input() {
    let garbage = Value::Guid(Uuid::nil());
    assert_eq!(
        convert::force_value("", &TypeDesc::I32, ConvertOptions::STRICT, None).unwrap(),
        Value::I32(0)
    );
    assert_eq!(
        convert::force_value(garbage.clone(), &TypeDesc::I32, ConvertOptions::STRICT, None)
            .unwrap(),
        Value::I32(0)
    );
    assert_eq!(
        convert::force_value(
            garbage.clone(),
            &TypeDesc::I32,
            ConvertOptions::STRICT,
            Some(Value::I32(42))
        )
        .unwrap(),
        Value::I32(42)
    );
    assert_eq!(
        convert::force_value(garbage, &TypeDesc::Enum(&SAMPLE), ConvertOptions::STRICT, None)
            .unwrap(),
        Value::Enum(&SAMPLE, 0)
    );
}

#[test]
fn unconvertible_input_raises_invalid_cast() {
    let garbage = Value::Guid(Uuid::nil());
    // Empty string under strict options is not empty, just unparseable.
    let err = convert::to_value("", &TypeDesc::I32, ConvertOptions::STRICT).unwrap_err();
    assert!(matches!(err, Error::InvalidCast { .. }));

    let err = convert::to_value(garbage.clone(), &TypeDesc::I32, ConvertOptions::STRICT).unwrap_err();
    assert!(matches!(err, Error::InvalidCast { .. }));

    let err =
        convert::to_value(garbage, &TypeDesc::Enum(&SAMPLE), ConvertOptions::STRICT).unwrap_err();
    assert!(matches!(err, Error::InvalidCast { .. }));
}

#[test]
fn empty_string_scenario_table() {
    // The empty string is ordinary unparseable input under strict options,
    // null-like under the baseline, and a zero under the relaxed preset.
    assert_eq!(convert::to::<i32>("49", ConvertOptions::DEFAULT).unwrap(), 49);
    assert!(matches!(
        convert::to::<i32>("", ConvertOptions::STRICT),
        Err(Error::InvalidCast { .. })
    ));
    assert!(matches!(
        convert::to::<i32>("", ConvertOptions::DEFAULT),
        Err(Error::NullConversion { .. })
    ));
    assert_eq!(convert::to::<i32>("", ConvertOptions::RELAXED).unwrap(), 0);
}

#[test]
fn null_propagation_through_option_targets() {
    assert_eq!(
        convert::to::<Option<i32>>(Value::Null, ConvertOptions::STRICT).unwrap(),
        None
    );
    assert_eq!(
        convert::to::<Option<i32>>(Value::Null, ConvertOptions::RELAXED).unwrap(),
        None
    );
    assert!(matches!(
        convert::to::<i32>(Value::Null, ConvertOptions::STRICT),
        Err(Error::NullConversion { .. })
    ));
    assert_eq!(convert::to::<i32>(Value::Null, ConvertOptions::RELAXED).unwrap(), 0);
}

#[test]
fn hex_parsing_is_gated_per_flag() {
    let vb = ConvertOptions::DEFAULT | ConvertOptions::ALLOW_VB_HEX;
    let c_style = ConvertOptions::DEFAULT | ConvertOptions::ALLOW_0X_HEX;

    assert_eq!(convert::to::<i32>("&H31", vb).unwrap(), 49);
    assert_eq!(convert::to::<i32>(" &h31 ", vb).unwrap(), 49);
    assert_eq!(convert::to::<i32>("0x31", c_style).unwrap(), 49);
    assert!(matches!(
        convert::to::<i32>("&H31", ConvertOptions::DEFAULT),
        Err(Error::InvalidCast { .. })
    ));
    assert!(matches!(
        convert::to::<i32>("0x31", vb),
        Err(Error::InvalidCast { .. })
    ));
}

#[test]
fn enum_accepts_names_and_numbers() {
    let target = TypeDesc::Enum(&SAMPLE);
    let options = ConvertOptions::DEFAULT;

    assert_eq!(
        convert::to_value("FortyNine", &target, options).unwrap(),
        Value::Enum(&SAMPLE, 49)
    );
    assert_eq!(
        convert::to_value(Value::U8(49), &target, options).unwrap(),
        Value::Enum(&SAMPLE, 49)
    );
    assert_eq!(
        convert::to_value("49", &target, options).unwrap(),
        Value::Enum(&SAMPLE, 49)
    );
    // Undeclared values of the underlying kind are representable.
    assert_eq!(
        convert::to_value(Value::I32(7), &target, options).unwrap(),
        Value::Enum(&SAMPLE, 7)
    );
    // Names are case-sensitive.
    assert!(convert::to_value("fortynine", &target, options).is_err());
    // Hex applies to the numeric fallback.
    assert_eq!(
        convert::to_value("&H31", &target, options | ConvertOptions::ALLOW_VB_HEX).unwrap(),
        Value::Enum(&SAMPLE, 49)
    );
}

#[test]
fn enum_range_follows_the_underlying_kind() {
    // Sample is backed by i16; values outside that range are invalid.
    let err = convert::to_value(Value::I32(40_000), &TypeDesc::Enum(&SAMPLE), ConvertOptions::DEFAULT)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCast { .. }));
}

#[test]
fn enum_converts_to_numbers_and_strings() {
    let options = ConvertOptions::DEFAULT;
    assert_eq!(
        convert::to_value(Value::Enum(&SAMPLE, 49), &TypeDesc::I32, options).unwrap(),
        Value::I32(49)
    );
    assert_eq!(
        convert::to_value(Value::Enum(&SAMPLE, 49), &TypeDesc::Str, options).unwrap(),
        Value::from("FortyNine")
    );
    assert_eq!(
        convert::to_value(Value::Enum(&SAMPLE, 7), &TypeDesc::Str, options).unwrap(),
        Value::from("7")
    );
}

#[test]
fn numeric_narrowing_checks_ranges() {
    let options = ConvertOptions::DEFAULT;
    assert_eq!(
        convert::to::<u8>(Value::I64(255), options).unwrap(),
        255u8
    );
    assert!(matches!(
        convert::to::<u8>(Value::I64(300), options),
        Err(Error::InvalidCast { .. })
    ));
    assert!(matches!(
        convert::to::<u32>(Value::I32(-1), options),
        Err(Error::InvalidCast { .. })
    ));
    assert!(matches!(
        convert::to::<i64>(Value::U64(u64::MAX), options),
        Err(Error::InvalidCast { .. })
    ));
    // Floats round half-to-even on the way to integer targets.
    assert_eq!(convert::to::<i32>(Value::F64(49.9), options).unwrap(), 50);
    assert_eq!(convert::to::<i32>(Value::F64(4.5), options).unwrap(), 4);
}

#[test]
fn decimal_conversions() {
    let options = ConvertOptions::DEFAULT;
    // Plain base-10 text parses exactly, without a float intermediate.
    assert_eq!(
        convert::to::<Decimal>("49.5", options).unwrap(),
        Decimal::new(495, 1)
    );
    assert_eq!(
        convert::to::<Decimal>(Value::I64(49), options).unwrap(),
        Decimal::from(49)
    );
    assert_eq!(
        convert::to::<Decimal>("4.9e+1", options).unwrap(),
        Decimal::from(49)
    );
    assert_eq!(
        convert::to::<Decimal>("&H31", options | ConvertOptions::ALLOW_VB_HEX).unwrap(),
        Decimal::from(49)
    );
    // Fractional decimals round half-to-even toward integer targets.
    assert_eq!(
        convert::to::<i32>(Value::Decimal(Decimal::new(495, 1)), options).unwrap(),
        50
    );
    assert_eq!(
        convert::to::<String>(Value::Decimal(Decimal::new(495, 1)), options).unwrap(),
        "49.5"
    );
    assert!(convert::to::<Decimal>("garbage", options).is_err());
    assert_eq!(
        convert::force::<Decimal>("garbage", options).unwrap(),
        Decimal::ZERO
    );
    assert_eq!(
        convert::to::<Option<Decimal>>(Value::Null, options).unwrap(),
        None
    );
}

#[test]
fn bool_conversions() {
    let options = ConvertOptions::DEFAULT;
    assert!(convert::to::<bool>(" True ", options).unwrap());
    assert!(!convert::to::<bool>("false", options).unwrap());
    assert!(convert::to::<bool>(Value::I32(2), options).unwrap());
    assert!(!convert::to::<bool>(Value::F64(0.0), options).unwrap());
    assert!(convert::to::<bool>("yes", options).is_err());
    assert_eq!(convert::to::<i32>(Value::Bool(true), options).unwrap(), 1);
}

#[test]
fn string_rendering() {
    let options = ConvertOptions::DEFAULT;
    assert_eq!(convert::to::<String>(Value::I64(49), options).unwrap(), "49");
    assert_eq!(convert::to::<String>(Value::Bool(true), options).unwrap(), "true");
    let id = Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();
    assert_eq!(
        convert::to::<String>(Value::Guid(id), options).unwrap(),
        "6ba7b810-9dad-11d1-80b4-00c04fd430c8"
    );
    // Lists have no string strategy.
    assert!(convert::to::<String>(Value::List(vec![]), options).is_err());
}

#[test]
fn datetime_parsing() {
    let options = ConvertOptions::DEFAULT;
    let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    assert_eq!(
        convert::to::<chrono::DateTime<Utc>>("2024-01-15T10:30:00Z", options).unwrap(),
        expected
    );
    assert_eq!(
        convert::to::<chrono::DateTime<Utc>>("2024-01-15 10:30:00", options).unwrap(),
        expected
    );
    assert_eq!(
        convert::to::<chrono::DateTime<Utc>>("2024-01-15", options).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
    );
    assert!(convert::to::<chrono::DateTime<Utc>>("someday", options).is_err());
    assert!(convert::to::<chrono::DateTime<Utc>>(Value::I64(0), options).is_err());
}

#[test]
fn guid_parsing() {
    let options = ConvertOptions::DEFAULT;
    let id = Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();
    assert_eq!(
        convert::to::<Uuid>("6ba7b810-9dad-11d1-80b4-00c04fd430c8", options).unwrap(),
        id
    );
    assert!(convert::to::<Uuid>("not a guid", options).is_err());
    assert_eq!(
        convert::force::<Uuid>("not a guid", options).unwrap(),
        Uuid::nil()
    );
}

#[test]
fn timespan_parsing() {
    let options = ConvertOptions::DEFAULT;
    assert_eq!(
        convert::to::<TimeDelta>("02:30:00", options).unwrap(),
        TimeDelta::hours(2) + TimeDelta::minutes(30)
    );
    assert_eq!(
        convert::force::<TimeDelta>("not a timespan", options).unwrap(),
        TimeDelta::zero()
    );
}

#[test]
fn force_absorbs_exactly_what_to_raises() {
    let options = ConvertOptions::DEFAULT;
    let cases: Vec<(Value, TypeDesc)> = vec![
        (Value::Null, TypeDesc::I32),
        (Value::from(""), TypeDesc::I32),
        (Value::from("garbage"), TypeDesc::I32),
        (Value::Guid(Uuid::nil()), TypeDesc::Bool),
        (Value::I32(40_000), TypeDesc::Enum(&SAMPLE)),
    ];
    for (input, target) in cases {
        let strict = convert::to_value(input.clone(), &target, options);
        assert!(strict.as_ref().unwrap_err().is_conversion_failure());
        let forced =
            convert::force_value(input, &target, options, Some(Value::I32(42)));
        assert!(forced.is_ok());
    }
}

#[test]
fn typed_and_dynamic_entry_points_agree() {
    let options = ConvertOptions::DEFAULT;
    assert_eq!(
        Value::I32(convert::to::<i32>("49", options).unwrap()),
        convert::to_value("49", &TypeDesc::I32, options).unwrap()
    );
    assert_eq!(
        Value::I32(convert::force::<i32>("garbage", options).unwrap()),
        convert::force_value("garbage", &TypeDesc::I32, options, None).unwrap()
    );
    assert_eq!(convert::force_or::<i32>("garbage", 42, options).unwrap(), 42);
}

#[test]
fn free_aliases_match_primitives() {
    assert_eq!(
        convert::to_int("49").unwrap(),
        convert::to::<i32>("49", ConvertOptions::DEFAULT).unwrap()
    );
    assert_eq!(
        convert::to_long("49").unwrap(),
        convert::to::<i64>("49", ConvertOptions::DEFAULT).unwrap()
    );
    assert_eq!(
        convert::to_double("4.9e+1").unwrap(),
        convert::to::<f64>("4.9e+1", ConvertOptions::DEFAULT).unwrap()
    );
    assert_eq!(
        convert::to_dec("49.5").unwrap(),
        convert::to::<Decimal>("49.5", ConvertOptions::DEFAULT).unwrap()
    );
    assert_eq!(
        convert::force_dec(Value::Null).unwrap(),
        convert::force::<Decimal>(Value::Null, ConvertOptions::DEFAULT).unwrap()
    );
    assert_eq!(
        convert::to_str(Value::I64(49)).unwrap(),
        convert::to::<String>(Value::I64(49), ConvertOptions::DEFAULT).unwrap()
    );
    assert_eq!(
        convert::force_int(Value::Null).unwrap(),
        convert::force::<i32>(Value::Null, ConvertOptions::DEFAULT).unwrap()
    );
    assert_eq!(
        convert::force_int_or("garbage", 42).unwrap(),
        convert::force_or::<i32>("garbage", 42, ConvertOptions::DEFAULT).unwrap()
    );
    assert_eq!(
        convert::force_bool(Value::Null).unwrap(),
        convert::force::<bool>(Value::Null, ConvertOptions::DEFAULT).unwrap()
    );
    assert!(convert::to_bool(Value::Null).is_err());
    assert!(convert::to_guid("nope").is_err());
    assert_eq!(convert::force_timespan("nope").unwrap(), TimeDelta::zero());
}

#[test]
fn every_49_input_converts_to_int() {
    for input in inputs_49() {
        assert_eq!(
            convert::to::<i32>(input.clone(), ConvertOptions::DEFAULT).unwrap(),
            49,
            "input: {input:?}"
        );
    }
}
