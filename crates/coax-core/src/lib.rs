//! Coax Core - policy-driven dynamic value conversion
//!
//! This crate converts values of unknown or loosely-known runtime type (user
//! input, database cells, deserialized data) to a specified target type
//! under configurable leniency rules.
//!
//! # Main Components
//!
//! - **Conversion Engine**: one decision table behind two primitives, `to`
//!   (strict by policy) and `force` (absorbs conversion failures)
//! - **Conversion Policy**: [`ConvertOptions`] flags controlling empty-value
//!   treatment and extended numeric syntax
//! - **Converter**: preset and custom instances binding a policy to the
//!   engine
//! - **Empty-value helpers**: classification and transforms for the two
//!   empty markers
//!
//! # Example
//!
//! ```rust
//! use coax_core::{convert, ConvertOptions, Converter, Value};
//!
//! // Strict-by-policy conversion fails loudly...
//! assert_eq!(convert::to::<i32>("49", ConvertOptions::DEFAULT).unwrap(), 49);
//! assert!(convert::to::<i32>("not a number", ConvertOptions::DEFAULT).is_err());
//!
//! // ...while force substitutes a default instead.
//! assert_eq!(convert::force::<i32>("not a number", ConvertOptions::DEFAULT).unwrap(), 0);
//!
//! // Nullable targets absorb absence under every policy.
//! let parsed = Converter::RELAXED.to::<Option<i32>>(Value::Null).unwrap();
//! assert_eq!(parsed, None);
//! ```

pub mod convert;
pub mod converter;
pub mod error;
pub mod options;

// Re-export main types for convenience
pub use converter::Converter;
pub use error::{Error, Result};
pub use options::ConvertOptions;

// Re-export the value model so most callers need only this crate
pub use coax_types::{EnumType, FromValue, TypeDesc, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_reexported_surface() {
        let value = Value::from("49");
        let converted = convert::to_value(value, &TypeDesc::I32, ConvertOptions::DEFAULT).unwrap();
        assert_eq!(converted, Value::I32(49));
    }
}
