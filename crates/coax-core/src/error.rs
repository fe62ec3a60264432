//! Error types for the coax conversion engine
//!
//! This module defines the conversion error taxonomy, using thiserror for
//! ergonomic error definitions and anyhow to carry wrapped parse failures.
//!
//! The taxonomy matters to callers: `NullConversion` and `InvalidCast` are
//! the two conversion-failure kinds that `force` absorbs, while `Argument`
//! marks programmer misuse and always surfaces.

use coax_types::{TypeDesc, Value};
use thiserror::Error;

/// Main error type for conversion operations
#[derive(Error, Debug)]
pub enum Error {
    /// An empty input targeted a non-nullable type and the options did not
    /// permit default substitution.
    #[error("Null conversion failed: empty input cannot convert to non-nullable type {target}")]
    NullConversion { target: String },

    /// A non-empty value could not be converted to the target type by any
    /// strategy.
    #[error("Invalid cast from {source_type} to {target}: {message}")]
    InvalidCast {
        source_type: String,
        target: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Programmer misuse, such as a malformed target descriptor. Never part
    /// of the conversion decision table and never absorbed by `force`.
    #[error("Argument error: {message}")]
    Argument { message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for the two conversion-failure kinds that `force` substitutes a
    /// default for; false for programmer errors.
    pub fn is_conversion_failure(&self) -> bool {
        matches!(self, Error::NullConversion { .. } | Error::InvalidCast { .. })
    }

    pub(crate) fn null_conversion(target: &TypeDesc) -> Self {
        Error::NullConversion {
            target: target.to_string(),
        }
    }

    pub(crate) fn invalid_cast(value: &Value, target: &TypeDesc, message: impl Into<String>) -> Self {
        Error::InvalidCast {
            source_type: value.type_name().to_string(),
            target: target.to_string(),
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn invalid_cast_from(
        value: &Value,
        target: &TypeDesc,
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Error::InvalidCast {
            source_type: value.type_name().to_string(),
            target: target.to_string(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Error::Argument {
            message: message.into(),
        }
    }
}
