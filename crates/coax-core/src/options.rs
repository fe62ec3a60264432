//! Conversion leniency policy
//!
//! `ConvertOptions` is an immutable flag set selecting how forgiving a
//! conversion is about empty inputs and extended numeric syntax. Flags
//! compose by bitwise OR; composing produces a new value, never a mutation.
//! No flag makes a conversion stricter than the empty set.

use bitflags::bitflags;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Leniency flags governing a conversion call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ConvertOptions: u32 {
        /// Treat an empty string input identically to absence/null.
        const EMPTY_STRING_AS_NULL = 1;
        /// Empty input converting to a non-nullable target yields that
        /// type's zero value instead of failing.
        const NULL_TO_VALUE_DEFAULT = 2;
        /// String inputs matching `&H<hex>` parse as integers.
        const ALLOW_VB_HEX = 4;
        /// String inputs matching `0x<hex>` parse as integers.
        const ALLOW_0X_HEX = 8;
    }
}

impl ConvertOptions {
    /// No leniency: empty input to a non-nullable target is an error, and
    /// empty strings are not treated as empty.
    pub const STRICT: ConvertOptions = ConvertOptions::empty();

    /// Baseline preset: empty strings count as empty.
    pub const DEFAULT: ConvertOptions = ConvertOptions::EMPTY_STRING_AS_NULL;

    /// Maximally forgiving preset: empty input yields the target's zero
    /// value rather than failing.
    pub const RELAXED: ConvertOptions = ConvertOptions::EMPTY_STRING_AS_NULL
        .union(ConvertOptions::NULL_TO_VALUE_DEFAULT);

    /// Both hex forms enabled.
    pub const ALLOW_HEX: ConvertOptions =
        ConvertOptions::ALLOW_VB_HEX.union(ConvertOptions::ALLOW_0X_HEX);
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions::DEFAULT
    }
}

/// Serialized as the raw flag bits, so option sets survive config files and
/// wire formats without naming individual flags.
impl Serialize for ConvertOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for ConvertOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u32::deserialize(deserializer)?;
        ConvertOptions::from_bits(bits)
            .ok_or_else(|| D::Error::custom(format!("unknown convert option bits: {bits:#x}")))
    }
}
