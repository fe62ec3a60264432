//! Runtime type descriptors for conversion targets
//!
//! A `TypeDesc` names the shape a conversion should produce. Scalar kinds
//! mirror the variants of [`Value`](crate::Value); `Nullable` and `List`
//! wrap an inner descriptor; `Enum` points at a `'static` enum descriptor,
//! since enums are compile-time artifacts with a fixed member table.

use std::fmt;

/// Descriptor for a conversion target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDesc {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// Exact base-10 number.
    Decimal,
    Str,
    DateTime,
    Duration,
    Guid,
    /// An enum-backed integer type described at runtime.
    Enum(&'static EnumType),
    /// A target that can represent "no value" (`Option<T>` shaped).
    Nullable(Box<TypeDesc>),
    /// A homogeneous sequence of the element type.
    List(Box<TypeDesc>),
}

impl TypeDesc {
    /// Wrap a descriptor in a nullable layer.
    pub fn nullable(inner: TypeDesc) -> TypeDesc {
        TypeDesc::Nullable(Box::new(inner))
    }

    /// Wrap a descriptor in a list layer.
    pub fn list(element: TypeDesc) -> TypeDesc {
        TypeDesc::List(Box::new(element))
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Bool => write!(f, "bool"),
            TypeDesc::I8 => write!(f, "i8"),
            TypeDesc::I16 => write!(f, "i16"),
            TypeDesc::I32 => write!(f, "i32"),
            TypeDesc::I64 => write!(f, "i64"),
            TypeDesc::U8 => write!(f, "u8"),
            TypeDesc::U16 => write!(f, "u16"),
            TypeDesc::U32 => write!(f, "u32"),
            TypeDesc::U64 => write!(f, "u64"),
            TypeDesc::F32 => write!(f, "f32"),
            TypeDesc::F64 => write!(f, "f64"),
            TypeDesc::Decimal => write!(f, "decimal"),
            TypeDesc::Str => write!(f, "string"),
            TypeDesc::DateTime => write!(f, "datetime"),
            TypeDesc::Duration => write!(f, "duration"),
            TypeDesc::Guid => write!(f, "guid"),
            TypeDesc::Enum(ty) => write!(f, "{}", ty.name),
            TypeDesc::Nullable(inner) => write!(f, "nullable<{}>", inner),
            TypeDesc::List(element) => write!(f, "list<{}>", element),
        }
    }
}

/// Runtime description of an enum-backed integer type.
///
/// Members pair a declared name with its underlying value. The underlying
/// kind must be one of the integer descriptors; the engine rejects
/// descriptors that violate this as a programmer error.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumType {
    /// Type name, used in error messages and string rendering.
    pub name: &'static str,
    /// Underlying integer kind (one of the integer `TypeDesc` variants).
    pub underlying: TypeDesc,
    /// Declared members as `(name, value)` pairs.
    pub members: &'static [(&'static str, i64)],
}

impl EnumType {
    /// Look up the underlying value of a declared member name.
    ///
    /// Matching is case-sensitive and exact.
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.members
            .iter()
            .find(|(member, _)| *member == name)
            .map(|(_, value)| *value)
    }

    /// Look up the declared name for an underlying value, if one exists.
    pub fn name_of(&self, value: i64) -> Option<&'static str> {
        self.members
            .iter()
            .find(|(_, member)| *member == value)
            .map(|(name, _)| *name)
    }
}
