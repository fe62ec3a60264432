//! Coax Types - dynamic value model and type descriptors
//!
//! This crate provides the runtime representation layer that the coax
//! conversion engine operates on:
//!
//! - **`Value`**: a closed enum over every dynamically-typed input the engine
//!   accepts, including the two empty markers (`Null` and `DbNull`)
//! - **`TypeDesc`**: runtime descriptors for conversion targets, including
//!   nullable wrappers and runtime-described enums
//! - **Type inspection**: the query set the engine uses to classify target
//!   types (numeric, integer, nullable, enumerable, instance-of, zero value)
//! - **`FromValue`**: the statically-typed seam that lets callers name a
//!   conversion target as a Rust type instead of a runtime descriptor
//!
//! ## Quick Start
//!
//! ```rust
//! use coax_types::{inspect, TypeDesc, Value};
//!
//! let value = Value::from("49");
//! assert_eq!(value.type_name(), "string");
//! assert!(inspect::is_instance_of(&TypeDesc::Str, &value));
//! assert_eq!(inspect::zero_value(&TypeDesc::I32), Value::I32(0));
//! ```

pub mod descriptor;
pub mod from_value;
pub mod inspect;
pub mod value;

pub use descriptor::{EnumType, TypeDesc};
pub use from_value::FromValue;
pub use inspect::Capability;
pub use value::Value;
