//! Utilities extending arkworks fields for the arithmetization engine.

pub mod field_helpers;
pub mod serialization;

pub use field_helpers::FieldHelpers;
