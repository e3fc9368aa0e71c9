#![doc = include_str!("../README.md")]
// Allow non_local_definitions from derive macros (proptest_derive)
// until upstream crates are updated.
#![allow(non_local_definitions)]

pub use arith_utils;

pub mod circuits;
pub mod components;
pub mod error;

pub mod prelude {
    //! The types most builds need.
    pub use crate::{
        circuits::{
            assignment::AssignmentTable,
            constraints::Circuit,
            expr::Expr,
            lookup::LookupLibrary,
            params::ArithmetizationParams,
            session::BuildSession,
            variable::{Column, ColumnKind, Variable},
        },
        components::{BinaryInput, Component, ComponentLayout, ScalarResult, UnaryInput},
    };
}

#[cfg(test)]
mod tests;
