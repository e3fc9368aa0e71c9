//! This module implements the error types of the engine.
//!
//! Misuse of the building API (out of bounds indices, malformed copy
//! constraints, layouts that do not satisfy a manifest) panics instead: those
//! are bugs in circuit construction code, not runtime conditions.

use thiserror::Error;

/// Errors that can arise when configuring a build
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a circuit needs at least one witness column")]
    NoWitnessColumns,

    #[error("the configuration could not be parsed: {0}")]
    Parse(String),
}

/// Errors reported by the satisfiability check of a finished circuit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    #[error("constraint {constraint} of the gate on selector {selector} does not hold at row {row}")]
    UnsatisfiedConstraint {
        selector: usize,
        constraint: usize,
        row: usize,
    },

    #[error("the copy constraint {0} = {1} does not hold")]
    CopyConstraintViolated(String, String),

    #[error("the lookup on selector {selector} at row {row} is not a row of {table}")]
    ValueNotInTable {
        selector: usize,
        row: usize,
        table: String,
    },

    #[error("the circuit references an unknown lookup table: {0}")]
    Lookup(#[from] LookupError),

    #[error("{variable} leaves the assignment table when activated at row {row}")]
    RotationOutOfTable { variable: String, row: usize },

    #[error("{variable} lies past the {height} rows of the assignment table")]
    CellOutOfTable { variable: String, height: usize },
}

/// Errors that can arise when resolving lookup tables
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no lookup table named {0}")]
    UnknownTable(String),

    #[error("lookup table {table} has no subtable named {subtable}")]
    UnknownSubtable { table: String, subtable: String },

    #[error("the name {0} is not of the form table/subtable")]
    MalformedName(String),

    #[error("subtable {subtable} of {table} references column {column}, but the table has {columns} columns")]
    ColumnOutOfTable {
        table: String,
        subtable: String,
        column: usize,
        columns: usize,
    },

    #[error("subtable {subtable} of {table} ends at row {end}, but the table has {rows} rows")]
    RowsOutOfTable {
        table: String,
        subtable: String,
        end: usize,
        rows: usize,
    },
}
