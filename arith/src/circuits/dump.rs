//! Human-readable dump of an assignment table, for debugging and for tools
//! that read tables row by row.
//!
//! The first line is `rows_amount witness public_input constant selector`
//! (the row count then the column count of each kind). Each following line is
//! one row: the values of each kind separated by spaces, kinds separated by
//! ` | `.

use crate::circuits::{assignment::AssignmentTable, variable::ColumnKind};
use arith_utils::FieldHelpers;
use ark_ff::PrimeField;
use itertools::Itertools;
use std::io::{Result as IoResult, Write};
use strum::IntoEnumIterator;

/// How values are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DumpFormat {
    /// Hex without leading zeros
    Compact,
    /// Hex padded to the byte width of the field
    FixedWidth,
}

impl DumpFormat {
    fn render<F: PrimeField>(&self, value: &F) -> String {
        match self {
            DumpFormat::Compact => value.to_hex_compact(),
            DumpFormat::FixedWidth => value.to_hex_be(),
        }
    }
}

/// Writes the table to `writer`, padding every column with zeros to the
/// table height.
pub fn print_assignment_table<F: PrimeField, W: Write>(
    table: &AssignmentTable<F>,
    writer: &mut W,
    format: DumpFormat,
) -> IoResult<()> {
    let rows = table.rows_amount();
    let counts = ColumnKind::iter()
        .map(|kind| table.columns_amount(kind))
        .join(" ");
    writeln!(writer, "{rows} {counts}")?;

    for row in 0..rows {
        let line = ColumnKind::iter()
            .map(|kind| {
                (0..table.columns_amount(kind))
                    .map(|index| format.render(&table.padded_read(kind, index, row)))
                    .join(" ")
            })
            .join(" | ");
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
