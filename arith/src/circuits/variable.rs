//! This module implements the addressing primitive of the circuit.
//! A [Variable] names either a cell of the assignment table (a column plus a row,
//! the row being absolute or a rotation from a gate's activation row) or a slot of
//! the private scratch store.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter};

/// The kinds of columns backed by the assignment table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum ColumnKind {
    /// Private, prover-only values
    Witness,
    /// Values known to both parties, provided per instance
    PublicInput,
    /// Values fixed by the circuit
    Constant,
    /// 0/1 columns switching gates on and off
    Selector,
}

impl ColumnKind {
    /// Short prefix used when printing variables
    fn prefix(&self) -> &'static str {
        match self {
            ColumnKind::Witness => "W",
            ColumnKind::PublicInput => "P",
            ColumnKind::Constant => "C",
            ColumnKind::Selector => "S",
        }
    }
}

/// A column of the assignment table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Column {
    pub kind: ColumnKind,
    pub index: usize,
}

impl Column {
    pub fn new(kind: ColumnKind, index: usize) -> Self {
        Column { kind, index }
    }

    pub fn witness(index: usize) -> Self {
        Self::new(ColumnKind::Witness, index)
    }

    pub fn public_input(index: usize) -> Self {
        Self::new(ColumnKind::PublicInput, index)
    }

    pub fn constant(index: usize) -> Self {
        Self::new(ColumnKind::Constant, index)
    }

    pub fn selector(index: usize) -> Self {
        Self::new(ColumnKind::Selector, index)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.index)
    }
}

/// Converts a table row to the signed representation used by [Variable].
///
/// # Panics
///
/// Will panic if `row` does not fit in an `i32`.
pub(crate) fn signed_row(row: usize) -> i32 {
    i32::try_from(row).expect("row index does not fit in a rotation")
}

/// A reference to a value of the circuit.
///
/// Scratch variables resolve against the private scratch store: they never
/// appear in gates or copy constraints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Variable {
    /// A cell of the assignment table. When `relative` is set, `row` is a
    /// rotation from the row a gate is activated on; otherwise it is an
    /// absolute row index.
    Cell {
        column: Column,
        #[cfg_attr(test, proptest(strategy = "-4096i32..4096"))]
        row: i32,
        relative: bool,
    },
    /// A slot of the private scratch store.
    Scratch(usize),
}

impl Variable {
    /// A cell at an absolute row
    pub fn cell(column: Column, row: usize) -> Self {
        Variable::Cell {
            column,
            row: signed_row(row),
            relative: false,
        }
    }

    /// A cell at a rotation from the activation row of a gate
    pub fn rotation(column: Column, rotation: i32) -> Self {
        Variable::Cell {
            column,
            row: rotation,
            relative: true,
        }
    }

    pub fn witness(index: usize, row: usize) -> Self {
        Self::cell(Column::witness(index), row)
    }

    pub fn witness_rel(index: usize, rotation: i32) -> Self {
        Self::rotation(Column::witness(index), rotation)
    }

    pub fn public_input(index: usize, row: usize) -> Self {
        Self::cell(Column::public_input(index), row)
    }

    pub fn public_input_rel(index: usize, rotation: i32) -> Self {
        Self::rotation(Column::public_input(index), rotation)
    }

    pub fn constant(index: usize, row: usize) -> Self {
        Self::cell(Column::constant(index), row)
    }

    pub fn constant_rel(index: usize, rotation: i32) -> Self {
        Self::rotation(Column::constant(index), rotation)
    }

    pub fn selector_rel(index: usize, rotation: i32) -> Self {
        Self::rotation(Column::selector(index), rotation)
    }

    pub fn scratch(id: usize) -> Self {
        Variable::Scratch(id)
    }

    /// The column this variable lives in, `None` for scratch slots.
    pub fn column(&self) -> Option<Column> {
        match self {
            Variable::Cell { column, .. } => Some(*column),
            Variable::Scratch(_) => None,
        }
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, Variable::Cell { relative: true, .. })
    }

    pub fn is_scratch(&self) -> bool {
        matches!(self, Variable::Scratch(_))
    }

    /// Shifts the row (or rotation) of a cell by `by`. Scratch slots are unchanged.
    pub fn rotated(&self, by: i32) -> Self {
        match *self {
            Variable::Cell {
                column,
                row,
                relative,
            } => Variable::Cell {
                column,
                row: row + by,
                relative,
            },
            scratch => scratch,
        }
    }

    /// Rewrites an absolute cell as a rotation from `base`.
    /// Relative cells and scratch slots are returned unchanged.
    pub fn relative_to(&self, base: usize) -> Self {
        match *self {
            Variable::Cell {
                column,
                row,
                relative: false,
            } => Variable::rotation(column, row - signed_row(base)),
            other => other,
        }
    }

    /// Resolves a rotation against the activation row `base`.
    /// Absolute cells and scratch slots are returned unchanged.
    ///
    /// # Panics
    ///
    /// Will panic if the rotation points before the first row.
    pub fn at_row(&self, base: usize) -> Self {
        match *self {
            Variable::Cell {
                column,
                row,
                relative: true,
            } => {
                let absolute = signed_row(base) + row;
                assert!(
                    absolute >= 0,
                    "rotation {row} from row {base} points before the first row"
                );
                Variable::Cell {
                    column,
                    row: absolute,
                    relative: false,
                }
            }
            other => other,
        }
    }

    /// The absolute row of a cell.
    ///
    /// # Panics
    ///
    /// Will panic on relative cells, scratch slots and negative rows.
    pub fn absolute_row(&self) -> usize {
        match *self {
            Variable::Cell {
                row,
                relative: false,
                ..
            } => usize::try_from(row).expect("negative absolute row"),
            Variable::Cell { relative: true, .. } => {
                panic!("{self} is relative and needs an activation row")
            }
            Variable::Scratch(_) => panic!("{self} is a scratch slot, not a table cell"),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Cell {
                column,
                row,
                relative: true,
            } => write!(f, "{column}({row:+})"),
            Variable::Cell { column, row, .. } => write!(f, "{column}@{row}"),
            Variable::Scratch(id) => write!(f, "${id}"),
        }
    }
}
