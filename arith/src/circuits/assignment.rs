//! This module implements the assignment table: the columns of concrete values
//! a prover fills in, plus the private scratch store.
//!
//! Every access goes through [AssignmentTable::read] and [AssignmentTable::write],
//! which hold the bound checks. Reads never grow storage; writes grow a column
//! (zero-filling the gap) up to the row they touch.

use crate::circuits::{
    params::ArithmetizationParams,
    variable::{Column, ColumnKind, Variable},
};
use arith_utils::serialization::SerdeAs;
use ark_ff::Field;
use ark_serialize::CanonicalSerialize;
use serde::Serialize;
use serde_with::serde_as;
use strum::IntoEnumIterator;

/// Columnar storage for the witness, public-input, constant and selector
/// columns of a circuit.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "F: CanonicalSerialize"))]
pub struct AssignmentTable<F> {
    #[serde_as(as = "Vec<Vec<SerdeAs>>")]
    witness: Vec<Vec<F>>,
    #[serde_as(as = "Vec<Vec<SerdeAs>>")]
    public_input: Vec<Vec<F>>,
    #[serde_as(as = "Vec<Vec<SerdeAs>>")]
    constant: Vec<Vec<F>>,
    #[serde_as(as = "Vec<Vec<SerdeAs>>")]
    selector: Vec<Vec<F>>,
    allocated_rows: usize,
    /// not arithmetized, hence not part of the serialized table
    #[serde(skip)]
    scratch: Vec<F>,
}

impl<F: Field> AssignmentTable<F> {
    /// Creates an empty table with the column counts of `params`.
    pub fn new(params: &ArithmetizationParams) -> Self {
        Self {
            witness: vec![vec![]; params.witness_columns],
            public_input: vec![vec![]; params.public_input_columns],
            constant: vec![vec![]; params.constant_columns],
            selector: vec![vec![]; params.selector_columns],
            allocated_rows: 0,
            scratch: vec![],
        }
    }

    fn columns(&self, kind: ColumnKind) -> &Vec<Vec<F>> {
        match kind {
            ColumnKind::Witness => &self.witness,
            ColumnKind::PublicInput => &self.public_input,
            ColumnKind::Constant => &self.constant,
            ColumnKind::Selector => &self.selector,
        }
    }

    fn columns_mut(&mut self, kind: ColumnKind) -> &mut Vec<Vec<F>> {
        match kind {
            ColumnKind::Witness => &mut self.witness,
            ColumnKind::PublicInput => &mut self.public_input,
            ColumnKind::Constant => &mut self.constant,
            ColumnKind::Selector => &mut self.selector,
        }
    }

    /// Current column counts. The selector count includes the columns added
    /// by enabling selectors past the initial count.
    pub fn params(&self) -> ArithmetizationParams {
        ArithmetizationParams::new(self.witness.len())
            .public_inputs(self.public_input.len())
            .constants(self.constant.len())
            .selectors(self.selector.len())
    }

    pub fn columns_amount(&self, kind: ColumnKind) -> usize {
        self.columns(kind).len()
    }

    /// 1 + the largest row ever written to a witness or constant column, 0 if none.
    pub fn allocated_rows(&self) -> usize {
        self.allocated_rows
    }

    /// Length of the longest column of any kind.
    pub fn rows_amount(&self) -> usize {
        ColumnKind::iter()
            .flat_map(|kind| self.columns(kind).iter().map(Vec::len))
            .max()
            .unwrap_or(0)
    }

    /// The values written so far to a column.
    ///
    /// # Panics
    ///
    /// Will panic if the column is not declared.
    pub fn column(&self, kind: ColumnKind, index: usize) -> &[F] {
        let columns = self.columns(kind);
        assert!(
            index < columns.len(),
            "{} is out of bounds: {} {kind} columns are declared",
            Column::new(kind, index),
            columns.len()
        );
        &columns[index]
    }

    /// Reads a cell.
    ///
    /// # Panics
    ///
    /// Will panic if the column is not declared or the row was never written.
    pub fn read(&self, kind: ColumnKind, index: usize, row: usize) -> F {
        let column = self.column(kind, index);
        assert!(
            row < column.len(),
            "reading row {row} of {}, which holds {} rows",
            Column::new(kind, index),
            column.len()
        );
        column[row]
    }

    /// Reads a cell, `None` where [Self::read] would panic.
    pub fn try_read(&self, kind: ColumnKind, index: usize, row: usize) -> Option<F> {
        self.columns(kind).get(index)?.get(row).copied()
    }

    /// Reads a cell of a declared column, treating rows past its end as zero,
    /// which is what the column holds once padded to the table height.
    ///
    /// # Panics
    ///
    /// Will panic if the column is not declared.
    pub fn padded_read(&self, kind: ColumnKind, index: usize, row: usize) -> F {
        self.column(kind, index)
            .get(row)
            .copied()
            .unwrap_or_else(F::zero)
    }

    /// Gives write access to a cell, growing its column if needed.
    /// Writing to a selector column past the current count adds selector columns.
    ///
    /// # Panics
    ///
    /// Will panic if a witness, public-input or constant column is not declared.
    pub fn write(&mut self, kind: ColumnKind, index: usize, row: usize) -> &mut F {
        if kind == ColumnKind::Selector && index >= self.selector.len() {
            self.selector.resize(index + 1, vec![]);
        }
        let declared = self.columns(kind).len();
        assert!(
            index < declared,
            "{} is out of bounds: {declared} {kind} columns are declared",
            Column::new(kind, index),
        );
        if matches!(kind, ColumnKind::Witness | ColumnKind::Constant) {
            self.allocated_rows = self.allocated_rows.max(row + 1);
        }
        let column = &mut self.columns_mut(kind)[index];
        if column.len() <= row {
            column.resize(row + 1, F::zero());
        }
        &mut column[row]
    }

    pub fn witness(&self, index: usize, row: usize) -> F {
        self.read(ColumnKind::Witness, index, row)
    }

    pub fn witness_mut(&mut self, index: usize, row: usize) -> &mut F {
        self.write(ColumnKind::Witness, index, row)
    }

    pub fn public_input(&self, index: usize, row: usize) -> F {
        self.read(ColumnKind::PublicInput, index, row)
    }

    pub fn public_input_mut(&mut self, index: usize, row: usize) -> &mut F {
        self.write(ColumnKind::PublicInput, index, row)
    }

    pub fn constant(&self, index: usize, row: usize) -> F {
        self.read(ColumnKind::Constant, index, row)
    }

    pub fn constant_mut(&mut self, index: usize, row: usize) -> &mut F {
        self.write(ColumnKind::Constant, index, row)
    }

    pub fn selector(&self, index: usize, row: usize) -> F {
        self.read(ColumnKind::Selector, index, row)
    }

    pub fn selector_mut(&mut self, index: usize, row: usize) -> &mut F {
        self.write(ColumnKind::Selector, index, row)
    }

    pub fn enable_selector(&mut self, index: usize, row: usize) {
        *self.selector_mut(index, row) = F::one();
    }

    /// Enables a selector on rows `begin, begin + step, ...` below `end`.
    ///
    /// # Panics
    ///
    /// Will panic if `step` is zero.
    pub fn enable_selector_range(&mut self, index: usize, begin: usize, end: usize, step: usize) {
        assert!(step > 0, "selector ranges need a positive step");
        for row in (begin..end).step_by(step) {
            self.enable_selector(index, row);
        }
    }

    /// Whether a selector is one at a row. Unwritten cells are zero.
    pub fn is_selector_enabled(&self, index: usize, row: usize) -> bool {
        self.try_read(ColumnKind::Selector, index, row)
            .map_or(false, |value| value.is_one())
    }

    /// Reads a scratch slot.
    ///
    /// # Panics
    ///
    /// Will panic if the slot was never written.
    pub fn scratch(&self, id: usize) -> F {
        assert!(
            id < self.scratch.len(),
            "reading scratch slot {id}, but only {} slots exist",
            self.scratch.len()
        );
        self.scratch[id]
    }

    /// Gives write access to a scratch slot, growing the store if needed.
    pub fn scratch_mut(&mut self, id: usize) -> &mut F {
        if self.scratch.len() <= id {
            self.scratch.resize(id + 1, F::zero());
        }
        &mut self.scratch[id]
    }

    pub fn scratch_len(&self) -> usize {
        self.scratch.len()
    }

    pub fn clear_scratch(&mut self) {
        self.scratch.clear();
    }

    pub fn resize_scratch(&mut self, len: usize) {
        self.scratch.resize(len, F::zero());
    }

    /// Fetches the value of an absolute cell or a scratch slot.
    ///
    /// # Panics
    ///
    /// Will panic on relative cells and on cells [Self::read] rejects.
    pub fn var_value(&self, variable: &Variable) -> F {
        match variable {
            Variable::Scratch(id) => self.scratch(*id),
            Variable::Cell { column, .. } => {
                self.read(column.kind, column.index, variable.absolute_row())
            }
        }
    }

    /// Write access to the location a variable denotes.
    pub fn var_mut(&mut self, variable: &Variable) -> &mut F {
        match variable {
            Variable::Scratch(id) => self.scratch_mut(*id),
            Variable::Cell { column, .. } => {
                self.write(column.kind, column.index, variable.absolute_row())
            }
        }
    }

    pub fn assign(&mut self, variable: &Variable, value: F) {
        *self.var_mut(variable) = value;
    }

    /// Fetches a variable as seen by a gate activated at `row`.
    pub fn resolve_at(&self, variable: &Variable, row: usize) -> F {
        self.var_value(&variable.at_row(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;

    fn table() -> AssignmentTable<Fr> {
        AssignmentTable::new(&ArithmetizationParams::new(3).public_inputs(1).constants(1))
    }

    #[test]
    fn write_grows_and_zero_fills() {
        let mut table = table();
        *table.witness_mut(2, 4) = Fr::from(7u64);
        assert_eq!(table.allocated_rows(), 5);
        for row in 0..4 {
            assert_eq!(table.witness(2, row), Fr::from(0u64));
        }
        assert_eq!(table.witness(2, 4), Fr::from(7u64));
        assert_eq!(table.column(ColumnKind::Witness, 0).len(), 0);
    }

    #[test]
    fn public_inputs_and_selectors_do_not_allocate_rows() {
        let mut table = table();
        *table.public_input_mut(0, 9) = Fr::from(1u64);
        table.enable_selector(0, 12);
        assert_eq!(table.allocated_rows(), 0);
        assert_eq!(table.rows_amount(), 13);

        *table.constant_mut(0, 2) = Fr::from(1u64);
        assert_eq!(table.allocated_rows(), 3);
    }

    #[test]
    fn selectors_grow_on_demand() {
        let mut table = table();
        assert_eq!(table.columns_amount(ColumnKind::Selector), 0);
        table.enable_selector_range(2, 1, 8, 3);
        assert_eq!(table.columns_amount(ColumnKind::Selector), 3);
        let enabled: Vec<_> = (0..8).filter(|&r| table.is_selector_enabled(2, r)).collect();
        assert_eq!(enabled, vec![1, 4, 7]);
        assert!(!table.is_selector_enabled(0, 1));
    }

    #[test]
    fn scratch_is_independent() {
        let mut table = table();
        *table.witness_mut(0, 1) = Fr::from(5u64);
        let before = table.clone();

        table.assign(&Variable::scratch(10), Fr::from(42u64));
        assert_eq!(table.scratch(10), Fr::from(42u64));
        assert_eq!(table.scratch_len(), 11);
        assert_eq!(table.allocated_rows(), before.allocated_rows());
        for kind in ColumnKind::iter() {
            for index in 0..before.columns_amount(kind) {
                assert_eq!(table.column(kind, index), before.column(kind, index));
            }
        }

        table.clear_scratch();
        assert_eq!(table.scratch_len(), 0);
        table.resize_scratch(4);
        assert_eq!(table.scratch(3), Fr::from(0u64));
    }

    #[test]
    fn resolve_relative_variables() {
        let mut table = table();
        table.assign(&Variable::witness(1, 6), Fr::from(9u64));
        let v = Variable::witness_rel(1, 1);
        assert_eq!(table.resolve_at(&v, 5), Fr::from(9u64));
        assert_eq!(table.try_read(ColumnKind::Witness, 1, 7), None);
        assert_eq!(table.padded_read(ColumnKind::Witness, 1, 7), Fr::from(0u64));
    }

    #[test]
    #[should_panic(expected = "which holds 0 rows")]
    fn read_never_grows() {
        let table = table();
        table.witness(0, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn undeclared_witness_column() {
        let mut table = table();
        table.witness_mut(3, 0);
    }

    #[test]
    #[should_panic(expected = "needs an activation row")]
    fn relative_variables_need_a_row() {
        let table = table();
        table.var_value(&Variable::witness_rel(0, 0));
    }
}
