//! Range check of one value through a lookup into a range subtable.
//!
//! Layout: witness column 0 holds `x` (copy) on one row.

use super::{
    witness_cell, witness_expr, Component, ComponentLayout, Manifest, ManifestParam,
    ScalarResult, UnaryInput,
};
use crate::circuits::{
    assignment::AssignmentTable,
    constraints::Circuit,
    gate::{GateConstraints, LookupConstraint},
};
use ark_ff::Field;
use std::marker::PhantomData;

/// The subtable used by [RangeCheck::new].
pub const DEFAULT_RANGE_TABLE: &str = "range_8/full";

pub struct RangeCheck<F> {
    layout: ComponentLayout,
    table: String,
    _marker: PhantomData<F>,
}

impl<F: Field> RangeCheck<F> {
    /// A check against [DEFAULT_RANGE_TABLE].
    pub fn new(layout: ComponentLayout) -> Self {
        Self::with_table(layout, DEFAULT_RANGE_TABLE)
    }

    /// A check against any single-column subtable, named `table/subtable`.
    ///
    /// # Panics
    ///
    /// Will panic if `layout` does not satisfy the manifest.
    pub fn with_table(layout: ComponentLayout, table: impl Into<String>) -> Self {
        <Self as Component<F>>::manifest().check(&layout);
        Self {
            layout,
            table: table.into(),
            _marker: PhantomData,
        }
    }
}

impl<F: Field> Component<F> for RangeCheck<F> {
    type Input = UnaryInput;
    type Output = ScalarResult;

    fn manifest() -> Manifest {
        Manifest::new(ManifestParam::Single(1))
    }

    fn layout(&self) -> &ComponentLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        1
    }

    fn gates(&self) -> Vec<GateConstraints<F>> {
        vec![GateConstraints::Lookup(vec![LookupConstraint::new(
            self.table.clone(),
            vec![witness_expr(&self.layout, 0, 0)],
        )])]
    }

    fn result(&self, start_row: usize) -> ScalarResult {
        ScalarResult {
            output: witness_cell(&self.layout, 0, start_row),
        }
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &UnaryInput,
        start_row: usize,
    ) -> ScalarResult {
        let x = table.var_value(&input.x);
        table.assign(&witness_cell(&self.layout, 0, start_row), x);
        self.result(start_row)
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        _table: &AssignmentTable<F>,
        input: &UnaryInput,
        start_row: usize,
    ) {
        circuit.add_copy_constraint(witness_cell(&self.layout, 0, start_row), input.x);
    }
}
