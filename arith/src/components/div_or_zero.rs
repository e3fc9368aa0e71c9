//! Division returning zero on a zero divisor.
//!
//! Layout (one row)
//!
//! | col | value          |
//! | --- | -------------- |
//! |   0 | `x`     (copy) |
//! |   1 | `y`     (copy) |
//! |   2 | `z`            |
//! |   3 | `y_inv`        |
//!
//! Constraints
//!
//!   1) y * (y * y_inv - 1) = 0
//!   2) y_inv * (y * y_inv - 1) = 0
//!   3) z - x * y_inv = 0
//!
//! The first two force `y_inv` to be the inverse of `y`, or zero when `y` is.

use super::{
    witness_cell, witness_expr, BinaryInput, Component, ComponentLayout, Manifest, ManifestParam,
    ScalarResult,
};
use crate::circuits::{
    assignment::AssignmentTable, constraints::Circuit, expr::Expr, gate::GateConstraints,
};
use arith_utils::FieldHelpers;
use ark_ff::Field;
use std::marker::PhantomData;

pub struct DivOrZero<F> {
    layout: ComponentLayout,
    _marker: PhantomData<F>,
}

impl<F: Field> DivOrZero<F> {
    /// # Panics
    ///
    /// Will panic if `layout` does not satisfy the manifest.
    pub fn new(layout: ComponentLayout) -> Self {
        <Self as Component<F>>::manifest().check(&layout);
        Self {
            layout,
            _marker: PhantomData,
        }
    }
}

impl<F: Field> Component<F> for DivOrZero<F> {
    type Input = BinaryInput;
    type Output = ScalarResult;

    fn manifest() -> Manifest {
        Manifest::new(ManifestParam::Single(4))
    }

    fn layout(&self) -> &ComponentLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        1
    }

    fn gates(&self) -> Vec<GateConstraints<F>> {
        let w = |i| witness_expr(&self.layout, i, 0);
        let (x, y, z, y_inv) = (w(0), w(1), w(2), w(3));
        let unit = y.clone() * y_inv.clone() - Expr::one();
        vec![GateConstraints::Polynomial(vec![
            y * unit.clone(),
            y_inv.clone() * unit,
            z - x * y_inv,
        ])]
    }

    fn result(&self, start_row: usize) -> ScalarResult {
        ScalarResult {
            output: witness_cell(&self.layout, 2, start_row),
        }
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &BinaryInput,
        start_row: usize,
    ) -> ScalarResult {
        let x = table.var_value(&input.x);
        let y = table.var_value(&input.y);
        let y_inv = y.inv_or_zero();
        for (i, value) in [x, y, x * y_inv, y_inv].into_iter().enumerate() {
            table.assign(&witness_cell(&self.layout, i, start_row), value);
        }
        self.result(start_row)
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        _table: &AssignmentTable<F>,
        input: &BinaryInput,
        start_row: usize,
    ) {
        circuit.add_copy_constraint(witness_cell(&self.layout, 0, start_row), input.x);
        circuit.add_copy_constraint(witness_cell(&self.layout, 1, start_row), input.y);
    }
}
