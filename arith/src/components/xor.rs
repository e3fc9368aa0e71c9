//! 4-bit xor through a lookup into the `xor_4/full` table.
//!
//! Layout (one row): witness columns `[a (copy), b (copy), a ^ b]`.

use super::{
    witness_cell, witness_expr, BinaryInput, Component, ComponentLayout, Manifest, ManifestParam,
    ScalarResult,
};
use crate::circuits::{
    assignment::AssignmentTable,
    constraints::Circuit,
    gate::{GateConstraints, LookupConstraint},
};
use arith_utils::FieldHelpers;
use ark_ff::PrimeField;
use std::marker::PhantomData;

pub const XOR_TABLE: &str = "xor_4/full";

pub struct XorLookup<F> {
    layout: ComponentLayout,
    _marker: PhantomData<F>,
}

impl<F: PrimeField> XorLookup<F> {
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

impl<F: PrimeField> Component<F> for XorLookup<F> {
    type Input = BinaryInput;
    type Output = ScalarResult;

    fn manifest() -> Manifest {
        Manifest::new(ManifestParam::Single(3))
    }

    fn layout(&self) -> &ComponentLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        1
    }

    fn gates(&self) -> Vec<GateConstraints<F>> {
        let input = (0..3).map(|i| witness_expr(&self.layout, i, 0)).collect();
        vec![GateConstraints::Lookup(vec![LookupConstraint::new(XOR_TABLE, input)])]
    }

    fn result(&self, start_row: usize) -> ScalarResult {
        ScalarResult {
            output: witness_cell(&self.layout, 2, start_row),
        }
    }

    /// Operands wider than 4 bits produce a row missing from the table.
    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &BinaryInput,
        start_row: usize,
    ) -> ScalarResult {
        let a = table.var_value(&input.x);
        let b = table.var_value(&input.y);
        let c = F::from(a.to_u64_lossy() ^ b.to_u64_lossy());
        for (i, value) in [a, b, c].into_iter().enumerate() {
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
