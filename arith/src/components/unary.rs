//! One-input components.
//!
//! [Not] uses witness columns `[x, z]` with `z = 1 - x`.
//!
//! [MulByConstant] uses witness columns `[x, z]` and one constant column `c`,
//! all on one row, with `z = c * x`. The constant lives in the table, so every
//! instance shares one gate whatever its constant.

use super::{
    witness_cell, witness_expr, Component, ComponentLayout, Manifest, ManifestParam,
    ScalarResult, UnaryInput,
};
use crate::circuits::{
    assignment::AssignmentTable,
    constraints::Circuit,
    expr::Expr,
    gate::GateConstraints,
    variable::Variable,
};
use ark_ff::Field;
use std::marker::PhantomData;

pub struct Not<F> {
    layout: ComponentLayout,
    _marker: PhantomData<F>,
}

impl<F: Field> Not<F> {
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

impl<F: Field> Component<F> for Not<F> {
    type Input = UnaryInput;
    type Output = ScalarResult;

    fn manifest() -> Manifest {
        Manifest::new(ManifestParam::Single(2))
    }

    fn layout(&self) -> &ComponentLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        1
    }

    fn gates(&self) -> Vec<GateConstraints<F>> {
        let x = witness_expr(&self.layout, 0, 0);
        let z = witness_expr(&self.layout, 1, 0);
        vec![GateConstraints::Polynomial(vec![z - (Expr::one() - x)])]
    }

    fn result(&self, start_row: usize) -> ScalarResult {
        ScalarResult {
            output: witness_cell(&self.layout, 1, start_row),
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
        table.assign(&witness_cell(&self.layout, 1, start_row), F::one() - x);
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

pub struct MulByConstant<F> {
    layout: ComponentLayout,
    constant: F,
}

impl<F: Field> MulByConstant<F> {
    /// # Panics
    ///
    /// Will panic if `layout` does not satisfy the manifest.
    pub fn new(layout: ComponentLayout, constant: F) -> Self {
        <Self as Component<F>>::manifest().check(&layout);
        Self { layout, constant }
    }

    fn constant_cell(&self, row: usize) -> Variable {
        Variable::constant(self.layout.constant[0], row)
    }
}

impl<F: Field> Component<F> for MulByConstant<F> {
    type Input = UnaryInput;
    type Output = ScalarResult;

    fn manifest() -> Manifest {
        Manifest::new(ManifestParam::Single(2)).constants(1)
    }

    fn layout(&self) -> &ComponentLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        1
    }

    fn gates(&self) -> Vec<GateConstraints<F>> {
        let x = witness_expr(&self.layout, 0, 0);
        let z = witness_expr(&self.layout, 1, 0);
        let c = Expr::var(Variable::constant_rel(self.layout.constant[0], 0));
        vec![GateConstraints::Polynomial(vec![z - c * x])]
    }

    fn result(&self, start_row: usize) -> ScalarResult {
        ScalarResult {
            output: witness_cell(&self.layout, 1, start_row),
        }
    }

    fn generate_constants(&self, table: &mut AssignmentTable<F>, start_row: usize) {
        table.assign(&self.constant_cell(start_row), self.constant);
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &UnaryInput,
        start_row: usize,
    ) -> ScalarResult {
        let x = table.var_value(&input.x);
        self.generate_constants(table, start_row);
        table.assign(&witness_cell(&self.layout, 0, start_row), x);
        table.assign(&witness_cell(&self.layout, 1, start_row), self.constant * x);
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
