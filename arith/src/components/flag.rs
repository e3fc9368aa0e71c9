//! Components computing a 0/1 flag from two inputs through an auxiliary
//! inverse wire.
//!
//! A [FlagFunction] combines the inputs into `p`; the flag `f` is one when `p`
//! is non-zero and zero otherwise, with `v` the inverse of `p` (zero when `p` is).
//!
//! Layout with five or more witness columns (one row)
//!
//! | col | 0   | 1   | 2   | 3   | 4   |
//! | --- | --- | --- | --- | --- | --- |
//! | cur | `x` | `y` | `p` | `v` | `f` |
//!
//! Layout with three or four witness columns (two rows)
//!
//! | col  | 0   | 1   | 2   |
//! | ---- | --- | --- | --- |
//! | cur  | `x` | `y` | `p` |
//! | next | `v` | `f` |     |
//!
//! Constraints
//!
//!   1) p - combine(x, y) = 0
//!   2) f * (f - 1) = 0
//!   3) f - p * v = 0
//!   4) (v - p) * (f - 1) = 0
//!
//! When `p = 0`, (3) gives `f = 0`. When `p != 0` and `f = 0`, (3) gives
//! `v = 0` and (4) then fails, so `f = 1`.

use super::{
    witness_cell, witness_expr, BinaryInput, Component, ComponentLayout, Manifest, ManifestParam,
    ScalarResult,
};
use crate::circuits::{
    assignment::AssignmentTable, constraints::Circuit, expr::Expr, gate::GateConstraints,
    variable::Variable,
};
use arith_utils::FieldHelpers;
use ark_ff::Field;
use std::marker::PhantomData;

/// How the two inputs of a flag are combined before testing for zero.
pub trait FlagFunction<F: Field> {
    fn combine(x: Expr<F>, y: Expr<F>) -> Expr<F>;

    fn combine_value(x: F, y: F) -> F;
}

/// Flag is one iff both inputs are non-zero: `p = x * y`.
pub struct AndFlag;

/// Flag is one iff the inputs differ: `p = x - y`.
pub struct NeqFlag;

impl<F: Field> FlagFunction<F> for AndFlag {
    fn combine(x: Expr<F>, y: Expr<F>) -> Expr<F> {
        x * y
    }

    fn combine_value(x: F, y: F) -> F {
        x * y
    }
}

impl<F: Field> FlagFunction<F> for NeqFlag {
    fn combine(x: Expr<F>, y: Expr<F>) -> Expr<F> {
        x - y
    }

    fn combine_value(x: F, y: F) -> F {
        x - y
    }
}

/// Wires of the flag gate, in layout order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Wire {
    X,
    Y,
    P,
    V,
    Flag,
}

pub struct FlagComponent<F, Op> {
    layout: ComponentLayout,
    _marker: PhantomData<(F, Op)>,
}

pub type AndFlagComponent<F> = FlagComponent<F, AndFlag>;
pub type NeqFlagComponent<F> = FlagComponent<F, NeqFlag>;

impl<F: Field, Op: FlagFunction<F>> FlagComponent<F, Op> {
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

    fn is_single_row(&self) -> bool {
        self.layout.witness.len() >= 5
    }

    /// Position of a wire as (witness slot, row offset).
    fn position(&self, wire: Wire) -> (usize, usize) {
        match (wire, self.is_single_row()) {
            (Wire::X, _) => (0, 0),
            (Wire::Y, _) => (1, 0),
            (Wire::P, _) => (2, 0),
            (Wire::V, true) => (3, 0),
            (Wire::Flag, true) => (4, 0),
            (Wire::V, false) => (0, 1),
            (Wire::Flag, false) => (1, 1),
        }
    }

    fn expr(&self, wire: Wire) -> Expr<F> {
        let (slot, offset) = self.position(wire);
        witness_expr(&self.layout, slot, offset as i32)
    }

    fn cell(&self, wire: Wire, start_row: usize) -> Variable {
        let (slot, offset) = self.position(wire);
        witness_cell(&self.layout, slot, start_row + offset)
    }
}

impl<F: Field, Op: FlagFunction<F>> Component<F> for FlagComponent<F, Op> {
    type Input = BinaryInput;
    type Output = ScalarResult;

    fn manifest() -> Manifest {
        Manifest::new(ManifestParam::range(3, 5, 1))
    }

    fn layout(&self) -> &ComponentLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        if self.is_single_row() {
            1
        } else {
            2
        }
    }

    fn gates(&self) -> Vec<GateConstraints<F>> {
        let (x, y, p, v, f) = (
            self.expr(Wire::X),
            self.expr(Wire::Y),
            self.expr(Wire::P),
            self.expr(Wire::V),
            self.expr(Wire::Flag),
        );
        vec![GateConstraints::Polynomial(vec![
            p.clone() - Op::combine(x, y),
            f.boolean(),
            f.clone() - p.clone() * v.clone(),
            (v - p) * (f - Expr::one()),
        ])]
    }

    fn result(&self, start_row: usize) -> ScalarResult {
        ScalarResult {
            output: self.cell(Wire::Flag, start_row),
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
        let p = Op::combine_value(x, y);
        let v = p.inv_or_zero();
        let f = p * v;
        let values = [
            (Wire::X, x),
            (Wire::Y, y),
            (Wire::P, p),
            (Wire::V, v),
            (Wire::Flag, f),
        ];
        for (wire, value) in values {
            table.assign(&self.cell(wire, start_row), value);
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
        circuit.add_copy_constraint(self.cell(Wire::X, start_row), input.x);
        circuit.add_copy_constraint(self.cell(Wire::Y, start_row), input.y);
    }
}
