//! Two-input, one-output components sharing one skeleton.
//!
//! Layout (one row)
//!
//! | col | value       |
//! | --- | ----------- |
//! |   0 | `x`  (copy) |
//! |   1 | `y`  (copy) |
//! |   2 | `z`         |
//!
//! Constraint: `BinaryFunction::constraint(x, y, z) = 0`.
//!
//! The boolean operations assume 0/1 operands, as produced by flags or other
//! boolean components; they do not constrain their inputs to be bits.

use super::{
    witness_cell, witness_expr, BinaryInput, Component, ComponentLayout, Manifest, ManifestParam,
    ScalarResult,
};
use crate::circuits::{
    assignment::AssignmentTable, constraints::Circuit, expr::Expr, gate::GateConstraints,
};
use ark_ff::Field;
use std::marker::PhantomData;

/// A function of two field elements, both as a constraint and as a value.
pub trait BinaryFunction<F: Field> {
    /// An expression vanishing exactly when `z` is the function of `x` and `y`.
    fn constraint(x: Expr<F>, y: Expr<F>, z: Expr<F>) -> Expr<F>;

    fn value(x: F, y: F) -> F;
}

/// `z = x + y`
pub struct Addition;
/// `z = x - y`
pub struct Subtraction;
/// `z = x * y`
pub struct Multiplication;
/// `z = x AND y`
pub struct And;
/// `z = x OR y`
pub struct Or;
/// `z = x XOR y`
pub struct Xor;
/// `z = NOT (x AND y)`
pub struct Nand;
/// `z = NOT (x OR y)`
pub struct Nor;

impl<F: Field> BinaryFunction<F> for Addition {
    fn constraint(x: Expr<F>, y: Expr<F>, z: Expr<F>) -> Expr<F> {
        z - (x + y)
    }

    fn value(x: F, y: F) -> F {
        x + y
    }
}

impl<F: Field> BinaryFunction<F> for Subtraction {
    fn constraint(x: Expr<F>, y: Expr<F>, z: Expr<F>) -> Expr<F> {
        z - (x - y)
    }

    fn value(x: F, y: F) -> F {
        x - y
    }
}

impl<F: Field> BinaryFunction<F> for Multiplication {
    fn constraint(x: Expr<F>, y: Expr<F>, z: Expr<F>) -> Expr<F> {
        z - x * y
    }

    fn value(x: F, y: F) -> F {
        x * y
    }
}

impl<F: Field> BinaryFunction<F> for And {
    fn constraint(x: Expr<F>, y: Expr<F>, z: Expr<F>) -> Expr<F> {
        z - x * y
    }

    fn value(x: F, y: F) -> F {
        x * y
    }
}

impl<F: Field> BinaryFunction<F> for Or {
    fn constraint(x: Expr<F>, y: Expr<F>, z: Expr<F>) -> Expr<F> {
        z - (x.clone() + y.clone() - x * y)
    }

    fn value(x: F, y: F) -> F {
        x + y - x * y
    }
}

impl<F: Field> BinaryFunction<F> for Xor {
    fn constraint(x: Expr<F>, y: Expr<F>, z: Expr<F>) -> Expr<F> {
        let two = F::from(2u64);
        z - (x.clone() + y.clone() - (x * y).scale(two))
    }

    fn value(x: F, y: F) -> F {
        x + y - F::from(2u64) * x * y
    }
}

impl<F: Field> BinaryFunction<F> for Nand {
    fn constraint(x: Expr<F>, y: Expr<F>, z: Expr<F>) -> Expr<F> {
        z - (Expr::one() - x * y)
    }

    fn value(x: F, y: F) -> F {
        F::one() - x * y
    }
}

impl<F: Field> BinaryFunction<F> for Nor {
    fn constraint(x: Expr<F>, y: Expr<F>, z: Expr<F>) -> Expr<F> {
        z - (Expr::one() - x) * (Expr::one() - y)
    }

    fn value(x: F, y: F) -> F {
        (F::one() - x) * (F::one() - y)
    }
}

/// The shared skeleton, parameterized by the function it computes.
pub struct BinaryComponent<F, Op> {
    layout: ComponentLayout,
    _marker: PhantomData<(F, Op)>,
}

pub type AddComponent<F> = BinaryComponent<F, Addition>;
pub type SubComponent<F> = BinaryComponent<F, Subtraction>;
pub type MulComponent<F> = BinaryComponent<F, Multiplication>;
pub type AndComponent<F> = BinaryComponent<F, And>;
pub type OrComponent<F> = BinaryComponent<F, Or>;
pub type XorComponent<F> = BinaryComponent<F, Xor>;
pub type NandComponent<F> = BinaryComponent<F, Nand>;
pub type NorComponent<F> = BinaryComponent<F, Nor>;

impl<F: Field, Op: BinaryFunction<F>> BinaryComponent<F, Op> {
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

impl<F: Field, Op: BinaryFunction<F>> Component<F> for BinaryComponent<F, Op> {
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
        let w = |i| witness_expr(&self.layout, i, 0);
        vec![GateConstraints::Polynomial(vec![Op::constraint(
            w(0),
            w(1),
            w(2),
        )])]
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
        for (i, value) in [x, y, Op::value(x, y)].into_iter().enumerate() {
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
