//! This module implements the component protocol and a library of components.
//!
//! A component is a circuit fragment placed at a starting row on the columns
//! of its [ComponentLayout]. Building one has two independent phases:
//!
//! - [Component::generate_assignments] writes the witness values a prover needs,
//! - [Component::generate_circuit] declares the gates (sharing selectors with
//!   earlier instances of the same shape), enables the selectors on the rows
//!   the instance occupies and links its wires to the caller's variables.
//!
//! Both phases return the same output variables.

use crate::circuits::{
    assignment::AssignmentTable, constraints::Circuit, expr::Expr, gate::GateConstraints,
    selectors::GateShape, variable::Variable,
};
use ark_ff::Field;
use log::trace;

pub mod binary;
pub mod div_or_zero;
pub mod flag;
pub mod manifest;
pub mod range_check;
pub mod unary;
pub mod xor;

pub use manifest::{ComponentLayout, Manifest, ManifestParam};

/// Operands of a two-input component
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinaryInput {
    pub x: Variable,
    pub y: Variable,
}

/// Operand of a one-input component
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnaryInput {
    pub x: Variable,
}

/// A component producing one value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScalarResult {
    pub output: Variable,
}

/// A circuit fragment.
pub trait Component<F: Field> {
    type Input;
    type Output;

    /// Resources the component needs, independent of any layout.
    fn manifest() -> Manifest
    where
        Self: Sized;

    fn layout(&self) -> &ComponentLayout;

    /// Rows an instance occupies from its starting row.
    fn rows_amount(&self) -> usize;

    /// The gates of the component, written with rotations from the starting
    /// row. Gate `i` is switched on by the `i`-th selector of the shape.
    fn gates(&self) -> Vec<GateConstraints<F>>;

    /// Row, relative to the starting row, on which gate `gate` is enabled.
    fn gate_offset(&self, _gate: usize) -> usize {
        0
    }

    /// The output variables of an instance placed at `start_row`.
    fn result(&self, start_row: usize) -> Self::Output;

    /// Computes and writes the witness values of an instance.
    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Self::Output;

    /// Registers the gates of the component on the selectors starting at
    /// `first_selector_index`, in the normalized form they were allocated with.
    fn generate_gates(
        &self,
        circuit: &mut Circuit<F>,
        _table: &AssignmentTable<F>,
        _input: &Self::Input,
        first_selector_index: usize,
    ) {
        let gates = circuit
            .selector_shape(first_selector_index)
            .map_or_else(|| self.gates(), |shape| shape.gates().to_vec());
        for (i, gate) in gates.into_iter().enumerate() {
            circuit.add_gate_constraints(first_selector_index + i, gate);
        }
    }

    /// Links the wires of an instance to the caller's input variables.
    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        table: &AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    );

    /// Writes the constant columns of an instance. These are part of the
    /// circuit, so both phases call it.
    fn generate_constants(&self, _table: &mut AssignmentTable<F>, _start_row: usize) {}

    /// Declares an instance in the constraint system.
    fn generate_circuit(
        &self,
        circuit: &mut Circuit<F>,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Self::Output {
        let shape = GateShape::new(self.gates(), start_row);
        let arity = shape.arity();
        let first_selector_index = match circuit.find_selector(&shape) {
            Some(index) => index,
            None => {
                let index = circuit.allocate_selector(shape, arity);
                self.generate_gates(circuit, table, input, index);
                index
            }
        };
        trace!(
            "enabling selectors {first_selector_index}..{} from row {start_row}",
            first_selector_index + arity
        );
        for gate in 0..arity {
            table.enable_selector(first_selector_index + gate, start_row + self.gate_offset(gate));
        }
        self.generate_constants(table, start_row);
        self.generate_copy_constraints(circuit, table, input, start_row);
        self.result(start_row)
    }
}

/// Witness column `i` of a layout at rotation `rotation`, as an expression.
pub(crate) fn witness_expr<F: Field>(
    layout: &ComponentLayout,
    i: usize,
    rotation: i32,
) -> Expr<F> {
    Expr::var(Variable::witness_rel(layout.witness[i], rotation))
}

/// Witness column `i` of a layout at absolute row `row`.
pub(crate) fn witness_cell(layout: &ComponentLayout, i: usize, row: usize) -> Variable {
    Variable::witness(layout.witness[i], row)
}
