//! This module implements a build session: the exclusive owner of the
//! assignment table and the circuit while components are instantiated.

use crate::{
    circuits::{
        assignment::AssignmentTable, constraints::Circuit, lookup::LookupLibrary,
        params::ArithmetizationParams,
    },
    components::Component,
    error::{CircuitError, ConfigError},
};
use ark_ff::Field;
use log::trace;
use std::fmt::Debug;

/// Owns the (table, circuit) pair of one build. Components are instantiated
/// one at a time, in the order the caller chooses.
pub struct BuildSession<F: Field> {
    table: AssignmentTable<F>,
    circuit: Circuit<F>,
}

impl<F: Field> BuildSession<F> {
    pub fn new(params: ArithmetizationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            table: AssignmentTable::new(&params),
            circuit: Circuit::new(&params),
        })
    }

    pub fn table(&self) -> &AssignmentTable<F> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut AssignmentTable<F> {
        &mut self.table
    }

    pub fn circuit(&self) -> &Circuit<F> {
        &self.circuit
    }

    pub fn circuit_mut(&mut self) -> &mut Circuit<F> {
        &mut self.circuit
    }

    /// Runs the witness phase of a component.
    pub fn assign<C: Component<F>>(
        &mut self,
        component: &C,
        input: &C::Input,
        start_row: usize,
    ) -> C::Output {
        trace!("assigning a component at row {start_row}");
        component.generate_assignments(&mut self.table, input, start_row)
    }

    /// Runs the circuit phase of a component.
    pub fn build<C: Component<F>>(
        &mut self,
        component: &C,
        input: &C::Input,
        start_row: usize,
    ) -> C::Output {
        trace!("building a component at row {start_row}");
        component.generate_circuit(&mut self.circuit, &mut self.table, input, start_row)
    }

    /// Runs both phases of a component.
    ///
    /// # Panics
    ///
    /// Will panic if the phases disagree on the output variables.
    pub fn instantiate<C>(&mut self, component: &C, input: &C::Input, start_row: usize) -> C::Output
    where
        C: Component<F>,
        C::Output: PartialEq + Debug,
    {
        let assigned = self.assign(component, input, start_row);
        let built = self.build(component, input, start_row);
        assert_eq!(
            assigned, built,
            "the witness and circuit phases returned different outputs"
        );
        built
    }

    /// First row no witness or constant column has reached yet.
    pub fn next_row(&self) -> usize {
        self.table.allocated_rows()
    }

    pub fn verify(&self, library: &LookupLibrary<F>) -> Result<(), CircuitError> {
        self.circuit.verify(&self.table, library)
    }

    /// Ends the session, handing the finished pair to a backend.
    pub fn finish(self) -> (AssignmentTable<F>, Circuit<F>) {
        (self.table, self.circuit)
    }
}
