//! This module implements the constraint system of a circuit: the polynomial
//! constraints grouped into gates, the lookup gates, the copy constraints, and
//! the selector bookkeeping that lets identical gates share a selector.

use crate::{
    circuits::{
        assignment::AssignmentTable,
        expr::Expr,
        gate::{CopyConstraint, Gate, GateConstraints, LookupConstraint, LookupGate},
        lookup::LookupLibrary,
        params::ArithmetizationParams,
        selectors::{GateShape, SelectorAllocator},
        variable::{signed_row, ColumnKind, Variable},
    },
    error::CircuitError,
};
use ark_ff::Field;
use ark_serialize::CanonicalSerialize;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Handle to a constraint registered with [Circuit::add_constraint].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConstraintId(usize);

/// The constraint system a build produces.
///
/// Gates, copy constraints and lookup table references are kept in the order
/// they were registered, so two builds instantiating the same components in
/// the same order serialize to the same bytes.
#[derive(Clone, Debug, Serialize)]
#[serde(bound(serialize = "F: CanonicalSerialize"))]
pub struct Circuit<F: Field> {
    params: ArithmetizationParams,
    constraints: Vec<Expr<F>>,
    gates: Vec<Gate<F>>,
    lookup_gates: Vec<LookupGate<F>>,
    copy_constraints: Vec<CopyConstraint>,
    /// full `table/subtable` names, in order of first use
    lookup_tables: Vec<String>,
    #[serde(skip)]
    selectors: SelectorAllocator<F>,
    #[serde(skip)]
    used_selectors: BTreeSet<usize>,
}

impl<F: Field> Circuit<F> {
    pub fn new(params: &ArithmetizationParams) -> Self {
        Self {
            params: *params,
            constraints: vec![],
            gates: vec![],
            lookup_gates: vec![],
            copy_constraints: vec![],
            lookup_tables: vec![],
            selectors: SelectorAllocator::new(),
            used_selectors: BTreeSet::new(),
        }
    }

    /// Column counts, with the selector count including allocated selectors.
    pub fn params(&self) -> ArithmetizationParams {
        self.params.selectors(self.selectors_amount())
    }

    pub fn selectors_amount(&self) -> usize {
        self.params.selector_columns.max(self.selectors.allocated())
    }

    pub fn constraints(&self) -> &[Expr<F>] {
        &self.constraints
    }

    pub fn constraint(&self, id: ConstraintId) -> &Expr<F> {
        &self.constraints[id.0]
    }

    pub fn gates(&self) -> &[Gate<F>] {
        &self.gates
    }

    pub fn gates_amount(&self) -> usize {
        self.gates.len()
    }

    pub fn lookup_gates(&self) -> &[LookupGate<F>] {
        &self.lookup_gates
    }

    pub fn copy_constraints(&self) -> &[CopyConstraint] {
        &self.copy_constraints
    }

    pub fn lookup_tables(&self) -> &[String] {
        &self.lookup_tables
    }

    fn check_gate_variable(&self, variable: &Variable) {
        let Variable::Cell {
            column,
            relative: true,
            ..
        } = variable
        else {
            panic!("gate constraints only use rotations, got {variable}");
        };
        if column.kind != ColumnKind::Selector {
            let declared = self.params.columns(column.kind);
            assert!(
                column.index < declared,
                "{column} is out of bounds: {declared} {} columns are declared",
                column.kind
            );
        }
    }

    /// Registers a constraint for a later [Circuit::add_gate].
    ///
    /// # Panics
    ///
    /// Will panic if the expression uses scratch slots, absolute cells or
    /// undeclared columns.
    pub fn add_constraint(&mut self, constraint: Expr<F>) -> ConstraintId {
        for variable in constraint.variables() {
            self.check_gate_variable(&variable);
        }
        self.constraints.push(constraint);
        ConstraintId(self.constraints.len() - 1)
    }

    fn claim_selector(&mut self, selector_index: usize) {
        assert!(
            selector_index < self.selectors.allocated(),
            "selector {selector_index} was never allocated"
        );
        assert!(
            self.used_selectors.insert(selector_index),
            "selector {selector_index} already backs a gate"
        );
    }

    /// Groups registered constraints into a gate on an allocated selector.
    ///
    /// # Panics
    ///
    /// Will panic if the selector is not allocated or already backs a gate.
    pub fn add_gate(&mut self, selector_index: usize, constraints: &[ConstraintId]) {
        self.claim_selector(selector_index);
        let constraints = constraints
            .iter()
            .map(|&id| self.constraint(id).clone())
            .collect();
        self.gates.push(Gate {
            selector_index,
            constraints,
        });
    }

    /// Registers a lookup gate on an allocated selector.
    ///
    /// # Panics
    ///
    /// Will panic under the conditions of [Circuit::add_gate] and
    /// [Circuit::add_constraint].
    pub fn add_lookup_gate(&mut self, selector_index: usize, constraints: Vec<LookupConstraint<F>>) {
        for constraint in &constraints {
            for variable in constraint.input.iter().flat_map(Expr::variables) {
                self.check_gate_variable(&variable);
            }
        }
        self.claim_selector(selector_index);
        for constraint in &constraints {
            if !self.lookup_tables.contains(&constraint.table) {
                self.lookup_tables.push(constraint.table.clone());
            }
        }
        self.lookup_gates.push(LookupGate {
            selector_index,
            constraints,
        });
    }

    /// Registers the constraints of one gate of a shape, whatever their kind.
    pub fn add_gate_constraints(&mut self, selector_index: usize, gate: GateConstraints<F>) {
        match gate {
            GateConstraints::Polynomial(constraints) => {
                let ids: Vec<_> = constraints
                    .into_iter()
                    .map(|c| self.add_constraint(c))
                    .collect();
                self.add_gate(selector_index, &ids);
            }
            GateConstraints::Lookup(constraints) => {
                self.add_lookup_gate(selector_index, constraints);
            }
        }
    }

    fn check_copy_variable(&self, variable: &Variable) {
        let Variable::Cell {
            column,
            row,
            relative: false,
        } = variable
        else {
            panic!("copy constraints link absolute table cells, got {variable}");
        };
        assert!(*row >= 0, "{variable} points before the first row");
        let declared = match column.kind {
            ColumnKind::Selector => self.selectors_amount(),
            kind => self.params.columns(kind),
        };
        assert!(
            column.index < declared,
            "{column} is out of bounds: {declared} {} columns are declared",
            column.kind
        );
    }

    /// Records that two cells hold the same value.
    ///
    /// # Panics
    ///
    /// Will panic if either side is a scratch slot, a rotation or a cell of an
    /// undeclared column.
    pub fn add_copy_constraint(&mut self, a: Variable, b: Variable) {
        self.check_copy_variable(&a);
        self.check_copy_variable(&b);
        self.copy_constraints.push(CopyConstraint::new(a, b));
    }

    /// The first selector of a shape that already has gates.
    pub fn find_selector(&self, shape: &GateShape<F>) -> Option<usize> {
        self.selectors.find(shape)
    }

    /// Reserves `arity` new consecutive selectors for a shape.
    pub fn allocate_selector(&mut self, shape: GateShape<F>, arity: usize) -> usize {
        self.selectors.allocate(shape, arity)
    }

    /// The normalized gates of the shape allocated at `first_selector`.
    pub fn selector_shape(&self, first_selector: usize) -> Option<&GateShape<F>> {
        self.selectors.shape(first_selector)
    }

    /// Checks that `table` satisfies the circuit: every constraint of every
    /// gate vanishes on the rows its selector is enabled on, every copy
    /// constraint holds, and every lookup finds its tuple in `library`.
    ///
    /// Cells past the end of a declared column read as zero, as in the table
    /// padded to its full height.
    pub fn verify(
        &self,
        table: &AssignmentTable<F>,
        library: &LookupLibrary<F>,
    ) -> Result<(), CircuitError> {
        let height = table.rows_amount();
        debug!(
            "checking {} gates, {} lookup gates and {} copy constraints over {height} rows",
            self.gates.len(),
            self.lookup_gates.len(),
            self.copy_constraints.len()
        );

        for gate in &self.gates {
            for row in enabled_rows(table, gate.selector_index, height) {
                for (constraint, expr) in gate.constraints.iter().enumerate() {
                    let value = expr.try_evaluate(&|v| fetch(table, v, row, height))?;
                    if !value.is_zero() {
                        return Err(CircuitError::UnsatisfiedConstraint {
                            selector: gate.selector_index,
                            constraint,
                            row,
                        });
                    }
                }
            }
        }

        for copy in &self.copy_constraints {
            let a = fetch(table, &copy.first(), 0, height)?;
            let b = fetch(table, &copy.second(), 0, height)?;
            if a != b {
                return Err(CircuitError::CopyConstraintViolated(
                    copy.first().to_string(),
                    copy.second().to_string(),
                ));
            }
        }

        let mut contents: HashMap<&str, HashSet<Vec<F>>> = HashMap::new();
        for name in &self.lookup_tables {
            let rows = library.subtable_rows(name)?;
            contents.insert(name.as_str(), rows.into_iter().collect());
        }
        for gate in &self.lookup_gates {
            for row in enabled_rows(table, gate.selector_index, height) {
                for constraint in &gate.constraints {
                    let tuple = constraint
                        .input
                        .iter()
                        .map(|expr| expr.try_evaluate(&|v| fetch(table, v, row, height)))
                        .collect::<Result<Vec<_>, _>>()?;
                    if !contents[constraint.table.as_str()].contains(&tuple) {
                        return Err(CircuitError::ValueNotInTable {
                            selector: gate.selector_index,
                            row,
                            table: constraint.table.clone(),
                        });
                    }
                }
            }
        }

        debug!("the assignment satisfies the circuit");
        Ok(())
    }
}

fn enabled_rows<F: Field>(
    table: &AssignmentTable<F>,
    selector: usize,
    height: usize,
) -> impl Iterator<Item = usize> + '_ {
    (0..height).filter(move |&row| table.is_selector_enabled(selector, row))
}

/// Reads a variable for a gate activated at `row` (ignored for absolute cells)
/// from the table padded to `height` rows.
fn fetch<F: Field>(
    table: &AssignmentTable<F>,
    variable: &Variable,
    row: usize,
    height: usize,
) -> Result<F, CircuitError> {
    match *variable {
        Variable::Scratch(id) => Ok(table.scratch(id)),
        Variable::Cell {
            column,
            row: offset,
            relative,
        } => {
            if !relative {
                return match usize::try_from(offset) {
                    Ok(cell_row) if cell_row < height => {
                        Ok(table.padded_read(column.kind, column.index, cell_row))
                    }
                    _ => Err(CircuitError::CellOutOfTable {
                        variable: variable.to_string(),
                        height,
                    }),
                };
            }
            let absolute = i64::from(signed_row(row)) + i64::from(offset);
            match usize::try_from(absolute) {
                Ok(absolute) if absolute < height => {
                    Ok(table.padded_read(column.kind, column.index, absolute))
                }
                _ => Err(CircuitError::RotationOutOfTable {
                    variable: variable.to_string(),
                    row,
                }),
            }
        }
    }
}
