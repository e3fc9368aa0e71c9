//! This module implements selector deduplication.
//!
//! A [GateShape] is the list of gates a component instance declares, with every
//! cell normalized to a rotation from the instance's activation row. Two shapes
//! share selectors only when they are structurally equal, columns included: the
//! same constraints over different columns are different gates.

use crate::circuits::gate::GateConstraints;
use ark_ff::Field;
use log::{debug, trace};
use std::collections::{BTreeMap, HashMap};

/// The normalized gates of a component instance, one selector per gate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GateShape<F>(Vec<GateConstraints<F>>);

impl<F: Field> GateShape<F> {
    /// Builds the shape of gates written relative to, or absolutely around,
    /// the activation row `start_row`.
    pub fn new(gates: Vec<GateConstraints<F>>, start_row: usize) -> Self {
        Self(gates.iter().map(|gate| gate.relative_to(start_row)).collect())
    }

    /// Number of selectors the shape needs.
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn gates(&self) -> &[GateConstraints<F>] {
        &self.0
    }
}

/// Append-only map from gate shapes to the first of their selector indices.
#[derive(Clone, Debug)]
pub struct SelectorAllocator<F> {
    shapes: HashMap<GateShape<F>, usize>,
    by_selector: BTreeMap<usize, GateShape<F>>,
    next: usize,
}

impl<F: Field> Default for SelectorAllocator<F> {
    fn default() -> Self {
        Self {
            shapes: HashMap::new(),
            by_selector: BTreeMap::new(),
            next: 0,
        }
    }
}

impl<F: Field> SelectorAllocator<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first selector of a shape allocated earlier.
    pub fn find(&self, shape: &GateShape<F>) -> Option<usize> {
        let found = self.shapes.get(shape).copied();
        if let Some(selector) = found {
            trace!("reusing selectors {selector}..{}", selector + shape.arity());
        }
        found
    }

    /// Reserves `arity` consecutive selectors for a new shape and returns the first.
    ///
    /// # Panics
    ///
    /// Will panic if the shape was already allocated or `arity` does not match it.
    pub fn allocate(&mut self, shape: GateShape<F>, arity: usize) -> usize {
        assert_eq!(
            arity,
            shape.arity(),
            "a shape of {} gates needs {} selectors",
            shape.arity(),
            shape.arity()
        );
        assert!(
            !self.shapes.contains_key(&shape),
            "gate shape already has selector {}",
            self.shapes[&shape]
        );
        let first = self.next;
        self.next += arity;
        debug!("allocated selectors {first}..{} for a new gate shape", self.next);
        self.by_selector.insert(first, shape.clone());
        self.shapes.insert(shape, first);
        first
    }

    /// The shape whose selectors start at `first_selector`.
    pub fn shape(&self, first_selector: usize) -> Option<&GateShape<F>> {
        self.by_selector.get(&first_selector)
    }

    /// Number of selectors handed out so far.
    pub fn allocated(&self) -> usize {
        self.next
    }
}
