//! This module implements the gate primitives of the constraint system:
//! polynomial gates, lookup gates and copy constraints.

use crate::circuits::{expr::Expr, variable::Variable};
use ark_ff::Field;
use ark_serialize::CanonicalSerialize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A group of polynomial constraints switched on by one selector column.
/// The constraints use rotations from the row the selector is enabled on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "F: CanonicalSerialize"))]
pub struct Gate<F> {
    pub selector_index: usize,
    pub constraints: Vec<Expr<F>>,
}

/// Membership of a tuple of expressions in a lookup (sub)table, named
/// `table/subtable`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(bound(serialize = "F: CanonicalSerialize"))]
pub struct LookupConstraint<F> {
    pub table: String,
    pub input: Vec<Expr<F>>,
}

impl<F: Field> LookupConstraint<F> {
    pub fn new(table: impl Into<String>, input: Vec<Expr<F>>) -> Self {
        Self {
            table: table.into(),
            input,
        }
    }

    pub fn relative_to(&self, base: usize) -> Self {
        Self {
            table: self.table.clone(),
            input: self.input.iter().map(|e| e.relative_to(base)).collect(),
        }
    }
}

/// A group of lookup constraints switched on by one selector column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "F: CanonicalSerialize"))]
pub struct LookupGate<F> {
    pub selector_index: usize,
    pub constraints: Vec<LookupConstraint<F>>,
}

/// The constraints of one gate, before a selector is attached to them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(bound(serialize = "F: CanonicalSerialize"))]
pub enum GateConstraints<F> {
    Polynomial(Vec<Expr<F>>),
    Lookup(Vec<LookupConstraint<F>>),
}

impl<F: Field> GateConstraints<F> {
    /// Rewrites absolute cells as rotations from the activation row `base`.
    pub fn relative_to(&self, base: usize) -> Self {
        match self {
            GateConstraints::Polynomial(constraints) => GateConstraints::Polynomial(
                constraints.iter().map(|c| c.relative_to(base)).collect(),
            ),
            GateConstraints::Lookup(constraints) => GateConstraints::Lookup(
                constraints.iter().map(|c| c.relative_to(base)).collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GateConstraints::Polynomial(constraints) => constraints.len(),
            GateConstraints::Lookup(constraints) => constraints.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An equality between two table cells, stored as an unordered pair:
/// the smaller variable always comes first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CopyConstraint {
    first: Variable,
    second: Variable,
}

impl CopyConstraint {
    pub fn new(a: Variable, b: Variable) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self { first, second }
    }

    pub fn first(&self) -> Variable {
        self.first
    }

    pub fn second(&self) -> Variable {
        self.second
    }
}

impl fmt::Display for CopyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use proptest::prelude::*;

    #[test]
    fn copy_constraints_are_unordered() {
        let a = Variable::witness(0, 3);
        let b = Variable::public_input(0, 0);
        assert_eq!(CopyConstraint::new(a, b), CopyConstraint::new(b, a));
        assert_eq!(CopyConstraint::new(b, a).first(), a.min(b));
    }

    proptest! {
        #[test]
        fn copy_constraints_ignore_argument_order(
            a in any::<Variable>(),
            b in any::<Variable>(),
        ) {
            let forward = CopyConstraint::new(a, b);
            prop_assert_eq!(forward, CopyConstraint::new(b, a));
            prop_assert!(forward.first() <= forward.second());
            prop_assert_eq!(forward.to_string(), format!("{} = {}", a.min(b), a.max(b)));
        }
    }

    #[test]
    fn gate_constraints_normalize() {
        let gate = GateConstraints::Lookup(vec![LookupConstraint::new(
            "range_8/full",
            vec![Expr::<Fr>::var(Variable::witness(1, 4))],
        )]);
        let expected = GateConstraints::Lookup(vec![LookupConstraint::new(
            "range_8/full",
            vec![Expr::<Fr>::var(Variable::witness_rel(1, 1))],
        )]);
        assert_eq!(gate.relative_to(3), expected);
        assert_eq!(gate.len(), 1);
    }
}
