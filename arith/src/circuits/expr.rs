//! Constraint expressions.
//!
//! An [Expr] is a polynomial over [Variable]s built from ring operations. Gates
//! hold expressions written with rotations, which are resolved against the row
//! a gate is activated on; expressions are compared structurally.

use crate::circuits::variable::Variable;
use arith_utils::serialization::SerdeAs;
use ark_ff::Field;
use ark_serialize::CanonicalSerialize;
use serde::Serialize;
use serde_with::serde_as;
use std::{
    convert::Infallible,
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A polynomial expression over circuit variables.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(bound(serialize = "F: CanonicalSerialize"))]
pub enum Expr<F> {
    Constant(#[serde_as(as = "SerdeAs")] F),
    Var(Variable),
    Add(Box<Expr<F>>, Box<Expr<F>>),
    Sub(Box<Expr<F>>, Box<Expr<F>>),
    Mul(Box<Expr<F>>, Box<Expr<F>>),
    Scale(#[serde_as(as = "SerdeAs")] F, Box<Expr<F>>),
}

impl<F: Field> Expr<F> {
    pub fn constant(c: F) -> Self {
        Expr::Constant(c)
    }

    pub fn zero() -> Self {
        Expr::Constant(F::zero())
    }

    pub fn one() -> Self {
        Expr::Constant(F::one())
    }

    pub fn var(v: Variable) -> Self {
        Expr::Var(v)
    }

    /// Multiplies the expression by a field element.
    pub fn scale(self, c: F) -> Self {
        Expr::Scale(c, Box::new(self))
    }

    /// `x * (x - 1)`, which vanishes exactly on 0 and 1.
    pub fn boolean(&self) -> Self {
        self.clone() * (self.clone() - Expr::one())
    }

    /// Evaluates the expression, fetching variable values through `resolve`.
    pub fn try_evaluate<E>(&self, resolve: &impl Fn(&Variable) -> Result<F, E>) -> Result<F, E> {
        Ok(match self {
            Expr::Constant(c) => *c,
            Expr::Var(v) => resolve(v)?,
            Expr::Add(a, b) => a.try_evaluate(resolve)? + b.try_evaluate(resolve)?,
            Expr::Sub(a, b) => a.try_evaluate(resolve)? - b.try_evaluate(resolve)?,
            Expr::Mul(a, b) => a.try_evaluate(resolve)? * b.try_evaluate(resolve)?,
            Expr::Scale(c, e) => *c * e.try_evaluate(resolve)?,
        })
    }

    /// Evaluates the expression with an infallible resolver.
    pub fn evaluate(&self, resolve: &impl Fn(&Variable) -> F) -> F {
        match self.try_evaluate(&|v| Ok::<F, Infallible>(resolve(v))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Total degree of the polynomial, counting every variable as degree one.
    pub fn degree(&self) -> usize {
        match self {
            Expr::Constant(_) => 0,
            Expr::Var(_) => 1,
            Expr::Add(a, b) | Expr::Sub(a, b) => a.degree().max(b.degree()),
            Expr::Mul(a, b) => a.degree() + b.degree(),
            Expr::Scale(_, e) => e.degree(),
        }
    }

    /// The variables of the expression, left to right, with repetitions.
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = vec![];
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<Variable>) {
        match self {
            Expr::Constant(_) => (),
            Expr::Var(v) => vars.push(*v),
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) => {
                a.collect_variables(vars);
                b.collect_variables(vars);
            }
            Expr::Scale(_, e) => e.collect_variables(vars),
        }
    }

    /// Rebuilds the expression with every variable replaced by `f(variable)`.
    pub fn map_variables(&self, f: &impl Fn(&Variable) -> Variable) -> Self {
        match self {
            Expr::Constant(c) => Expr::Constant(*c),
            Expr::Var(v) => Expr::Var(f(v)),
            Expr::Add(a, b) => Expr::Add(Box::new(a.map_variables(f)), Box::new(b.map_variables(f))),
            Expr::Sub(a, b) => Expr::Sub(Box::new(a.map_variables(f)), Box::new(b.map_variables(f))),
            Expr::Mul(a, b) => Expr::Mul(Box::new(a.map_variables(f)), Box::new(b.map_variables(f))),
            Expr::Scale(c, e) => Expr::Scale(*c, Box::new(e.map_variables(f))),
        }
    }

    /// Rewrites absolute cells as rotations from the activation row `base`.
    pub fn relative_to(&self, base: usize) -> Self {
        self.map_variables(&|v| v.relative_to(base))
    }

    /// Resolves every rotation against the activation row `base`.
    pub fn at_row(&self, base: usize) -> Self {
        self.map_variables(&|v| v.at_row(base))
    }
}

impl<F: Field> From<Variable> for Expr<F> {
    fn from(v: Variable) -> Self {
        Expr::Var(v)
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $variant:ident) => {
        impl<F: Field> $trait<Expr<F>> for Expr<F> {
            type Output = Expr<F>;

            fn $method(self, rhs: Expr<F>) -> Expr<F> {
                Expr::$variant(Box::new(self), Box::new(rhs))
            }
        }

        impl<F: Field> $trait<Variable> for Expr<F> {
            type Output = Expr<F>;

            fn $method(self, rhs: Variable) -> Expr<F> {
                Expr::$variant(Box::new(self), Box::new(Expr::Var(rhs)))
            }
        }

        impl<F: Field> $assign_trait<Expr<F>> for Expr<F> {
            fn $assign_method(&mut self, rhs: Expr<F>) {
                let lhs = std::mem::replace(self, Expr::zero());
                *self = Expr::$variant(Box::new(lhs), Box::new(rhs));
            }
        }
    };
}

impl_binop!(Add, add, AddAssign, add_assign, Add);
impl_binop!(Sub, sub, SubAssign, sub_assign, Sub);
impl_binop!(Mul, mul, MulAssign, mul_assign, Mul);

impl<F: Field> Neg for Expr<F> {
    type Output = Expr<F>;

    fn neg(self) -> Expr<F> {
        self.scale(-F::one())
    }
}

impl<F: Field> fmt::Display for Expr<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(c) => write!(f, "{c}"),
            Expr::Var(v) => write!(f, "{v}"),
            Expr::Add(a, b) => write!(f, "({a} + {b})"),
            Expr::Sub(a, b) => write!(f, "({a} - {b})"),
            Expr::Mul(a, b) => write!(f, "{a} * {b}"),
            Expr::Scale(c, e) => write!(f, "{c} * {e}"),
        }
    }
}
