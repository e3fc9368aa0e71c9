use super::framework::{TestFramework, RNG_SEED};
use crate::{
    circuits::{gate::GateConstraints, variable::Variable},
    components::{
        flag::{AndFlagComponent, NeqFlagComponent},
        BinaryInput, Component, ComponentLayout,
    },
    error::CircuitError,
};
use arith_utils::FieldHelpers;
use ark_bn254::Fr;
use ark_ff::{Field, One, UniformRand, Zero};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn and_flag(x: u64, y: u64, columns: usize) -> (Vec<Fr>, super::framework::TestRunner<Fr>) {
    let mut runner = TestFramework::new(columns)
        .public_inputs(vec![Fr::from(x), Fr::from(y)])
        .setup();
    let input = BinaryInput {
        x: runner.public(0),
        y: runner.public(1),
    };
    let flag = AndFlagComponent::new(ComponentLayout::witness_range(columns));
    runner.add(&flag, &input);
    // x, y, p at row 0, v, f at row 1 (or row 0 with five columns)
    let cells = if columns >= 5 {
        (0..5).map(|i| Variable::witness(i, 0)).collect::<Vec<_>>()
    } else {
        vec![
            Variable::witness(0, 0),
            Variable::witness(1, 0),
            Variable::witness(2, 0),
            Variable::witness(0, 1),
            Variable::witness(1, 1),
        ]
    };
    let values = cells.iter().map(|v| runner.value(v)).collect();
    (values, runner)
}

#[test]
fn zero_operand_lowers_the_flag() {
    let (values, runner) = and_flag(0, 5, 3);
    let zero = Fr::zero();
    assert_eq!(values[2..], [zero, zero, zero]);
    runner.verify().unwrap();
}

#[test]
fn nonzero_operands_raise_the_flag() {
    let (values, runner) = and_flag(3, 5, 3);
    assert_eq!(values[2], Fr::from(15u64));
    assert_eq!(values[3], Fr::from(15u64).inverse().unwrap());
    assert_eq!(values[4], Fr::one());

    // every constraint of the gate vanishes at the enabled row
    let gate = &runner.circuit().gates()[0];
    assert_eq!(gate.constraints.len(), 4);
    assert!(runner.table().is_selector_enabled(gate.selector_index, 0));
    for constraint in &gate.constraints {
        assert_eq!(constraint.evaluate(&|v| runner.table().resolve_at(v, 0)), Fr::zero());
    }
    runner.verify().unwrap();
}

#[test]
fn two_row_layout_uses_a_rotation() {
    let flag = AndFlagComponent::<Fr>::new(ComponentLayout::witness_range(4));
    assert_eq!(flag.rows_amount(), 2);
    let GateConstraints::Polynomial(constraints) = &flag.gates()[0] else {
        panic!("the flag gate is polynomial");
    };
    assert!(constraints
        .iter()
        .flat_map(|c| c.variables())
        .any(|v| v == Variable::witness_rel(1, 1)));
}

#[test]
fn single_row_layout() {
    let (values, runner) = and_flag(7, 2, 5);
    assert_eq!(values[4], Fr::one());
    assert_eq!(runner.table().allocated_rows(), 1);
    runner.verify().unwrap();
}

#[test]
fn forged_flag_is_rejected() {
    let (_, mut runner) = and_flag(3, 5, 3);
    // claim the product is zero without the inverse
    *runner.table_mut().witness_mut(0, 1) = Fr::zero();
    *runner.table_mut().witness_mut(1, 1) = Fr::zero();
    assert!(matches!(
        runner.verify(),
        Err(CircuitError::UnsatisfiedConstraint { constraint: 3, row: 0, .. })
    ));
}

#[test]
fn neq_flag_on_random_values() {
    let mut rng = StdRng::from_seed(RNG_SEED);
    let a = Fr::rand(&mut rng);
    let b = Fr::rand(&mut rng);
    let mut runner = TestFramework::new(5).public_inputs(vec![a, b, a]).setup();
    let flag = NeqFlagComponent::new(ComponentLayout::witness_range(5));

    let differ = runner.add(
        &flag,
        &BinaryInput {
            x: runner.public(0),
            y: runner.public(1),
        },
    );
    let same = runner.add(
        &flag,
        &BinaryInput {
            x: runner.public(0),
            y: runner.public(2),
        },
    );
    assert_eq!(runner.value(&differ.output), Fr::one());
    assert_eq!(runner.value(&same.output), Fr::zero());
    assert_eq!(runner.circuit().gates().len(), 1);
    runner.verify().unwrap();
}

proptest! {
    #[test]
    fn and_flag_matches_both_nonzero(x in 0u64..4, y in 0u64..4) {
        let (values, runner) = and_flag(x, y, 3);
        let expected = if x != 0 && y != 0 { Fr::one() } else { Fr::zero() };
        prop_assert_eq!(values[4], expected);
        prop_assert_eq!(values[3], values[2].inv_or_zero());
        prop_assert!(runner.verify().is_ok());
    }
}
