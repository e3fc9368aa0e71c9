use super::framework::{TestFramework, RNG_SEED};
use crate::{
    circuits::variable::Variable,
    components::{
        binary::{
            AddComponent, Addition, And, AndComponent, BinaryComponent, BinaryFunction,
            MulComponent, Multiplication, Nand, NandComponent, Nor, NorComponent, Or,
            OrComponent, SubComponent, Subtraction, Xor, XorComponent,
        },
        div_or_zero::DivOrZero,
        unary::{MulByConstant, Not},
        BinaryInput, ComponentLayout, UnaryInput,
    },
    error::CircuitError,
};
use ark_bn254::Fr;
use ark_ff::{Field, One, UniformRand, Zero};
use rand::{rngs::StdRng, SeedableRng};

/// Runs `Op` on every pair of `values` and checks outputs and gates.
fn check_binary<Op: BinaryFunction<Fr>>(values: &[Fr], expected: impl Fn(Fr, Fr) -> Fr) {
    let mut runner = TestFramework::new(3).public_inputs(values.to_vec()).setup();
    let component = BinaryComponent::<Fr, Op>::new(ComponentLayout::witness_range(3));
    for i in 0..values.len() {
        for j in 0..values.len() {
            let input = BinaryInput {
                x: runner.public(i),
                y: runner.public(j),
            };
            let result = runner.add(&component, &input);
            assert_eq!(runner.value(&result.output), expected(values[i], values[j]));
        }
    }
    assert_eq!(runner.circuit().gates().len(), 1);
    runner.verify().unwrap();
}

#[test]
fn arithmetic_components() {
    let mut rng = StdRng::from_seed(RNG_SEED);
    let values: Vec<Fr> = (0..3).map(|_| Fr::rand(&mut rng)).collect();
    check_binary::<Addition>(&values, |x, y| x + y);
    check_binary::<Subtraction>(&values, |x, y| x - y);
    check_binary::<Multiplication>(&values, |x, y| x * y);
}

#[test]
fn boolean_components() {
    let bits = [Fr::zero(), Fr::one()];
    let b = |v: Fr| v.is_one();
    let f = |v: bool| if v { Fr::one() } else { Fr::zero() };
    check_binary::<And>(&bits, |x, y| f(b(x) && b(y)));
    check_binary::<Or>(&bits, |x, y| f(b(x) || b(y)));
    check_binary::<Xor>(&bits, |x, y| f(b(x) ^ b(y)));
    check_binary::<Nand>(&bits, |x, y| f(!(b(x) && b(y))));
    check_binary::<Nor>(&bits, |x, y| f(!(b(x) || b(y))));
}

#[test]
fn boolean_families_do_not_share_gates() {
    let mut runner = TestFramework::new(3)
        .public_inputs(vec![Fr::one(), Fr::zero()])
        .setup();
    let layout = ComponentLayout::witness_range(3);
    let input = BinaryInput {
        x: runner.public(0),
        y: runner.public(1),
    };
    runner.add(&AndComponent::new(layout.clone()), &input);
    runner.add(&OrComponent::new(layout.clone()), &input);
    runner.add(&XorComponent::new(layout.clone()), &input);
    runner.add(&NandComponent::new(layout.clone()), &input);
    runner.add(&NorComponent::new(layout.clone()), &input);
    runner.add(&SubComponent::new(layout.clone()), &input);
    // AND and MUL are the same polynomial
    runner.add(&MulComponent::new(layout.clone()), &input);
    runner.add(&AddComponent::new(layout), &input);
    assert_eq!(runner.circuit().gates().len(), 7);
    runner.verify().unwrap();
}

#[test]
fn div_or_zero() {
    let mut rng = StdRng::from_seed(RNG_SEED);
    let x = Fr::rand(&mut rng);
    let y = Fr::rand(&mut rng);
    let mut runner = TestFramework::new(4)
        .public_inputs(vec![x, y, Fr::zero()])
        .setup();
    let div = DivOrZero::new(ComponentLayout::witness_range(4));

    let quotient = runner.add(
        &div,
        &BinaryInput {
            x: runner.public(0),
            y: runner.public(1),
        },
    );
    let degenerate = runner.add(
        &div,
        &BinaryInput {
            x: runner.public(0),
            y: runner.public(2),
        },
    );
    assert_eq!(runner.value(&quotient.output) * y, x);
    assert_eq!(runner.value(&degenerate.output), Fr::zero());
    assert_eq!(runner.value(&Variable::witness(3, 1)), Fr::zero());
    runner.verify().unwrap();

    // a non-zero inverse of zero breaks the second constraint
    *runner.table_mut().witness_mut(3, 1) = Fr::one();
    *runner.table_mut().witness_mut(2, 1) = x;
    assert_eq!(
        runner.verify(),
        Err(CircuitError::UnsatisfiedConstraint {
            selector: 0,
            constraint: 1,
            row: 1
        })
    );
}

#[test]
fn unary_components() {
    let mut runner = TestFramework::new(2)
        .constants(2)
        .public_inputs(vec![Fr::one(), Fr::from(6u64)])
        .setup();
    let not = Not::new(ComponentLayout::witness_range(2));
    let inverted = runner.add(&not, &UnaryInput { x: runner.public(0) });
    assert_eq!(runner.value(&inverted.output), Fr::zero());

    // the constant may sit in any declared constant column
    let half = Fr::from(2u64).inverse().unwrap();
    let halve = MulByConstant::new(ComponentLayout::new(vec![1, 0]).constants(vec![1]), half);
    let halved = runner.add(&halve, &UnaryInput { x: runner.public(1) });
    assert_eq!(runner.value(&halved.output), Fr::from(3u64));
    assert_eq!(halved.output, Variable::witness(0, 1));
    assert_eq!(runner.table().constant(1, 1), half);
    runner.verify().unwrap();
}

#[test]
fn broken_wiring_is_reported() {
    let mut runner = TestFramework::new(3)
        .public_inputs(vec![Fr::from(4u64), Fr::from(5u64)])
        .setup();
    let add = AddComponent::new(ComponentLayout::witness_range(3));
    runner.add(
        &add,
        &BinaryInput {
            x: runner.public(0),
            y: runner.public(1),
        },
    );
    *runner.table_mut().public_input_mut(0, 1) = Fr::from(6u64);
    assert!(matches!(
        runner.verify(),
        Err(CircuitError::CopyConstraintViolated(..))
    ));
}

#[test]
#[should_panic(expected = "does not satisfy manifest")]
fn layouts_are_checked_at_construction() {
    DivOrZero::<Fr>::new(ComponentLayout::witness_range(3));
}

#[test]
#[should_panic(expected = "the witness and circuit phases returned different outputs")]
fn phases_must_agree() {
    use crate::{
        circuits::{
            assignment::AssignmentTable, constraints::Circuit, gate::GateConstraints,
        },
        components::{Component, Manifest, ManifestParam, ScalarResult},
    };

    /// Returns a different cell from its witness phase.
    struct Confused(ComponentLayout);

    impl Component<Fr> for Confused {
        type Input = UnaryInput;
        type Output = ScalarResult;

        fn manifest() -> Manifest {
            Manifest::new(ManifestParam::Single(1))
        }

        fn layout(&self) -> &ComponentLayout {
            &self.0
        }

        fn rows_amount(&self) -> usize {
            1
        }

        fn gates(&self) -> Vec<GateConstraints<Fr>> {
            vec![]
        }

        fn result(&self, start_row: usize) -> ScalarResult {
            ScalarResult {
                output: Variable::witness(0, start_row),
            }
        }

        fn generate_assignments(
            &self,
            table: &mut AssignmentTable<Fr>,
            input: &UnaryInput,
            start_row: usize,
        ) -> ScalarResult {
            let x = table.var_value(&input.x);
            table.assign(&Variable::witness(0, start_row + 1), x);
            ScalarResult {
                output: Variable::witness(0, start_row + 1),
            }
        }

        fn generate_copy_constraints(
            &self,
            _circuit: &mut Circuit<Fr>,
            _table: &AssignmentTable<Fr>,
            _input: &UnaryInput,
            _start_row: usize,
        ) {
        }
    }

    let mut runner = TestFramework::new(1).public_inputs(vec![Fr::one()]).setup();
    runner.add(
        &Confused(ComponentLayout::witness_range(1)),
        &UnaryInput {
            x: runner.public(0),
        },
    );
}
