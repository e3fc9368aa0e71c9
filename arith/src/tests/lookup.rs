use super::framework::TestFramework;
use crate::{
    circuits::lookup::{LookupLibrary, RangeTable, XorTable},
    components::{
        range_check::RangeCheck, xor::XorLookup, BinaryInput, ComponentLayout, UnaryInput,
    },
    error::{CircuitError, LookupError},
};
use ark_bn254::Fr;
use proptest::prelude::*;

#[test]
fn range_check_accepts_bytes() {
    let mut runner = TestFramework::new(1)
        .public_inputs(vec![Fr::from(0u64), Fr::from(255u64)])
        .setup();
    let check = RangeCheck::new(ComponentLayout::witness_range(1));
    runner.add(&check, &UnaryInput { x: runner.public(0) });
    runner.add(&check, &UnaryInput { x: runner.public(1) });
    assert_eq!(runner.circuit().lookup_gates().len(), 1);
    runner.verify().unwrap();
}

#[test]
fn range_check_rejects_wide_values() {
    let mut runner = TestFramework::new(1)
        .public_inputs(vec![Fr::from(256u64)])
        .setup();
    runner.add(
        &RangeCheck::new(ComponentLayout::witness_range(1)),
        &UnaryInput { x: runner.public(0) },
    );
    assert_eq!(
        runner.verify(),
        Err(CircuitError::ValueNotInTable {
            selector: 0,
            row: 0,
            table: "range_8/full".into()
        })
    );
}

#[test]
fn subtables_are_separate_gates() {
    let mut runner = TestFramework::new(1)
        .public_inputs(vec![Fr::from(15u64), Fr::from(200u64)])
        .setup();
    let nibble = RangeCheck::with_table(ComponentLayout::witness_range(1), "range_8/nibble");
    let byte = RangeCheck::new(ComponentLayout::witness_range(1));
    runner.add(&nibble, &UnaryInput { x: runner.public(0) });
    runner.add(&byte, &UnaryInput { x: runner.public(1) });
    assert_eq!(
        runner.circuit().lookup_tables(),
        ["range_8/nibble", "range_8/full"]
    );
    runner.verify().unwrap();
}

#[test]
fn missing_tables_fail_verification() {
    let mut library = LookupLibrary::<Fr>::new();
    library.register(XorTable::new(4));
    let mut runner = TestFramework::new(1)
        .public_inputs(vec![Fr::from(1u64)])
        .lookup_library(library)
        .setup();
    runner.add(
        &RangeCheck::new(ComponentLayout::witness_range(1)),
        &UnaryInput { x: runner.public(0) },
    );
    assert_eq!(
        runner.verify(),
        Err(CircuitError::Lookup(LookupError::UnknownTable("range_8".into())))
    );
}

#[test]
fn custom_range_tables() {
    let mut library = LookupLibrary::<Fr>::new();
    library.register(RangeTable::new(12));
    let mut runner = TestFramework::new(1)
        .public_inputs(vec![Fr::from(4095u64)])
        .lookup_library(library)
        .setup();
    runner.add(
        &RangeCheck::with_table(ComponentLayout::witness_range(1), "range_12/full"),
        &UnaryInput { x: runner.public(0) },
    );
    runner.verify().unwrap();
}

proptest! {
    #[test]
    fn xor_lookup(a in 0u64..16, b in 0u64..16) {
        let mut runner = TestFramework::new(3)
            .public_inputs(vec![Fr::from(a), Fr::from(b)])
            .setup();
        let xor = XorLookup::new(ComponentLayout::witness_range(3));
        let input = BinaryInput {
            x: runner.public(0),
            y: runner.public(1),
        };
        let result = runner.add(&xor, &input);
        prop_assert_eq!(runner.value(&result.output), Fr::from(a ^ b));
        prop_assert!(runner.verify().is_ok());
    }

    #[test]
    fn xor_lookup_rejects_wide_operands(a in 16u64..1024, b in 0u64..16) {
        let mut runner = TestFramework::new(3)
            .public_inputs(vec![Fr::from(a), Fr::from(b)])
            .setup();
        let xor = XorLookup::new(ComponentLayout::witness_range(3));
        let input = BinaryInput {
            x: runner.public(0),
            y: runner.public(1),
        };
        runner.add(&xor, &input);
        let missing = matches!(
            runner.verify(),
            Err(CircuitError::ValueNotInTable { .. })
        );
        prop_assert!(missing);
    }
}
