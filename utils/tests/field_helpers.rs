use ark_bn254::Fr;
use ark_ff::{One, PrimeField, Zero};
use arith_utils::FieldHelpers;
use num_bigint::BigUint;

#[test]
fn fixed_width_hex_is_padded() {
    let width = 2 * Fr::size_in_bytes();
    for value in [Fr::zero(), Fr::one(), Fr::from(u64::MAX), -Fr::one()] {
        assert_eq!(value.to_hex_be().len(), width);
    }
    let modulus = BigUint::from(Fr::MODULUS);
    assert_eq!(
        (-Fr::one()).to_hex_compact(),
        (modulus - 1u32).to_str_radix(16)
    );
}

#[test]
fn compact_hex_of_small_values() {
    assert_eq!(Fr::zero().to_hex_compact(), "0");
    assert_eq!(Fr::from(10u64).to_hex_compact(), "a");
    assert_eq!(Fr::from(0x100u64).to_hex_compact(), "100");
}

#[test]
fn low_word_wraps_above_u64() {
    let two_64 = Fr::from(u64::MAX) + Fr::one();
    assert_eq!(two_64.to_u64_lossy(), 0);
    assert_eq!((two_64 + Fr::from(5u64)).to_u64_lossy(), 5);
    assert_eq!(two_64.to_biguint(), BigUint::from(1u32) << 64);
}
