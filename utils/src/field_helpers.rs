//! Helper methods extending [ark_ff::Field] and [ark_ff::PrimeField].

use ark_ff::{Field, PrimeField};
use num_bigint::BigUint;

/// Field element helpers
pub trait FieldHelpers<F> {
    /// Multiplicative inverse, with `0` mapped to `0`.
    ///
    /// Gadgets rely on this convention: a degenerate inversion produces a
    /// zero witness that an auxiliary flag wire then absorbs.
    fn inv_or_zero(&self) -> F;

    /// Canonical integer representative
    fn to_biguint(&self) -> BigUint
    where
        F: PrimeField;

    /// Big-endian hex of the canonical representative, left-padded to
    /// [FieldHelpers::size_in_bytes] bytes.
    fn to_hex_be(&self) -> String
    where
        F: PrimeField;

    /// Big-endian hex of the canonical representative without padding.
    fn to_hex_compact(&self) -> String
    where
        F: PrimeField;

    /// Lowest 64 bits of the canonical representative.
    fn to_u64_lossy(&self) -> u64
    where
        F: PrimeField;

    /// Field size in bytes
    fn size_in_bytes() -> usize
    where
        F: PrimeField,
    {
        (F::MODULUS_BIT_SIZE as usize + 7) / 8
    }
}

impl<F: Field> FieldHelpers<F> for F {
    fn inv_or_zero(&self) -> F {
        self.inverse().unwrap_or_else(F::zero)
    }

    fn to_biguint(&self) -> BigUint
    where
        F: PrimeField,
    {
        self.into_bigint().into()
    }

    fn to_hex_be(&self) -> String
    where
        F: PrimeField,
    {
        let digits = self.to_biguint().to_bytes_be();
        let width = <F as FieldHelpers<F>>::size_in_bytes();
        let mut bytes = vec![0u8; width.saturating_sub(digits.len())];
        bytes.extend(digits);
        hex::encode(bytes)
    }

    fn to_hex_compact(&self) -> String
    where
        F: PrimeField,
    {
        format!("{:x}", self.to_biguint())
    }

    fn to_u64_lossy(&self) -> u64
    where
        F: PrimeField,
    {
        self.into_bigint().as_ref()[0]
    }
}
