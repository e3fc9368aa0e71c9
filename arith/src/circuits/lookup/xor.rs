//! Xor table: every pair `(a, b)` of `bits`-bit values with `a ^ b`.

use super::{LookupTableDefinition, Subtable};
use ark_ff::Field;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XorTable {
    bits: u32,
}

impl XorTable {
    /// # Panics
    ///
    /// Will panic if `bits` is not in `1..=8`.
    pub fn new(bits: u32) -> Self {
        assert!(
            (1..=8).contains(&bits),
            "xor tables hold between 1 and 8 bits, got {bits}"
        );
        Self { bits }
    }

    fn size(&self) -> usize {
        1 << (2 * self.bits)
    }
}

impl<F: Field> LookupTableDefinition<F> for XorTable {
    fn name(&self) -> String {
        format!("xor_{}", self.bits)
    }

    fn columns_number(&self) -> usize {
        3
    }

    fn rows_number(&self) -> usize {
        self.size()
    }

    /// `full` holds `(a, b, a ^ b)`, `operands` only `(a, b)`.
    fn subtables(&self) -> BTreeMap<String, Subtable> {
        BTreeMap::from([
            ("full".to_string(), Subtable::new(vec![0, 1, 2], 0..self.size())),
            ("operands".to_string(), Subtable::new(vec![0, 1], 0..self.size())),
        ])
    }

    fn generate(&self) -> Vec<Vec<F>> {
        let mut data = vec![vec![]; 3];
        for i in 0u64..1 << self.bits {
            for j in 0u64..1 << self.bits {
                data[0].push(F::from(i));
                data[1].push(F::from(j));
                data[2].push(F::from(i ^ j));
            }
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::lookup::LookupTable;
    use ark_bn254::Fr;

    #[test]
    fn xor_contents() {
        let table = LookupTable::<Fr>::new(XorTable::new(4));
        let rows = table.subtable_rows("full").unwrap();
        assert_eq!(rows.len(), 256);
        let row = |a: u64, b: u64, c: u64| vec![Fr::from(a), Fr::from(b), Fr::from(c)];
        assert!(rows.contains(&row(0b1010, 0b0110, 0b1100)));
        assert!(!rows.contains(&row(1, 1, 1)));
        // row 16 * a + b holds (a, b)
        let operands = table.subtable_rows("operands").unwrap();
        assert_eq!(operands[17], vec![Fr::from(1u64), Fr::from(1u64)]);
    }
}
