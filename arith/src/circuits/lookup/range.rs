//! Range table: a single column holding `0..2^bits`.

use super::{LookupTableDefinition, Subtable};
use ark_ff::Field;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeTable {
    bits: u32,
}

impl RangeTable {
    /// # Panics
    ///
    /// Will panic if `bits` is not in `4..=16`.
    pub fn new(bits: u32) -> Self {
        assert!(
            (4..=16).contains(&bits),
            "range tables hold between 4 and 16 bits, got {bits}"
        );
        Self { bits }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    fn size(&self) -> usize {
        1 << self.bits
    }
}

impl<F: Field> LookupTableDefinition<F> for RangeTable {
    fn name(&self) -> String {
        format!("range_{}", self.bits)
    }

    fn columns_number(&self) -> usize {
        1
    }

    fn rows_number(&self) -> usize {
        self.size()
    }

    /// `full` is the whole range, `nibble` its first 16 values.
    fn subtables(&self) -> BTreeMap<String, Subtable> {
        BTreeMap::from([
            ("full".to_string(), Subtable::new(vec![0], 0..self.size())),
            ("nibble".to_string(), Subtable::new(vec![0], 0..16)),
        ])
    }

    fn generate(&self) -> Vec<Vec<F>> {
        vec![(0..1u64 << self.bits).map(F::from).collect()]
    }
}
