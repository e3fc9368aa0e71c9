//! This module implements lookup tables: fixed input/output correspondences
//! that gates reference by name instead of expressing them with polynomials.
//!
//! A table is generated once, on first use, and exposes named subtables: a
//! choice of columns and a range of rows. Lookup constraints name a subtable as
//! `table/subtable`.

use crate::error::LookupError;
use ark_ff::Field;
use log::debug;
use once_cell::unsync::OnceCell;
use std::{collections::BTreeMap, ops::Range};

pub mod range;
pub mod xor;

pub use range::RangeTable;
pub use xor::XorTable;

/// The columns and rows of a table exposed under a subtable name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subtable {
    pub columns: Vec<usize>,
    pub rows: Range<usize>,
}

impl Subtable {
    pub fn new(columns: Vec<usize>, rows: Range<usize>) -> Self {
        Self { columns, rows }
    }
}

/// How a lookup table is laid out and filled.
///
/// [LookupTableDefinition::generate] must be pure: its output depends only on
/// the field and the construction parameters of the definition.
pub trait LookupTableDefinition<F: Field> {
    fn name(&self) -> String;

    fn columns_number(&self) -> usize;

    fn rows_number(&self) -> usize;

    fn subtables(&self) -> BTreeMap<String, Subtable>;

    /// The table contents, one vector per column.
    fn generate(&self) -> Vec<Vec<F>>;
}

/// A table definition together with its memoized contents.
pub struct LookupTable<F: Field> {
    definition: Box<dyn LookupTableDefinition<F>>,
    data: OnceCell<Vec<Vec<F>>>,
}

impl<F: Field> LookupTable<F> {
    pub fn new(definition: impl LookupTableDefinition<F> + 'static) -> Self {
        Self {
            definition: Box::new(definition),
            data: OnceCell::new(),
        }
    }

    pub fn name(&self) -> String {
        self.definition.name()
    }

    pub fn columns_number(&self) -> usize {
        self.definition.columns_number()
    }

    pub fn rows_number(&self) -> usize {
        self.definition.rows_number()
    }

    /// The generated columns. The first call runs the generator.
    ///
    /// # Panics
    ///
    /// Will panic if the generator disagrees with the declared dimensions.
    pub fn data(&self) -> &[Vec<F>] {
        self.data.get_or_init(|| {
            debug!("generating lookup table {}", self.name());
            let data = self.definition.generate();
            assert_eq!(
                data.len(),
                self.columns_number(),
                "lookup table {} generated the wrong number of columns",
                self.name()
            );
            assert!(
                data.iter().all(|column| column.len() == self.rows_number()),
                "lookup table {} generated columns of the wrong height",
                self.name()
            );
            data
        })
    }

    pub fn is_generated(&self) -> bool {
        self.data.get().is_some()
    }

    /// Looks up a subtable and checks it fits in the table.
    pub fn subtable(&self, name: &str) -> Result<Subtable, LookupError> {
        let subtable = self
            .definition
            .subtables()
            .remove(name)
            .ok_or_else(|| LookupError::UnknownSubtable {
                table: self.name(),
                subtable: name.to_string(),
            })?;
        if let Some(&column) = subtable
            .columns
            .iter()
            .find(|&&column| column >= self.columns_number())
        {
            return Err(LookupError::ColumnOutOfTable {
                table: self.name(),
                subtable: name.to_string(),
                column,
                columns: self.columns_number(),
            });
        }
        if subtable.rows.end > self.rows_number() {
            return Err(LookupError::RowsOutOfTable {
                table: self.name(),
                subtable: name.to_string(),
                end: subtable.rows.end,
                rows: self.rows_number(),
            });
        }
        Ok(subtable)
    }

    /// The tuples of a subtable, one per row.
    pub fn subtable_rows(&self, name: &str) -> Result<Vec<Vec<F>>, LookupError> {
        let subtable = self.subtable(name)?;
        let data = self.data();
        Ok(subtable
            .rows
            .map(|row| {
                subtable
                    .columns
                    .iter()
                    .map(|&column| data[column][row])
                    .collect()
            })
            .collect())
    }
}

/// Splits a full `table/subtable` name.
pub fn split_name(full_name: &str) -> Result<(&str, &str), LookupError> {
    match full_name.split_once('/') {
        Some((table, subtable)) if !table.is_empty() && !subtable.is_empty() => {
            Ok((table, subtable))
        }
        _ => Err(LookupError::MalformedName(full_name.to_string())),
    }
}

/// Lookup tables keyed by name, shared by every component of a build.
pub struct LookupLibrary<F: Field> {
    tables: BTreeMap<String, LookupTable<F>>,
}

impl<F: Field> Default for LookupLibrary<F> {
    fn default() -> Self {
        Self {
            tables: BTreeMap::new(),
        }
    }
}

impl<F: Field> LookupLibrary<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The library with the 8-bit range table and the 4-bit xor table.
    pub fn standard() -> Self {
        let mut library = Self::new();
        library.register(RangeTable::new(8));
        library.register(XorTable::new(4));
        library
    }

    /// Adds a table. Registering a name twice keeps the first table.
    pub fn register(&mut self, definition: impl LookupTableDefinition<F> + 'static) {
        let table = LookupTable::new(definition);
        self.tables.entry(table.name()).or_insert(table);
    }

    pub fn get(&self, name: &str) -> Result<&LookupTable<F>, LookupError> {
        self.tables
            .get(name)
            .ok_or_else(|| LookupError::UnknownTable(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.tables.keys()
    }

    /// The tuples of the subtable named `table/subtable`.
    pub fn subtable_rows(&self, full_name: &str) -> Result<Vec<Vec<F>>, LookupError> {
        let (table, subtable) = split_name(full_name)?;
        self.get(table)?.subtable_rows(subtable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;

    struct Broken;

    impl LookupTableDefinition<Fr> for Broken {
        fn name(&self) -> String {
            "broken".into()
        }

        fn columns_number(&self) -> usize {
            1
        }

        fn rows_number(&self) -> usize {
            2
        }

        fn subtables(&self) -> BTreeMap<String, Subtable> {
            BTreeMap::from([
                ("wide".to_string(), Subtable::new(vec![0, 1], 0..2)),
                ("tall".to_string(), Subtable::new(vec![0], 0..3)),
            ])
        }

        fn generate(&self) -> Vec<Vec<Fr>> {
            vec![vec![Fr::from(0u64), Fr::from(1u64)]]
        }
    }

    #[test]
    fn names_are_split_once() {
        assert_eq!(split_name("range_8/full"), Ok(("range_8", "full")));
        assert!(split_name("range_8").is_err());
        assert!(split_name("/full").is_err());
    }

    #[test]
    fn tables_are_generated_lazily() {
        let library = LookupLibrary::<Fr>::standard();
        let range = library.get("range_8").unwrap();
        assert!(!range.is_generated());
        assert_eq!(library.subtable_rows("range_8/nibble").unwrap().len(), 16);
        assert!(range.is_generated());
        assert!(!library.get("xor_4").unwrap().is_generated());
    }

    #[test]
    fn unknown_names_are_errors() {
        let library = LookupLibrary::<Fr>::standard();
        assert_eq!(
            library.subtable_rows("sha/full"),
            Err(LookupError::UnknownTable("sha".into()))
        );
        assert!(matches!(
            library.subtable_rows("range_8/odd"),
            Err(LookupError::UnknownSubtable { .. })
        ));
    }

    #[test]
    fn subtables_must_fit() {
        let mut library = LookupLibrary::<Fr>::new();
        library.register(Broken);
        assert!(matches!(
            library.subtable_rows("broken/wide"),
            Err(LookupError::ColumnOutOfTable { column: 1, .. })
        ));
        assert!(matches!(
            library.subtable_rows("broken/tall"),
            Err(LookupError::RowsOutOfTable { end: 3, .. })
        ));
    }
}
