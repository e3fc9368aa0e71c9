//! This module implements the configuration of a build: how many columns of
//! each kind the assignment table and the circuit are created with.

use crate::{circuits::variable::ColumnKind, error::ConfigError};
use serde::{Deserialize, Serialize};

/// Column counts shared by an [crate::circuits::assignment::AssignmentTable]
/// and a [crate::circuits::constraints::Circuit] built together.
///
/// `selector_columns` is only the initial selector count: allocating gates
/// adds selector columns as needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArithmetizationParams {
    pub witness_columns: usize,
    #[serde(default)]
    pub public_input_columns: usize,
    #[serde(default)]
    pub constant_columns: usize,
    #[serde(default)]
    pub selector_columns: usize,
}

impl ArithmetizationParams {
    /// Starts a configuration with `witness_columns` witness columns and no other columns.
    pub fn new(witness_columns: usize) -> Self {
        Self {
            witness_columns,
            public_input_columns: 0,
            constant_columns: 0,
            selector_columns: 0,
        }
    }

    #[must_use]
    pub fn public_inputs(mut self, public_input_columns: usize) -> Self {
        self.public_input_columns = public_input_columns;
        self
    }

    #[must_use]
    pub fn constants(mut self, constant_columns: usize) -> Self {
        self.constant_columns = constant_columns;
        self
    }

    #[must_use]
    pub fn selectors(mut self, selector_columns: usize) -> Self {
        self.selector_columns = selector_columns;
        self
    }

    /// Declared column count for a kind
    pub fn columns(&self, kind: ColumnKind) -> usize {
        match kind {
            ColumnKind::Witness => self.witness_columns,
            ColumnKind::PublicInput => self.public_input_columns,
            ColumnKind::Constant => self.constant_columns,
            ColumnKind::Selector => self.selector_columns,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.witness_columns == 0 {
            return Err(ConfigError::NoWitnessColumns);
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }
}
