//! Persistent records of previously computed molecules.
//!
//! The fragmentation engine only ever reads from a store, through the
//! [`MoleculeStore`] trait. A store answers coarse queries by formula, charge and
//! spin; structural comparison happens on the caller's side.

pub mod json;
pub mod memory;

use crate::core::models::formula::Formula;
use crate::core::models::molecule::Molecule;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read store at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse store at '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store is unavailable: {0}")]
    Unavailable(String),
}

/// A coarse lookup key: records must match all three fields exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordQuery {
    pub formula: Formula,
    pub charge: i32,
    pub spin_multiplicity: u8,
}

impl RecordQuery {
    pub fn new(formula: Formula, charge: i32, spin_multiplicity: u8) -> Self {
        Self {
            formula,
            charge,
            spin_multiplicity,
        }
    }

    pub fn matches(&self, molecule: &Molecule) -> bool {
        molecule.charge() == self.charge
            && molecule.spin_multiplicity() == self.spin_multiplicity
            && molecule.formula() == self.formula
    }
}

/// A molecule as stored, with its record identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMolecule {
    pub id: String,
    pub molecule: Molecule,
}

/// Read access to previously computed molecules.
pub trait MoleculeStore {
    /// Returns every record whose formula, charge and spin multiplicity match
    /// `query`. The result may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be queried.
    fn find(&self, query: &RecordQuery) -> Result<Vec<StoredMolecule>, StoreError>;
}
