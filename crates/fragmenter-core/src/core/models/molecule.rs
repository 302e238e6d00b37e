use super::atom::Atom;
use super::formula::Formula;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MoleculeError {
    #[error("Charge {charge} leaves {electrons} electrons, which is not a valid electron count")]
    NegativeElectronCount { charge: i32, electrons: i64 },

    #[error(
        "Spin multiplicity {spin} is inconsistent with {electrons} electrons (charge {charge})"
    )]
    InconsistentSpin {
        charge: i32,
        spin: u8,
        electrons: i64,
    },
}

/// Derives the spin multiplicity from electron parity.
///
/// Even electron counts are treated as closed-shell singlets, odd ones as
/// doublets. This is the only rule used to assign spin to fragments.
pub fn spin_multiplicity_for(electrons: i64) -> u8 {
    if electrons % 2 == 0 { 1 } else { 2 }
}

/// A molecule snapshot: ordered atoms with a net charge and spin multiplicity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    atoms: Vec<Atom>,
    charge: i32,
    spin_multiplicity: u8,
}

impl Molecule {
    /// Creates a neutral molecule with the spin multiplicity derived from parity.
    pub fn new(atoms: Vec<Atom>) -> Self {
        let electrons = Formula::from_atoms(&atoms).electron_count(0);
        Self {
            atoms,
            charge: 0,
            spin_multiplicity: spin_multiplicity_for(electrons),
        }
    }

    /// Creates a molecule with an explicit charge and an optional explicit spin.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError`] if the charge removes more electrons than the
    /// molecule has, or if an explicit spin disagrees with the electron parity.
    pub fn with_charge_and_spin(
        atoms: Vec<Atom>,
        charge: i32,
        spin_multiplicity: Option<u8>,
    ) -> Result<Self, MoleculeError> {
        let mut molecule = Self::new(atoms);
        molecule.set_charge_and_spin(charge, spin_multiplicity)?;
        Ok(molecule)
    }

    /// Sets the net charge and spin in one step, validating them against each other.
    pub fn set_charge_and_spin(
        &mut self,
        charge: i32,
        spin_multiplicity: Option<u8>,
    ) -> Result<(), MoleculeError> {
        let electrons = self.formula().electron_count(charge);
        if electrons < 0 {
            return Err(MoleculeError::NegativeElectronCount { charge, electrons });
        }
        let spin = match spin_multiplicity {
            Some(spin) => {
                // Multiplicity 2S+1 is odd exactly when the electron count is even.
                if spin == 0 || (electrons + i64::from(spin)) % 2 == 0 {
                    return Err(MoleculeError::InconsistentSpin {
                        charge,
                        spin,
                        electrons,
                    });
                }
                spin
            }
            None => spin_multiplicity_for(electrons),
        };
        self.charge = charge;
        self.spin_multiplicity = spin;
        Ok(())
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn spin_multiplicity(&self) -> u8 {
        self.spin_multiplicity
    }

    pub fn formula(&self) -> Formula {
        Formula::from_atoms(&self.atoms)
    }

    pub fn electron_count(&self) -> i64 {
        self.formula().electron_count(self.charge)
    }
}
