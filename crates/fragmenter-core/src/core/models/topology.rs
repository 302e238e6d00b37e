use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

#[derive(Debug, Error)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "s" | "single" => Ok(Self::Single),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            "ar" | "aromatic" => Ok(Self::Aromatic),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Aromatic => "Aromatic",
            }
        )
    }
}

/// An unordered bond between two atoms, addressed by their index in the molecule.
///
/// Bonds built through [`Bond::new`] store the smaller index first, so two bonds
/// over the same atom pair compare equal regardless of the order they were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bond {
    pub atom1: usize, // Index of the lower-numbered atom
    pub atom2: usize, // Index of the higher-numbered atom
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<BondOrder>, // Known only for explicit connectivity
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, order: Option<BondOrder>) -> Self {
        let (atom1, atom2) = if atom1 <= atom2 {
            (atom1, atom2)
        } else {
            (atom2, atom1)
        };
        Self {
            atom1,
            atom2,
            order,
        }
    }

    pub fn single(atom1: usize, atom2: usize) -> Self {
        Self::new(atom1, atom2, Some(BondOrder::Single))
    }

    /// A bond whose order is unknown, as produced by geometric perception.
    pub fn unordered(atom1: usize, atom2: usize) -> Self {
        Self::new(atom1, atom2, None)
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.atom1, self.atom2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_order_from_str_parses_valid_strings() {
        assert_eq!("1".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("single".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("S".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("2".parse::<BondOrder>().unwrap(), BondOrder::Double);
        assert_eq!("D".parse::<BondOrder>().unwrap(), BondOrder::Double);
        assert_eq!("triple".parse::<BondOrder>().unwrap(), BondOrder::Triple);
        assert_eq!("ar".parse::<BondOrder>().unwrap(), BondOrder::Aromatic);
    }

    #[test]
    fn bond_order_from_str_rejects_invalid_strings() {
        assert!("".parse::<BondOrder>().is_err());
        assert!("quadruple".parse::<BondOrder>().is_err());
        assert!("0".parse::<BondOrder>().is_err());
    }

    #[test]
    fn bond_order_display_outputs_expected_strings() {
        assert_eq!(BondOrder::Single.to_string(), "Single");
        assert_eq!(BondOrder::Aromatic.to_string(), "Aromatic");
    }

    #[test]
    fn bond_new_normalizes_atom_order() {
        let forward = Bond::new(3, 7, Some(BondOrder::Double));
        let reverse = Bond::new(7, 3, Some(BondOrder::Double));
        assert_eq!(forward, reverse);
        assert_eq!(forward.endpoints(), (3, 7));
    }

    #[test]
    fn bond_contains_returns_true_for_both_atoms_only() {
        let bond = Bond::unordered(10, 20);
        assert!(bond.contains(10));
        assert!(bond.contains(20));
        assert!(!bond.contains(30));
        assert_eq!(bond.order, None);
    }

    #[test]
    fn bond_serializes_without_unknown_order() {
        let json = serde_json::to_string(&Bond::unordered(0, 1)).unwrap();
        assert_eq!(json, r#"{"atom1":0,"atom2":1}"#);
        let json = serde_json::to_string(&Bond::single(1, 0)).unwrap();
        assert_eq!(json, r#"{"atom1":0,"atom2":1,"order":"single"}"#);
    }
}
