//! Distance-based connectivity perception.
//!
//! Two atoms are bonded when their distance does not exceed the sum of their
//! covalent radii plus a tolerance. Elements without a covalent radius (noble
//! gases) are never bonded.

use super::molecule_graph::{GraphError, MoleculeGraph};
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::Bond;
use serde::{Deserialize, Serialize};

/// Default tolerance added to the covalent radius sum (Angstroms).
pub const DEFAULT_TOLERANCE: f64 = 0.4;
/// Default distance below which two atoms are considered overlapping (Angstroms).
pub const DEFAULT_MIN_DISTANCE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityParams {
    pub tolerance: f64,
    pub min_distance: f64,
}

impl Default for ConnectivityParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }
}

/// Perceives the bonds of a molecule from its geometry.
///
/// O(n^2) over atom pairs, which is fine for the molecule sizes fragmentation
/// is feasible for anyway.
///
/// # Errors
///
/// Fails with [`GraphError::NonFiniteCoordinate`] or
/// [`GraphError::OverlappingAtoms`] when the geometry cannot support a
/// connectivity guess.
pub fn perceive_bonds(
    molecule: &Molecule,
    params: &ConnectivityParams,
) -> Result<Vec<Bond>, GraphError> {
    let atoms = molecule.atoms();
    if let Some(atom) = atoms
        .iter()
        .position(|a| a.position.coords.iter().any(|c| !c.is_finite()))
    {
        return Err(GraphError::NonFiniteCoordinate { atom });
    }

    let mut bonds = Vec::new();
    for (i, atom_i) in atoms.iter().enumerate() {
        for (j, atom_j) in atoms.iter().enumerate().skip(i + 1) {
            let distance = atom_i.distance_to(atom_j);
            if distance < params.min_distance {
                return Err(GraphError::OverlappingAtoms {
                    atom1: i,
                    atom2: j,
                    distance,
                });
            }
            let (Some(r_i), Some(r_j)) = (
                atom_i.element.covalent_radius(),
                atom_j.element.covalent_radius(),
            ) else {
                continue;
            };
            if distance <= r_i + r_j + params.tolerance {
                bonds.push(Bond::unordered(i, j));
            }
        }
    }
    Ok(bonds)
}

/// Builds a molecule graph whose bonds are perceived from geometry.
pub fn perceive_graph(
    molecule: &Molecule,
    params: &ConnectivityParams,
) -> Result<MoleculeGraph, GraphError> {
    let bonds = perceive_bonds(molecule, params)?;
    MoleculeGraph::with_bonds(molecule, &bonds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use nalgebra::Point3;

    fn water() -> Molecule {
        Molecule::new(vec![
            Atom::new(Element::O, Point3::new(0.0, 0.0, 0.0)),
            Atom::new(Element::H, Point3::new(0.9572, 0.0, 0.0)),
            Atom::new(Element::H, Point3::new(-0.2400, 0.9266, 0.0)),
        ])
    }

    #[test]
    fn perceives_water_bonds_but_not_the_hydrogen_pair() {
        let bonds = perceive_bonds(&water(), &ConnectivityParams::default()).unwrap();
        assert_eq!(bonds, vec![Bond::unordered(0, 1), Bond::unordered(0, 2)]);
    }

    #[test]
    fn distant_atoms_are_not_bonded() {
        let molecule = Molecule::new(vec![
            Atom::new(Element::C, Point3::new(0.0, 0.0, 0.0)),
            Atom::new(Element::C, Point3::new(3.0, 0.0, 0.0)),
        ]);
        let graph = perceive_graph(&molecule, &ConnectivityParams::default()).unwrap();
        assert_eq!(graph.num_bonds(), 0);
        assert!(!graph.is_connected());
    }

    #[test]
    fn noble_gases_are_never_bonded() {
        let molecule = Molecule::new(vec![
            Atom::new(Element::Ar, Point3::new(0.0, 0.0, 0.0)),
            Atom::new(Element::H, Point3::new(1.0, 0.0, 0.0)),
        ]);
        let bonds = perceive_bonds(&molecule, &ConnectivityParams::default()).unwrap();
        assert!(bonds.is_empty());
    }

    #[test]
    fn overlapping_atoms_fail_perception() {
        let molecule = Molecule::new(vec![
            Atom::new(Element::C, Point3::new(0.0, 0.0, 0.0)),
            Atom::new(Element::O, Point3::new(0.1, 0.0, 0.0)),
        ]);
        let result = perceive_bonds(&molecule, &ConnectivityParams::default());
        assert!(matches!(
            result,
            Err(GraphError::OverlappingAtoms {
                atom1: 0,
                atom2: 1,
                ..
            })
        ));
    }

    #[test]
    fn non_finite_coordinates_fail_perception() {
        let molecule = Molecule::new(vec![
            Atom::new(Element::C, Point3::new(0.0, 0.0, 0.0)),
            Atom::new(Element::O, Point3::new(f64::NAN, 0.0, 0.0)),
        ]);
        let result = perceive_bonds(&molecule, &ConnectivityParams::default());
        assert_eq!(result, Err(GraphError::NonFiniteCoordinate { atom: 1 }));
    }
}
