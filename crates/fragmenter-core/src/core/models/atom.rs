use super::element::Element;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Represents a single atom of a molecule snapshot.
///
/// Atoms are plain values: once a molecule or graph is built from them they are
/// never mutated, and derived fragments hold their own copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// The chemical element of the atom.
    pub element: Element,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` of the given element at the given position.
    ///
    /// # Arguments
    ///
    /// * `element` - The chemical element.
    /// * `position` - The 3D coordinates in Angstroms.
    pub fn new(element: Element, position: Point3<f64>) -> Self {
        Self { element, position }
    }

    /// Euclidean distance to another atom in Angstroms.
    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }
}
