use crate::core::graph::molecule_graph::{MoleculeGraph, StructureKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Position of a fragment in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentId(pub usize);

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Fragment {
    pub id: FragmentId,
    pub graph: MoleculeGraph,
    /// Level at which this structure was first discovered.
    pub level: usize,
}

/// The set of structurally unique fragments found so far.
///
/// Fragments are bucketed by an isomorphism-invariant [`StructureKey`]; a new
/// graph is compared against the members of its bucket only.
#[derive(Debug, Default)]
pub struct FragmentRegistry {
    fragments: Vec<Fragment>,
    buckets: HashMap<StructureKey, Vec<FragmentId>>,
}

impl FragmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a registered fragment isomorphic to `graph`.
    pub fn find(&self, graph: &MoleculeGraph) -> Option<FragmentId> {
        self.find_in_bucket(&graph.structure_key(), graph)
    }

    pub fn contains(&self, graph: &MoleculeGraph) -> bool {
        self.find(graph).is_some()
    }

    /// Registers `graph` as first seen at `level`.
    ///
    /// Returns the new id, or `None` if an isomorphic fragment is already known.
    pub fn insert(&mut self, graph: MoleculeGraph, level: usize) -> Option<FragmentId> {
        let key = graph.structure_key();
        if self.find_in_bucket(&key, &graph).is_some() {
            return None;
        }
        let id = FragmentId(self.fragments.len());
        self.fragments.push(Fragment { id, graph, level });
        self.buckets.entry(key).or_default().push(id);
        Some(id)
    }

    pub fn get(&self, id: FragmentId) -> Option<&Fragment> {
        self.fragments.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fragment> + '_ {
        self.fragments.iter()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn find_in_bucket(&self, key: &StructureKey, graph: &MoleculeGraph) -> Option<FragmentId> {
        self.buckets
            .get(key)?
            .iter()
            .copied()
            .find(|&id| self.fragments[id.0].graph.is_isomorphic_to(graph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use crate::core::models::topology::Bond;
    use nalgebra::Point3;

    fn graph(elements: &[Element], bonds: &[(usize, usize)]) -> MoleculeGraph {
        let atoms = elements
            .iter()
            .enumerate()
            .map(|(i, &e)| Atom::new(e, Point3::new(i as f64, 0.0, 0.0)))
            .collect();
        let bonds: Vec<Bond> = bonds.iter().map(|&(a, b)| Bond::single(a, b)).collect();
        MoleculeGraph::from_parts(atoms, &bonds).unwrap()
    }

    #[test]
    fn isomorphic_graphs_are_registered_once() {
        use Element::*;
        let mut registry = FragmentRegistry::new();
        let first = registry.insert(graph(&[O, H], &[(0, 1)]), 0);
        let second = registry.insert(graph(&[H, O], &[(0, 1)]), 1);

        assert_eq!(first, Some(FragmentId(0)));
        assert_eq!(second, None);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(FragmentId(0)).unwrap().level, 0);
    }

    #[test]
    fn same_formula_with_different_connectivity_is_distinct() {
        use Element::*;
        let mut registry = FragmentRegistry::new();
        let chain = graph(&[C, C, C], &[(0, 1), (1, 2)]);
        let ring = graph(&[C, C, C], &[(0, 1), (1, 2), (0, 2)]);
        let disconnected = graph(&[C, C, C], &[(0, 1)]);

        assert!(registry.insert(chain.clone(), 0).is_some());
        assert!(registry.insert(ring, 0).is_some());
        assert!(registry.insert(disconnected, 1).is_some());
        assert_eq!(registry.find(&chain), Some(FragmentId(0)));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn ids_follow_discovery_order() {
        use Element::*;
        let mut registry = FragmentRegistry::new();
        registry.insert(graph(&[H], &[]), 0);
        registry.insert(graph(&[O], &[]), 0);
        registry.insert(graph(&[O, H], &[(0, 1)]), 1);

        let ids: Vec<FragmentId> = registry.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![FragmentId(0), FragmentId(1), FragmentId(2)]);
        assert!(registry.contains(&graph(&[H, O], &[(0, 1)])));
        assert!(!registry.contains(&graph(&[C], &[])));
    }
}
