use crate::core::models::atom::Atom;
use crate::core::models::element::Element;
use crate::core::models::formula::Formula;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::{Bond, BondOrder};
use petgraph::algo::is_isomorphic_matching;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

pub type AtomGraph = UnGraph<Atom, Option<BondOrder>>;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GraphError {
    #[error("Bond {atom1}-{atom2} references atom {missing}, but the molecule has {num_atoms} atoms")]
    AtomOutOfRange {
        atom1: usize,
        atom2: usize,
        missing: usize,
        num_atoms: usize,
    },

    #[error("Bond connects atom {0} to itself")]
    SelfBond(usize),

    #[error("Duplicate bond between atoms {0} and {1}")]
    DuplicateBond(usize, usize),

    #[error("Atom {atom} has a non-finite coordinate")]
    NonFiniteCoordinate { atom: usize },

    #[error("Atoms {atom1} and {atom2} are only {distance:.3} Å apart")]
    OverlappingAtoms {
        atom1: usize,
        atom2: usize,
        distance: f64,
    },
}

/// Bucket key for structural deduplication.
///
/// Every component is an isomorphism invariant, so isomorphic graphs always share
/// a key and only graphs with equal keys ever need a full isomorphism test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructureKey {
    pub formula: Formula,
    pub num_bonds: usize,
    degrees: Vec<(Element, usize)>,
}

/// Molecular connectivity graph with atoms as nodes and bonds as edges.
///
/// Node index `i` always corresponds to atom `i`. Graphs derived from another
/// graph (fragments, ring-opened copies) are independent renumbered copies and
/// never share state with their source.
#[derive(Debug, Clone)]
pub struct MoleculeGraph {
    graph: AtomGraph,
}

impl MoleculeGraph {
    /// Builds a graph from a molecule and an explicit bond list.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if a bond references a missing atom, bonds an atom to
    /// itself, or repeats an atom pair.
    pub fn with_bonds(molecule: &Molecule, bonds: &[Bond]) -> Result<Self, GraphError> {
        Self::from_parts(molecule.atoms().to_vec(), bonds)
    }

    pub fn from_parts(atoms: Vec<Atom>, bonds: &[Bond]) -> Result<Self, GraphError> {
        let num_atoms = atoms.len();
        let mut graph = AtomGraph::with_capacity(num_atoms, bonds.len());
        for atom in atoms {
            graph.add_node(atom);
        }

        let mut seen = HashSet::with_capacity(bonds.len());
        for bond in bonds {
            let (atom1, atom2) = bond.endpoints();
            if let Some(missing) = [atom1, atom2].into_iter().find(|&i| i >= num_atoms) {
                return Err(GraphError::AtomOutOfRange {
                    atom1,
                    atom2,
                    missing,
                    num_atoms,
                });
            }
            if atom1 == atom2 {
                return Err(GraphError::SelfBond(atom1));
            }
            if !seen.insert((atom1, atom2)) {
                return Err(GraphError::DuplicateBond(atom1, atom2));
            }
            graph.add_edge(NodeIndex::new(atom1), NodeIndex::new(atom2), bond.order);
        }

        Ok(Self { graph })
    }

    pub fn num_atoms(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_bonds(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.graph.node_weight(NodeIndex::new(index))
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// The bond list of this graph, in edge insertion order.
    pub fn bonds(&self) -> Vec<Bond> {
        self.graph
            .edge_references()
            .map(|edge| Bond::new(edge.source().index(), edge.target().index(), *edge.weight()))
            .collect()
    }

    pub fn formula(&self) -> Formula {
        Formula::from_atoms(self.atoms())
    }

    /// Returns `true` if every atom is reachable from every other atom.
    pub fn is_connected(&self) -> bool {
        self.components_without(&[]).len() <= 1
    }

    /// Isomorphism-invariant bucket key for this structure.
    pub fn structure_key(&self) -> StructureKey {
        let mut degrees: Vec<(Element, usize)> = self
            .graph
            .node_indices()
            .map(|idx| (self.graph[idx].element, self.graph.neighbors(idx).count()))
            .collect();
        degrees.sort_unstable();
        StructureKey {
            formula: self.formula(),
            num_bonds: self.num_bonds(),
            degrees,
        }
    }

    /// Tests whether two graphs have the same connectivity up to relabeling.
    ///
    /// Atoms must match by element; bond orders and positions are ignored.
    pub fn is_isomorphic_to(&self, other: &MoleculeGraph) -> bool {
        if self.num_atoms() != other.num_atoms() || self.num_bonds() != other.num_bonds() {
            return false;
        }
        if self.formula() != other.formula() {
            return false;
        }
        is_isomorphic_matching(
            &self.graph,
            &other.graph,
            |a: &Atom, b: &Atom| a.element == b.element,
            |_: &Option<BondOrder>, _: &Option<BondOrder>| true,
        )
    }

    pub(crate) fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub(crate) fn endpoints(&self, edge: EdgeIndex) -> Option<(usize, usize)> {
        self.graph
            .edge_endpoints(edge)
            .map(|(a, b)| (a.index(), b.index()))
    }

    /// Connected components of the graph once `removed` edges are ignored.
    ///
    /// Components are ordered by their lowest atom index and list their atoms in
    /// ascending order.
    pub(crate) fn components_without(&self, removed: &[EdgeIndex]) -> Vec<Vec<NodeIndex>> {
        let mut sets = UnionFind::<usize>::new(self.num_atoms());
        for edge in self.graph.edge_references() {
            if removed.contains(&edge.id()) {
                continue;
            }
            sets.union(edge.source().index(), edge.target().index());
        }

        let mut slots: HashMap<usize, usize> = HashMap::new();
        let mut components: Vec<Vec<NodeIndex>> = Vec::new();
        for (atom, label) in sets.into_labeling().into_iter().enumerate() {
            let slot = *slots.entry(label).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[slot].push(NodeIndex::new(atom));
        }
        components
    }

    /// Copies the given atoms and every surviving bond between them into a new,
    /// renumbered graph.
    pub(crate) fn subgraph(&self, nodes: &[NodeIndex], removed: &[EdgeIndex]) -> MoleculeGraph {
        let mut graph = AtomGraph::with_capacity(nodes.len(), nodes.len());
        let mut remap: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(nodes.len());
        for &old in nodes {
            let new = graph.add_node(self.graph[old].clone());
            remap.insert(old, new);
        }
        for edge in self.graph.edge_references() {
            if removed.contains(&edge.id()) {
                continue;
            }
            if let (Some(&a), Some(&b)) = (remap.get(&edge.source()), remap.get(&edge.target())) {
                graph.add_edge(a, b, *edge.weight());
            }
        }
        MoleculeGraph { graph }
    }

    /// A copy of this graph with one bond removed and all atoms kept in place.
    pub(crate) fn without_bond(&self, edge: EdgeIndex) -> MoleculeGraph {
        let mut graph = self.graph.clone();
        graph.remove_edge(edge);
        MoleculeGraph { graph }
    }
}
