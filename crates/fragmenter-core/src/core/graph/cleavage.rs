use super::molecule_graph::MoleculeGraph;
use itertools::Itertools;
use petgraph::graph::EdgeIndex;
use std::collections::BTreeSet;

/// How bonds that lie on a ring are handled during one cleavage round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RingHandling {
    /// A ring bond is only broken together with a second bond of the same ring
    /// system, so every product is a connected piece of the source.
    #[default]
    Cleave,
    /// Breaking a ring bond yields the ring-opened structure: the bond is removed,
    /// atoms keep their positions and no atoms are added.
    Open,
}

impl RingHandling {
    pub fn from_open_rings(open_rings: bool) -> Self {
        if open_rings { Self::Open } else { Self::Cleave }
    }
}

impl MoleculeGraph {
    /// Performs one round of bond cleavage and returns every product.
    ///
    /// For each bond whose removal disconnects the graph, every resulting
    /// component is a product. Bonds that lie on a ring are handled according
    /// to `rings`. Products come bridges first, then ring products, and are not
    /// deduplicated; isomorphic copies are filtered by the caller.
    pub fn cleave(&self, rings: RingHandling) -> Vec<MoleculeGraph> {
        let mut products = Vec::new();
        let mut ring_edges = Vec::new();

        for edge in self.edge_indices() {
            match self.split(&[edge]) {
                Some(pieces) => products.extend(pieces),
                None => ring_edges.push(edge),
            }
        }

        match rings {
            RingHandling::Open => {
                products.extend(ring_edges.iter().map(|&edge| self.without_bond(edge)));
            }
            RingHandling::Cleave => {
                // Bridges never take part in a pair: removing one alongside a ring
                // bond would leave a ring-opened piece behind.
                for (first, second) in ring_edges.iter().copied().tuple_combinations() {
                    if let Some(pieces) = self.split(&[first, second]) {
                        products.extend(pieces);
                    }
                }
            }
        }

        products
    }

    /// Pieces produced by removing `cut`, or `None` if no cut bond separates its
    /// two atoms. Only components touched by the cut are returned, so untouched
    /// parts of an already disconnected graph are never reported as products.
    fn split(&self, cut: &[EdgeIndex]) -> Option<Vec<MoleculeGraph>> {
        let components = self.components_without(cut);
        let mut component_of = vec![0; self.num_atoms()];
        for (slot, nodes) in components.iter().enumerate() {
            for node in nodes {
                component_of[node.index()] = slot;
            }
        }

        let endpoints: Vec<(usize, usize)> = cut
            .iter()
            .filter_map(|&edge| self.endpoints(edge))
            .map(|(a, b)| (component_of[a], component_of[b]))
            .collect();
        if endpoints.iter().all(|(a, b)| a == b) {
            return None;
        }

        let touched: BTreeSet<usize> = endpoints.into_iter().flat_map(|(a, b)| [a, b]).collect();
        Some(
            touched
                .into_iter()
                .map(|slot| self.subgraph(&components[slot], cut))
                .collect(),
        )
    }
}
