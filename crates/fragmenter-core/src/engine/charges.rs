use super::registry::{FragmentId, FragmentRegistry};
use crate::core::graph::molecule_graph::MoleculeGraph;
use crate::core::models::molecule::spin_multiplicity_for;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// One fragment in one charge state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Candidate {
    pub fragment: FragmentId,
    pub charge: i32,
    pub spin_multiplicity: u8,
}

/// Decides which charge states are plausible for fragments of a given parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargePolicy {
    parent_charge: i32,
    allow_additional_charge_separation: bool,
}

impl ChargePolicy {
    pub fn new(parent_charge: i32, allow_additional_charge_separation: bool) -> Self {
        Self {
            parent_charge,
            allow_additional_charge_separation,
        }
    }

    /// Charges considered before electron-count filtering.
    ///
    /// A neutral parent always gives `-1..=1`. A charged parent `q` gives the
    /// charges between `0` and `q`, widened by one on both sides when additional
    /// charge separation is allowed.
    pub fn baseline(&self) -> RangeInclusive<i32> {
        let q = self.parent_charge;
        if q == 0 {
            return -1..=1;
        }
        let (low, high) = (q.min(0), q.max(0));
        if self.allow_additional_charge_separation {
            (low - 1)..=(high + 1)
        } else {
            low..=high
        }
    }

    /// The charges a fragment may carry. Charges that would leave a negative
    /// number of electrons are dropped, so the set can be empty.
    pub fn admissible(&self, fragment: &MoleculeGraph) -> BTreeSet<i32> {
        let formula = fragment.formula();
        self.baseline()
            .filter(|&charge| formula.electron_count(charge) >= 0)
            .collect()
    }

    /// Every (fragment, charge) pair in registry order, then by ascending charge.
    pub fn candidates(&self, registry: &FragmentRegistry) -> Vec<Candidate> {
        registry
            .iter()
            .flat_map(|fragment| {
                let formula = fragment.graph.formula();
                self.admissible(&fragment.graph)
                    .into_iter()
                    .map(move |charge| Candidate {
                        fragment: fragment.id,
                        charge,
                        spin_multiplicity: spin_multiplicity_for(formula.electron_count(charge)),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use nalgebra::Point3;

    fn atom_graph(element: Element) -> MoleculeGraph {
        MoleculeGraph::from_parts(vec![Atom::new(element, Point3::origin())], &[]).unwrap()
    }

    #[test]
    fn neutral_parent_gives_three_states_regardless_of_separation() {
        for allow in [false, true] {
            let policy = ChargePolicy::new(0, allow);
            assert_eq!(policy.baseline(), -1..=1);
        }
    }

    #[test]
    fn singly_charged_parent_doubles_with_separation() {
        assert_eq!(ChargePolicy::new(1, false).baseline(), 0..=1);
        assert_eq!(ChargePolicy::new(1, true).baseline(), -1..=2);
        assert_eq!(ChargePolicy::new(-1, false).baseline(), -1..=0);
        assert_eq!(ChargePolicy::new(-1, true).baseline(), -2..=1);
    }

    #[test]
    fn multiply_charged_parent_spans_zero_to_q() {
        assert_eq!(ChargePolicy::new(2, false).baseline(), 0..=2);
        assert_eq!(ChargePolicy::new(-2, true).baseline(), -3..=1);
    }

    #[test]
    fn charges_beyond_the_electron_count_are_dropped() {
        let hydrogen = atom_graph(Element::H);
        let charges = ChargePolicy::new(1, true).admissible(&hydrogen);
        // H+2 would need -1 electrons.
        assert_eq!(charges, BTreeSet::from([-1, 0, 1]));

        let oxygen = atom_graph(Element::O);
        assert_eq!(ChargePolicy::new(1, true).admissible(&oxygen).len(), 4);
    }

    #[test]
    fn candidates_derive_spin_from_electron_parity() {
        let mut registry = FragmentRegistry::new();
        registry.insert(atom_graph(Element::H), 0);
        let candidates = ChargePolicy::new(0, false).candidates(&registry);

        let spins: Vec<(i32, u8)> = candidates
            .iter()
            .map(|c| (c.charge, c.spin_multiplicity))
            .collect();
        // H- has 2 electrons, H has 1, H+ has 0.
        assert_eq!(spins, vec![(-1, 1), (0, 2), (1, 1)]);
    }
}
