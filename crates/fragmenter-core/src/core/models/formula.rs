use super::atom::Atom;
use super::element::Element;
use std::collections::BTreeMap;
use std::fmt;

/// Atom multiset of a molecule or fragment.
///
/// Two structures can only be isomorphic if their formulas are equal, which makes
/// the formula the cheap first filter in front of every isomorphism test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Formula {
    counts: BTreeMap<Element, usize>,
}

impl Formula {
    pub fn from_atoms<'a>(atoms: impl IntoIterator<Item = &'a Atom>) -> Self {
        Self::from_elements(atoms.into_iter().map(|atom| atom.element))
    }

    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        let mut counts = BTreeMap::new();
        for element in elements {
            *counts.entry(element).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, element: Element) -> usize {
        self.counts.get(&element).copied().unwrap_or(0)
    }

    pub fn num_atoms(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total nuclear charge, i.e. the electron count of the neutral species.
    pub fn nuclear_charge(&self) -> i64 {
        self.counts
            .iter()
            .map(|(element, &n)| i64::from(element.atomic_number()) * n as i64)
            .sum()
    }

    /// Number of electrons carried by this formula at the given net charge.
    pub fn electron_count(&self, charge: i32) -> i64 {
        self.nuclear_charge() - i64::from(charge)
    }

    /// Element/count pairs in Hill order.
    pub fn hill_order(&self) -> Vec<(Element, usize)> {
        let has_carbon = self.count(Element::C) > 0;
        let mut entries: Vec<(Element, usize)> =
            self.counts.iter().map(|(&e, &n)| (e, n)).collect();
        entries.sort_by(|(a, _), (b, _)| {
            let rank = |e: &Element| match (has_carbon, e) {
                (true, Element::C) => 0,
                (true, Element::H) => 1,
                _ => 2,
            };
            rank(a).cmp(&rank(b)).then_with(|| a.symbol().cmp(b.symbol()))
        });
        entries
    }
}

impl fmt::Display for Formula {
    /// Writes the formula in Hill notation, e.g. `C4H6O3` or `F6LiP`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (element, n) in self.hill_order() {
            if n == 1 {
                write!(f, "{element}")?;
            } else {
                write!(f, "{element}{n}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Element::*;

    #[test]
    fn hill_notation_puts_carbon_and_hydrogen_first() {
        let formula = Formula::from_elements([O, C, H, H, C, O, O, H, H, C, H, H]);
        assert_eq!(formula.to_string(), "C3H6O3");
    }

    #[test]
    fn hill_notation_without_carbon_is_alphabetical() {
        let formula = Formula::from_elements([P, F, F, F, F, F, F, Li]);
        assert_eq!(formula.to_string(), "F6LiP");
        assert_eq!(Formula::from_elements([O, H]).to_string(), "HO");
    }

    #[test]
    fn single_atoms_have_no_count_suffix() {
        assert_eq!(Formula::from_elements([H]).to_string(), "H");
        assert_eq!(Formula::from_elements([Cl, Cl]).to_string(), "Cl2");
    }

    #[test]
    fn electron_count_subtracts_charge() {
        let water = Formula::from_elements([O, H, H]);
        assert_eq!(water.nuclear_charge(), 10);
        assert_eq!(water.electron_count(0), 10);
        assert_eq!(water.electron_count(1), 9);
        assert_eq!(water.electron_count(-1), 11);
    }

    #[test]
    fn formulas_compare_as_multisets() {
        assert_eq!(
            Formula::from_elements([C, O, O]),
            Formula::from_elements([O, C, O])
        );
        assert_ne!(
            Formula::from_elements([C, O]),
            Formula::from_elements([C, O, O])
        );
        assert_eq!(Formula::from_elements([C, O, O]).num_atoms(), 3);
    }
}
