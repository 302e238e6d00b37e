use super::{MoleculeStore, RecordQuery, StoreError, StoredMolecule};

/// A store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Vec<StoredMolecule>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: StoredMolecule) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StoredMolecule] {
        &self.records
    }
}

impl FromIterator<StoredMolecule> for InMemoryStore {
    fn from_iter<I: IntoIterator<Item = StoredMolecule>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl MoleculeStore for InMemoryStore {
    fn find(&self, query: &RecordQuery) -> Result<Vec<StoredMolecule>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|record| query.matches(&record.molecule))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use crate::core::models::molecule::Molecule;
    use nalgebra::Point3;

    fn hydroxyl(charge: i32) -> StoredMolecule {
        let atoms = vec![
            Atom::new(Element::O, Point3::origin()),
            Atom::new(Element::H, Point3::new(0.97, 0.0, 0.0)),
        ];
        StoredMolecule {
            id: format!("oh{charge}"),
            molecule: Molecule::with_charge_and_spin(atoms, charge, None).unwrap(),
        }
    }

    #[test]
    fn find_filters_by_formula_charge_and_spin() {
        let store: InMemoryStore = [hydroxyl(-1), hydroxyl(0), hydroxyl(1)].into_iter().collect();
        let anion = &store.records()[0].molecule;

        let query = RecordQuery::new(anion.formula(), -1, 1);
        let found = store.find(&query).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "oh-1");

        let wrong_spin = RecordQuery::new(anion.formula(), -1, 3);
        assert!(store.find(&wrong_spin).unwrap().is_empty());
    }

    #[test]
    fn empty_store_finds_nothing() {
        let store = InMemoryStore::new();
        let query = RecordQuery::new(hydroxyl(0).molecule.formula(), 0, 2);
        assert!(store.find(&query).unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn inserted_records_become_searchable() {
        let mut store = InMemoryStore::new();
        let record = hydroxyl(1);
        let query = RecordQuery::new(record.molecule.formula(), 1, 1);
        store.insert(record);

        assert_eq!(store.len(), 1);
        assert_eq!(store.find(&query).unwrap()[0].id, "oh1");
    }
}
