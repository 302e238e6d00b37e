use super::charges::Candidate;
use super::error::EngineError;
use super::registry::FragmentRegistry;
use crate::core::graph::molecule_graph::MoleculeGraph;
use crate::core::graph::perception::{ConnectivityParams, perceive_graph};
use crate::core::store::{MoleculeStore, RecordQuery, StoreError};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Whether candidates are checked against previously computed molecules.
#[derive(Clone, Copy, Default)]
pub enum Deduplication<'a> {
    /// Every candidate is treated as new.
    #[default]
    Disabled,
    Store(&'a dyn MoleculeStore),
}

impl<'a> Deduplication<'a> {
    pub fn check_db(&self) -> bool {
        matches!(self, Deduplication::Store(_))
    }
}

impl std::fmt::Debug for Deduplication<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Deduplication::Disabled => f.write_str("Disabled"),
            Deduplication::Store(_) => f.write_str("Store(..)"),
        }
    }
}

/// Answers "is an equivalent molecule already stored?" for fragment candidates.
///
/// A record is equivalent when it has the same formula, charge and spin
/// multiplicity and its perceived connectivity is isomorphic to the fragment.
/// Record graphs are perceived once per query and cached.
pub struct MembershipFilter<'a> {
    store: &'a dyn MoleculeStore,
    params: ConnectivityParams,
    cache: HashMap<RecordQuery, Vec<MoleculeGraph>>,
}

impl<'a> MembershipFilter<'a> {
    /// `params` must match the connectivity parameters used for the parent so
    /// that fragments and records are perceived consistently.
    pub fn new(store: &'a dyn MoleculeStore, params: ConnectivityParams) -> Self {
        Self {
            store,
            params,
            cache: HashMap::new(),
        }
    }

    pub fn is_known(
        &mut self,
        fragment: &MoleculeGraph,
        charge: i32,
        spin_multiplicity: u8,
    ) -> Result<bool, StoreError> {
        let query = RecordQuery::new(fragment.formula(), charge, spin_multiplicity);
        let records = self.shortlist(query)?;
        Ok(records.iter().any(|record| record.is_isomorphic_to(fragment)))
    }

    /// Splits candidates into those without an equivalent record (returned in
    /// input order) and the count of those that already have one.
    ///
    /// # Errors
    ///
    /// Fails on a store error, or with [`EngineError::EnumerationInvariant`] if a
    /// candidate names a fragment the registry does not hold.
    pub fn screen(
        &mut self,
        registry: &FragmentRegistry,
        candidates: Vec<Candidate>,
    ) -> Result<(Vec<Candidate>, usize), EngineError> {
        let mut fresh = Vec::with_capacity(candidates.len());
        let mut known = 0;
        for candidate in candidates {
            let Some(fragment) = registry.get(candidate.fragment) else {
                return Err(EngineError::EnumerationInvariant(format!(
                    "candidate references unknown fragment {}",
                    candidate.fragment
                )));
            };
            if self.is_known(&fragment.graph, candidate.charge, candidate.spin_multiplicity)? {
                debug!(
                    fragment = %candidate.fragment,
                    charge = candidate.charge,
                    "Candidate already present in store"
                );
                known += 1;
            } else {
                fresh.push(candidate);
            }
        }
        Ok((fresh, known))
    }

    fn shortlist(&mut self, query: RecordQuery) -> Result<&[MoleculeGraph], StoreError> {
        if !self.cache.contains_key(&query) {
            let graphs = self
                .store
                .find(&query)?
                .into_iter()
                // Stores may answer loosely; never compare against other formulas.
                .filter(|record| record.molecule.formula() == query.formula)
                .filter_map(|record| match perceive_graph(&record.molecule, &self.params) {
                    Ok(graph) => Some(graph),
                    Err(e) => {
                        warn!(record = %record.id, error = %e, "Skipping store record with unusable geometry");
                        None
                    }
                })
                .collect();
            self.cache.insert(query.clone(), graphs);
        }
        Ok(self.cache.get(&query).map(Vec::as_slice).unwrap_or_default())
    }
}
