use super::charges::Candidate;
use super::config::WorkUnitSettings;
use super::enumerator::Enumeration;
use super::error::EngineError;
use super::registry::{Fragment, FragmentId};
use crate::core::models::atom::Atom;
use crate::core::models::topology::Bond;
use serde::{Deserialize, Serialize};

/// Where a work unit came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub parent_id: String,
    pub fragment_id: FragmentId,
    pub level: usize,
}

/// A self-contained request to compute one fragment in one charge state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkUnit {
    pub name: String,
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    pub charge: i32,
    pub spin_multiplicity: u8,
    pub provenance: Provenance,
    pub settings: WorkUnitSettings,
}

/// A unique fragment as listed in the completion record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentRecord {
    pub id: FragmentId,
    pub formula: String,
    pub level: usize,
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

impl From<&Fragment> for FragmentRecord {
    fn from(fragment: &Fragment) -> Self {
        Self {
            id: fragment.id,
            formula: fragment.graph.formula().to_string(),
            level: fragment.level,
            atoms: fragment.graph.atoms().cloned().collect(),
            bonds: fragment.graph.bonds(),
        }
    }
}

/// The terminal record of a fragmentation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub parent_id: String,
    pub check_db: bool,
    pub fragments: Vec<FragmentRecord>,
    pub fragments_by_level: Vec<Vec<FragmentId>>,
    pub num_work_units: usize,
    pub num_already_known: usize,
}

/// Work-unit name: Hill formula and signed charge, e.g. `C2H4O_+1` or `H_0`.
pub fn work_unit_name(formula: &str, charge: i32) -> String {
    if charge == 0 {
        format!("{formula}_0")
    } else {
        format!("{formula}_{charge:+}")
    }
}

pub struct WorkUnitBuilder<'a> {
    parent_id: &'a str,
    settings: &'a WorkUnitSettings,
    check_db: bool,
}

impl<'a> WorkUnitBuilder<'a> {
    pub fn new(parent_id: &'a str, settings: &'a WorkUnitSettings, check_db: bool) -> Self {
        Self {
            parent_id,
            settings,
            check_db,
        }
    }

    /// Emits one work unit per candidate, ordered by fragment discovery order and
    /// then by ascending charge, plus the completion record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EnumerationInvariant`] if a candidate names a
    /// fragment missing from the registry.
    pub fn build(
        &self,
        enumeration: &Enumeration,
        mut candidates: Vec<Candidate>,
        num_already_known: usize,
    ) -> Result<(Vec<WorkUnit>, Completion), EngineError> {
        candidates.sort_by_key(|c| (c.fragment, c.charge));

        let work_units = candidates
            .iter()
            .map(|candidate| {
                let fragment = enumeration.registry.get(candidate.fragment).ok_or_else(|| {
                    EngineError::EnumerationInvariant(format!(
                        "work unit requested for unknown fragment {}",
                        candidate.fragment
                    ))
                })?;
                Ok(self.work_unit(fragment, candidate))
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        let completion = Completion {
            parent_id: self.parent_id.to_string(),
            check_db: self.check_db,
            fragments: enumeration.registry.iter().map(FragmentRecord::from).collect(),
            fragments_by_level: enumeration.levels.clone(),
            num_work_units: work_units.len(),
            num_already_known,
        };

        Ok((work_units, completion))
    }

    fn work_unit(&self, fragment: &Fragment, candidate: &Candidate) -> WorkUnit {
        let formula = fragment.graph.formula().to_string();
        WorkUnit {
            name: work_unit_name(&formula, candidate.charge),
            atoms: fragment.graph.atoms().cloned().collect(),
            bonds: fragment.graph.bonds(),
            charge: candidate.charge,
            spin_multiplicity: candidate.spin_multiplicity,
            provenance: Provenance {
                parent_id: self.parent_id.to_string(),
                fragment_id: fragment.id,
                level: fragment.level,
            },
            settings: self.settings.clone(),
        }
    }
}
