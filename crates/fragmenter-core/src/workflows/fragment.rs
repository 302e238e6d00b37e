use crate::core::graph::cleavage::RingHandling;
use crate::core::graph::molecule_graph::MoleculeGraph;
use crate::core::graph::perception::perceive_graph;
use crate::core::models::molecule::Molecule;
use crate::engine::charges::{Candidate, ChargePolicy};
use crate::engine::config::{ConfigError, Connectivity, FragmentConfig};
use crate::engine::enumerator::{self, Enumeration};
use crate::engine::error::EngineError;
use crate::engine::membership::{Deduplication, MembershipFilter};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::work_units::{Completion, WorkUnit, WorkUnitBuilder};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentationResult {
    pub work_units: Vec<WorkUnit>,
    pub completion: Completion,
}

#[instrument(skip_all, name = "fragmentation_workflow", fields(parent = %config.parent_id))]
pub fn run(
    molecule: &Molecule,
    connectivity: &Connectivity,
    config: &FragmentConfig,
    deduplication: Deduplication<'_>,
    reporter: &ProgressReporter,
) -> Result<FragmentationResult, EngineError> {
    // === Phase 0: Connectivity ===
    let parent = reporter.phase("Resolving Connectivity", || {
        resolve_connectivity(molecule, connectivity, config)
    })?;
    info!(
        formula = %parent.formula(),
        charge = molecule.charge(),
        spin = molecule.spin_multiplicity(),
        atoms = parent.num_atoms(),
        bonds = parent.num_bonds(),
        "Parent connectivity resolved."
    );

    // === Phase 1: Fragment enumeration ===
    let enumeration = reporter.phase("Enumerating Fragments", || {
        enumerator::enumerate(
            &parent,
            config.depth,
            RingHandling::from_open_rings(config.open_rings),
            reporter,
        )
    })?;
    info!(
        unique = enumeration.registry.len(),
        levels = enumeration.levels.len(),
        "Fragment enumeration complete."
    );

    // === Phase 2: Charge assignment ===
    let policy = ChargePolicy::new(molecule.charge(), config.allow_additional_charge_separation);
    let candidates = policy.candidates(&enumeration.registry);
    info!(candidates = candidates.len(), "Charge states assigned.");

    // === Phase 3: Store screening ===
    let (fresh, num_known) =
        screen_candidates(&enumeration, candidates, config, deduplication, reporter)?;

    // === Phase 4: Work units ===
    let builder = WorkUnitBuilder::new(
        &config.parent_id,
        &config.work_unit,
        deduplication.check_db(),
    );
    let (work_units, completion) = builder.build(&enumeration, fresh, num_known)?;

    info!(
        work_units = work_units.len(),
        already_known = num_known,
        "Workflow complete."
    );
    Ok(FragmentationResult {
        work_units,
        completion,
    })
}

/// Builds the parent graph from explicit bonds, or perceives them when allowed.
pub fn resolve_connectivity(
    molecule: &Molecule,
    connectivity: &Connectivity,
    config: &FragmentConfig,
) -> Result<MoleculeGraph, ConfigError> {
    match connectivity {
        Connectivity::Explicit(bonds) => {
            MoleculeGraph::with_bonds(molecule, bonds).map_err(ConfigError::InvalidBond)
        }
        Connectivity::Unspecified if config.perceive_bonds => {
            perceive_graph(molecule, &config.connectivity).map_err(ConfigError::BondPerception)
        }
        Connectivity::Unspecified => Err(ConfigError::AmbiguousConnectivity),
    }
}

fn screen_candidates(
    enumeration: &Enumeration,
    candidates: Vec<Candidate>,
    config: &FragmentConfig,
    deduplication: Deduplication<'_>,
    reporter: &ProgressReporter,
) -> Result<(Vec<Candidate>, usize), EngineError> {
    let Deduplication::Store(store) = deduplication else {
        info!("No molecule store configured; every candidate is new.");
        return Ok((candidates, 0));
    };

    reporter.phase("Checking Molecule Store", || -> Result<_, EngineError> {
        reporter.report(Progress::Message(format!(
            "Screening {} candidates",
            candidates.len()
        )));
        let mut filter = MembershipFilter::new(store, config.connectivity);
        let (fresh, known) = filter.screen(&enumeration.registry, candidates)?;
        info!(new = fresh.len(), known, "Store screening complete.");
        Ok((fresh, known))
    })
}
