use super::config::Depth;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::registry::{FragmentId, FragmentRegistry};
use crate::core::graph::cleavage::RingHandling;
use crate::core::graph::molecule_graph::MoleculeGraph;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// The outcome of a level-wise enumeration.
#[derive(Debug)]
pub struct Enumeration {
    pub registry: FragmentRegistry,
    /// Ids first discovered at each level, in discovery order.
    pub levels: Vec<Vec<FragmentId>>,
}

impl Enumeration {
    pub fn level_sizes(&self) -> Vec<usize> {
        self.levels.iter().map(Vec::len).collect()
    }
}

/// Enumerates every unique fragment reachable from `parent`.
///
/// Level 0 cleaves the parent once. Each later level cleaves the fragments first
/// found on the previous level. A product is kept only if no isomorphic fragment
/// has been registered yet, so every fragment appears on exactly one level.
#[instrument(skip_all, name = "fragment_enumeration")]
pub fn enumerate(
    parent: &MoleculeGraph,
    depth: Depth,
    rings: RingHandling,
    reporter: &ProgressReporter,
) -> Result<Enumeration, EngineError> {
    let mut registry = FragmentRegistry::new();
    let mut levels = LevelIndex::default();

    let mut level = 0;
    loop {
        let sources: Vec<&MoleculeGraph> = if level == 0 {
            vec![parent]
        } else {
            levels
                .last()
                .iter()
                .filter_map(|&id| registry.get(id))
                .map(|fragment| &fragment.graph)
                .filter(|graph| graph.num_atoms() >= 2 && graph.num_bonds() >= 1)
                .collect()
        };

        reporter.report(Progress::TaskStart {
            total_steps: sources.len() as u64,
        });
        let mut products = Vec::new();
        for source in sources {
            products.extend(source.cleave(rings));
            reporter.report(Progress::TaskIncrement);
        }
        reporter.report(Progress::TaskFinish);

        let num_products = products.len();
        let new_ids: Vec<FragmentId> = products
            .into_iter()
            .filter_map(|product| registry.insert(product, level))
            .collect();

        debug!(level, products = num_products, "Cleavage round complete");
        info!(
            level,
            new_fragments = new_ids.len(),
            unique = registry.len(),
            "Level enumerated."
        );

        let exhausted = new_ids.is_empty();
        levels.record(new_ids)?;
        level += 1;

        let done = match depth {
            Depth::Limited(limit) => level >= limit.get(),
            Depth::Exhaustive => exhausted,
        };
        if done {
            break;
        }
    }

    Ok(Enumeration {
        registry,
        levels: levels.into_inner(),
    })
}

/// Per-level membership, guarding against an id being recorded twice.
#[derive(Default)]
struct LevelIndex {
    levels: Vec<Vec<FragmentId>>,
    recorded: HashSet<FragmentId>,
}

impl LevelIndex {
    fn last(&self) -> &[FragmentId] {
        self.levels.last().map(Vec::as_slice).unwrap_or_default()
    }

    fn record(&mut self, ids: Vec<FragmentId>) -> Result<(), EngineError> {
        if let Some(id) = ids.iter().find(|&&id| !self.recorded.insert(id)) {
            return Err(EngineError::EnumerationInvariant(format!(
                "fragment {} recorded at level {} was already recorded earlier",
                id,
                self.levels.len()
            )));
        }
        self.levels.push(ids);
        Ok(())
    }

    fn into_inner(self) -> Vec<Vec<FragmentId>> {
        self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use crate::core::models::topology::Bond;
    use nalgebra::Point3;
    use std::num::NonZeroUsize;

    fn graph(elements: &[Element], bonds: &[(usize, usize)]) -> MoleculeGraph {
        let atoms = elements
            .iter()
            .enumerate()
            .map(|(i, &e)| Atom::new(e, Point3::new(i as f64, 0.0, 0.0)))
            .collect();
        let bonds: Vec<Bond> = bonds.iter().map(|&(a, b)| Bond::single(a, b)).collect();
        MoleculeGraph::from_parts(atoms, &bonds).unwrap()
    }

    fn limited(levels: usize) -> Depth {
        Depth::Limited(NonZeroUsize::new(levels).unwrap())
    }

    fn water() -> MoleculeGraph {
        use Element::*;
        graph(&[O, H, H], &[(0, 1), (0, 2)])
    }

    #[test]
    fn water_runs_to_a_fixed_point() {
        let result = enumerate(
            &water(),
            Depth::Exhaustive,
            RingHandling::Open,
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(result.level_sizes(), vec![2, 1, 0]);
        assert_eq!(result.registry.len(), 3);
    }

    #[test]
    fn limited_depth_records_every_level() {
        let result = enumerate(&water(), limited(1), RingHandling::Open, &ProgressReporter::new())
            .unwrap();
        assert_eq!(result.level_sizes(), vec![2]);

        let result = enumerate(&water(), limited(5), RingHandling::Open, &ProgressReporter::new())
            .unwrap();
        assert_eq!(result.level_sizes(), vec![2, 1, 0, 0, 0]);
    }

    #[test]
    fn fragments_are_recorded_at_their_first_level() {
        let result = enumerate(
            &water(),
            Depth::Exhaustive,
            RingHandling::Cleave,
            &ProgressReporter::new(),
        )
        .unwrap();
        for (level, ids) in result.levels.iter().enumerate() {
            for &id in ids {
                assert_eq!(result.registry.get(id).unwrap().level, level);
            }
        }
    }

    #[test]
    fn single_atom_parent_yields_one_empty_level() {
        let atom = graph(&[Element::Ar], &[]);
        let result = enumerate(
            &atom,
            Depth::Exhaustive,
            RingHandling::Cleave,
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(result.levels, vec![Vec::<FragmentId>::new()]);
        assert!(result.registry.is_empty());
    }

    #[test]
    fn level_index_rejects_duplicate_ids() {
        let mut index = LevelIndex::default();
        index.record(vec![FragmentId(0), FragmentId(1)]).unwrap();
        let result = index.record(vec![FragmentId(1)]);
        assert!(matches!(result, Err(EngineError::EnumerationInvariant(_))));
    }

    #[test]
    fn reports_one_task_per_level() {
        use std::sync::Mutex;
        let starts = Mutex::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::TaskStart { .. } = event {
                *starts.lock().unwrap() += 1;
            }
        }));
        let result =
            enumerate(&water(), Depth::Exhaustive, RingHandling::Open, &reporter).unwrap();
        drop(reporter);
        assert_eq!(starts.into_inner().unwrap(), result.levels.len());
    }
}
