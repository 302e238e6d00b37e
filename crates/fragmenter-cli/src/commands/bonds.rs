use crate::cli::BondsArgs;
use crate::error::{CliError, Result};
use fragmenter::core::graph::perception::{ConnectivityParams, perceive_bonds};
use fragmenter::core::io::{traits::MoleculeFile, xyz::XyzFile};
use fragmenter::engine::config::ConfigError;
use std::io::Write;
use tracing::info;

pub fn run(args: BondsArgs) -> Result<()> {
    let (molecule, _) = XyzFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;

    let defaults = ConnectivityParams::default();
    let params = ConnectivityParams {
        tolerance: args.tolerance.unwrap_or(defaults.tolerance),
        min_distance: args.min_distance.unwrap_or(defaults.min_distance),
    };
    let bonds = perceive_bonds(&molecule, &params).map_err(ConfigError::BondPerception)?;
    info!(
        atoms = molecule.len(),
        bonds = bonds.len(),
        "Perceived connectivity."
    );

    let list = bonds
        .iter()
        .map(|b| format!("{}-{}", b.atom1, b.atom2))
        .collect::<Vec<_>>()
        .join(",");

    let mut stdout = std::io::stdout().lock();
    for bond in &bonds {
        let (a, b) = (&molecule.atoms()[bond.atom1], &molecule.atoms()[bond.atom2]);
        writeln!(
            stdout,
            "{:>4} {:<2} - {:>4} {:<2}  {:.3} Å",
            bond.atom1,
            a.element.symbol(),
            bond.atom2,
            b.element.symbol(),
            a.distance_to(b)
        )?;
    }
    writeln!(stdout, "--bonds \"{}\"", list)?;
    Ok(())
}
