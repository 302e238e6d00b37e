use crate::cli::RunArgs;
use crate::config::{AppConfig, build_config};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use fragmenter::core::io::{traits::MoleculeFile, xyz::XyzFile};
use fragmenter::core::models::molecule::Molecule;
use fragmenter::core::store::json::JsonStore;
use fragmenter::engine::config::ConfigError;
use fragmenter::engine::membership::Deduplication;
use fragmenter::engine::progress::ProgressReporter;
use fragmenter::workflows::{self, fragment::FragmentationResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub fn run(args: RunArgs) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let config = build_config(&args)?;

    info!("Loading parent molecule from {:?}", &config.input_path);
    let molecule = load_parent(&config)?;

    let store = match &config.store_path {
        Some(path) => {
            info!("Opening molecule store at {:?}", path);
            Some(JsonStore::open(path).map_err(|e| CliError::FileParsing {
                path: path.clone(),
                source: e.into(),
            })?)
        }
        None => None,
    };
    let deduplication = match &store {
        Some(store) => Deduplication::Store(store),
        None => Deduplication::Disabled,
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Fragmenting {}...", molecule.formula());
    let result = workflows::fragment::run(
        &molecule,
        &config.connectivity,
        &config.core_config,
        deduplication,
        &reporter,
    )?;

    write_result(&result, &config.output_path)?;
    println!(
        "✓ {} unique fragment(s), {} work unit(s), {} already known. Written to: {}",
        result.completion.fragments.len(),
        result.work_units.len(),
        result.completion.num_already_known,
        config.output_path.display()
    );
    Ok(())
}

fn load_parent(config: &AppConfig) -> Result<Molecule> {
    let (mut molecule, metadata) =
        XyzFile::read_from_path(&config.input_path).map_err(|e| CliError::FileParsing {
            path: config.input_path.clone(),
            source: e.into(),
        })?;
    if !metadata.comment.is_empty() {
        info!("Input comment: {}", metadata.comment);
    }
    molecule
        .set_charge_and_spin(config.charge, config.spin_multiplicity)
        .map_err(ConfigError::from)?;
    Ok(molecule)
}

fn write_result(result: &FragmentationResult, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    writer.flush()?;
    Ok(())
}
