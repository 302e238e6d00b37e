use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use fragmenter::core::graph::perception::ConnectivityParams;
use fragmenter::engine::config::{self as core_config, Connectivity, WorkUnitSettings};
use std::path::Path;
use std::str::FromStr;

pub fn build_config(args: &RunArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let frag_file = file_config.fragmentation.take().unwrap_or_default();
    let mol_file = file_config.molecule.take().unwrap_or_default();
    let conn_file = file_config.connectivity.take().unwrap_or_default();
    let unit_file = file_config.work_unit.take().unwrap_or_default();

    let depth = args.depth.or(frag_file.depth).unwrap_or(defaults.depth);
    let open_rings = match (args.rings.open_rings, args.rings.no_open_rings) {
        (true, false) => true,
        (false, true) => false,
        _ => frag_file.open_rings.unwrap_or(defaults.open_rings),
    };
    let allow_separation = match (
        args.separation.allow_charge_separation,
        args.separation.no_charge_separation,
    ) {
        (true, false) => true,
        (false, true) => false,
        _ => frag_file
            .allow_additional_charge_separation
            .unwrap_or(defaults.allow_additional_charge_separation),
    };

    let charge = args.charge.or(mol_file.charge).unwrap_or(defaults.charge);
    let spin_multiplicity = args.spin.or(mol_file.spin_multiplicity);

    let perceive_bonds = if args.no_perceive {
        false
    } else {
        conn_file.perceive_bonds.unwrap_or(defaults.perceive_bonds)
    };
    let connectivity_params = ConnectivityParams {
        tolerance: conn_file.tolerance.unwrap_or(defaults.tolerance),
        min_distance: conn_file.min_distance.unwrap_or(defaults.min_distance),
    };
    let connectivity = match &args.bonds {
        Some(list) => Connectivity::Explicit(
            parser::parse_bond_list(list).map_err(|e| CliError::Argument(e.to_string()))?,
        ),
        None => Connectivity::Unspecified,
    };

    let parent_id = args
        .parent_id
        .clone()
        .or(file_config.parent_id.take())
        .unwrap_or_else(|| default_parent_id(&args.input));
    let store_path = args.store.clone().or(file_config.store_path.take());

    let core_config = core_config::FragmentConfigBuilder::new()
        .depth(depth)
        .open_rings(open_rings)
        .allow_additional_charge_separation(allow_separation)
        .connectivity(connectivity_params)
        .perceive_bonds(perceive_bonds)
        .parent_id(parent_id)
        .work_unit(WorkUnitSettings {
            max_cores: unit_file.max_cores,
            input_params: unit_file.input_params,
        })
        .build()?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        store_path,
        charge,
        spin_multiplicity,
        connectivity,
        core_config,
    })
}

fn default_parent_id(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| core_config::DEFAULT_PARENT_ID.to_string())
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "parent-id" => config.parent_id = Some(value_str.to_string()),
            "store-path" => config.store_path = Some(value_str.into()),
            "fragmentation.depth" => {
                config
                    .fragmentation
                    .get_or_insert_with(Default::default)
                    .depth = Some(parse_value(key, value_str, "integer")?);
            }
            "fragmentation.open-rings" => {
                config
                    .fragmentation
                    .get_or_insert_with(Default::default)
                    .open_rings = Some(parse_value(key, value_str, "boolean")?);
            }
            "fragmentation.allow-additional-charge-separation" => {
                config
                    .fragmentation
                    .get_or_insert_with(Default::default)
                    .allow_additional_charge_separation =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "molecule.charge" => {
                config.molecule.get_or_insert_with(Default::default).charge =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "molecule.spin-multiplicity" => {
                config
                    .molecule
                    .get_or_insert_with(Default::default)
                    .spin_multiplicity = Some(parse_value(key, value_str, "integer")?);
            }
            "connectivity.perceive-bonds" => {
                config
                    .connectivity
                    .get_or_insert_with(Default::default)
                    .perceive_bonds = Some(parse_value(key, value_str, "boolean")?);
            }
            "connectivity.tolerance" => {
                config
                    .connectivity
                    .get_or_insert_with(Default::default)
                    .tolerance = Some(parse_value(key, value_str, "float")?);
            }
            "connectivity.min-distance" => {
                config
                    .connectivity
                    .get_or_insert_with(Default::default)
                    .min_distance = Some(parse_value(key, value_str, "float")?);
            }
            "work-unit.max-cores" => {
                config
                    .work_unit
                    .get_or_insert_with(Default::default)
                    .max_cores = Some(parse_value(key, value_str, "integer")?);
            }
            _ => match key.strip_prefix("work-unit.input-params.") {
                Some(param) if !param.is_empty() => {
                    config
                        .work_unit
                        .get_or_insert_with(Default::default)
                        .input_params
                        .insert(param.to_string(), value_str.to_string());
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            },
        }
    }
    Ok(config)
}
