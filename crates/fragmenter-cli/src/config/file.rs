use crate::error::{CliError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileFragmentationConfig {
    pub depth: Option<i64>,
    pub open_rings: Option<bool>,
    pub allow_additional_charge_separation: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileMoleculeConfig {
    pub charge: Option<i32>,
    pub spin_multiplicity: Option<u8>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConnectivityConfig {
    pub perceive_bonds: Option<bool>,
    pub tolerance: Option<f64>,
    pub min_distance: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileWorkUnitConfig {
    pub max_cores: Option<usize>,
    #[serde(default)]
    pub input_params: BTreeMap<String, String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub parent_id: Option<String>,
    pub store_path: Option<PathBuf>,
    pub fragmentation: Option<FileFragmentationConfig>,
    pub molecule: Option<FileMoleculeConfig>,
    pub connectivity: Option<FileConnectivityConfig>,
    pub work_unit: Option<FileWorkUnitConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_file_deserializes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fragment.toml");
        fs::write(
            &path,
            r#"
            parent-id = "ec"
            store-path = "known.json"

            [fragmentation]
            depth = 0
            open-rings = false
            allow-additional-charge-separation = true

            [molecule]
            charge = -1
            spin-multiplicity = 1

            [connectivity]
            perceive-bonds = false
            tolerance = 0.45

            [work-unit]
            max-cores = 24

            [work-unit.input-params]
            basis = "def2-tzvppd"
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        assert_eq!(config.parent_id.as_deref(), Some("ec"));
        assert_eq!(config.store_path, Some(PathBuf::from("known.json")));
        let fragmentation = config.fragmentation.unwrap();
        assert_eq!(fragmentation.depth, Some(0));
        assert_eq!(fragmentation.open_rings, Some(false));
        assert_eq!(config.molecule.unwrap().charge, Some(-1));
        let connectivity = config.connectivity.unwrap();
        assert_eq!(connectivity.perceive_bonds, Some(false));
        assert_eq!(connectivity.min_distance, None);
        let work_unit = config.work_unit.unwrap();
        assert_eq!(work_unit.max_cores, Some(24));
        assert_eq!(work_unit.input_params["basis"], "def2-tzvppd");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fragment.toml");
        fs::write(&path, "[fragmentation]\nmax-depth = 3\n").unwrap();
        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }
}
