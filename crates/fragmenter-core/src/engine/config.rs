use crate::core::graph::molecule_graph::GraphError;
use crate::core::graph::perception::ConnectivityParams;
use crate::core::models::molecule::MoleculeError;
use crate::core::models::topology::Bond;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use thiserror::Error;

pub const DEFAULT_PARENT_ID: &str = "parent";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Fragmentation depth must be zero or positive, got {0}")]
    NegativeDepth(i64),

    #[error("No bonds were supplied and bond perception is disabled")]
    AmbiguousConnectivity,

    #[error("Bond perception failed: {0}")]
    BondPerception(GraphError),

    #[error("Invalid explicit bond list: {0}")]
    InvalidBond(GraphError),

    #[error("Invalid parent molecule: {0}")]
    Molecule(#[from] MoleculeError),
}

/// How many cleavage levels to explore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Explore exactly this many levels, recording empty ones.
    Limited(NonZeroUsize),
    /// Keep going until a level yields no new fragment.
    Exhaustive,
}

impl TryFrom<i64> for Depth {
    type Error = ConfigError;

    /// `0` selects [`Depth::Exhaustive`].
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(ConfigError::NegativeDepth(value));
        }
        let levels = usize::try_from(value).map_err(|_| ConfigError::NegativeDepth(value))?;
        Ok(NonZeroUsize::new(levels).map_or(Depth::Exhaustive, Depth::Limited))
    }
}

/// Where the parent's bonds come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Connectivity {
    Explicit(Vec<Bond>),
    /// Perceive bonds from geometry, if the configuration allows it.
    Unspecified,
}

/// Calculation settings copied verbatim onto every emitted work unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkUnitSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cores: Option<usize>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub input_params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FragmentConfig {
    pub depth: Depth,
    pub open_rings: bool,
    pub allow_additional_charge_separation: bool,
    pub connectivity: ConnectivityParams,
    pub perceive_bonds: bool,
    pub parent_id: String,
    pub work_unit: WorkUnitSettings,
}

#[derive(Default)]
pub struct FragmentConfigBuilder {
    depth: Option<i64>,
    open_rings: Option<bool>,
    allow_additional_charge_separation: Option<bool>,
    connectivity: Option<ConnectivityParams>,
    perceive_bonds: Option<bool>,
    parent_id: Option<String>,
    work_unit: Option<WorkUnitSettings>,
}

impl FragmentConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of levels to explore; `0` runs until no new fragments appear.
    pub fn depth(mut self, depth: i64) -> Self {
        self.depth = Some(depth);
        self
    }
    pub fn open_rings(mut self, open: bool) -> Self {
        self.open_rings = Some(open);
        self
    }
    pub fn allow_additional_charge_separation(mut self, allow: bool) -> Self {
        self.allow_additional_charge_separation = Some(allow);
        self
    }
    pub fn connectivity(mut self, params: ConnectivityParams) -> Self {
        self.connectivity = Some(params);
        self
    }
    pub fn perceive_bonds(mut self, perceive: bool) -> Self {
        self.perceive_bonds = Some(perceive);
        self
    }
    pub fn parent_id(mut self, id: impl Into<String>) -> Self {
        self.parent_id = Some(id.into());
        self
    }
    pub fn work_unit(mut self, settings: WorkUnitSettings) -> Self {
        self.work_unit = Some(settings);
        self
    }

    pub fn build(self) -> Result<FragmentConfig, ConfigError> {
        let depth = self.depth.ok_or(ConfigError::MissingParameter("depth"))?;
        Ok(FragmentConfig {
            depth: Depth::try_from(depth)?,
            open_rings: self
                .open_rings
                .ok_or(ConfigError::MissingParameter("open_rings"))?,
            allow_additional_charge_separation: self
                .allow_additional_charge_separation
                .ok_or(ConfigError::MissingParameter(
                    "allow_additional_charge_separation",
                ))?,
            connectivity: self.connectivity.unwrap_or_default(),
            perceive_bonds: self.perceive_bonds.unwrap_or(true),
            parent_id: self
                .parent_id
                .unwrap_or_else(|| DEFAULT_PARENT_ID.to_string()),
            work_unit: self.work_unit.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> FragmentConfigBuilder {
        FragmentConfigBuilder::new()
            .depth(2)
            .open_rings(true)
            .allow_additional_charge_separation(false)
    }

    #[test]
    fn builder_fills_optional_fields_with_defaults() {
        let config = complete().build().unwrap();
        assert_eq!(config.depth, Depth::Limited(NonZeroUsize::new(2).unwrap()));
        assert!(config.open_rings);
        assert!(!config.allow_additional_charge_separation);
        assert!(config.perceive_bonds);
        assert_eq!(config.parent_id, DEFAULT_PARENT_ID);
        assert_eq!(config.connectivity, ConnectivityParams::default());
        assert_eq!(config.work_unit, WorkUnitSettings::default());
    }

    #[test]
    fn builder_reports_the_first_missing_parameter() {
        let result = FragmentConfigBuilder::new().open_rings(true).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("depth")));

        let result = FragmentConfigBuilder::new().depth(1).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("open_rings")));
    }

    #[test]
    fn zero_depth_is_exhaustive() {
        assert_eq!(Depth::try_from(0), Ok(Depth::Exhaustive));
        let config = complete().depth(0).build().unwrap();
        assert_eq!(config.depth, Depth::Exhaustive);
    }

    #[test]
    fn negative_depth_is_rejected() {
        assert_eq!(Depth::try_from(-1), Err(ConfigError::NegativeDepth(-1)));
        assert_eq!(
            complete().depth(-3).build(),
            Err(ConfigError::NegativeDepth(-3))
        );
    }

    #[test]
    fn work_unit_settings_omit_empty_fields_in_json() {
        let json = serde_json::to_string(&WorkUnitSettings::default()).unwrap();
        assert_eq!(json, "{}");

        let mut settings = WorkUnitSettings {
            max_cores: Some(16),
            ..Default::default()
        };
        settings
            .input_params
            .insert("basis".to_string(), "def2-tzvppd".to_string());
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"max_cores":16,"input_params":{"basis":"def2-tzvppd"}}"#);
    }
}
