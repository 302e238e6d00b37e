use fragmenter::core::graph::perception::{DEFAULT_MIN_DISTANCE, DEFAULT_TOLERANCE};

pub struct DefaultsConfig {
    pub depth: i64,
    pub open_rings: bool,
    pub allow_additional_charge_separation: bool,
    pub charge: i32,
    pub perceive_bonds: bool,
    pub tolerance: f64,
    pub min_distance: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            open_rings: true,
            allow_additional_charge_separation: false,
            charge: 0,
            perceive_bonds: true,
            tolerance: DEFAULT_TOLERANCE,
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }
}
