use fragmenter::engine::config::{Connectivity, FragmentConfig};
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub store_path: Option<PathBuf>,
    pub charge: i32,
    pub spin_multiplicity: Option<u8>,
    pub connectivity: Connectivity,
    pub core_config: FragmentConfig,
}
