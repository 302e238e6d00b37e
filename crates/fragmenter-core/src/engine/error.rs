use thiserror::Error;

use super::config::ConfigError;
use crate::core::store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Molecule store query failed: {0}")]
    Store(#[from] StoreError),

    #[error("Enumeration bookkeeping violated: {0}")]
    EnumerationInvariant(String),
}
