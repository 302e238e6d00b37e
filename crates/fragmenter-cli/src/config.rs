//! Layered configuration for the `run` command.
//!
//! Values are merged in increasing priority: built-in defaults, the TOML file,
//! `-S key=value` overrides and finally dedicated command line flags.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::build_config;
pub use models::AppConfig;
