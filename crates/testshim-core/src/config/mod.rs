//! Shim configuration and config file parsing.

pub mod error;
pub mod parser;
mod shim;

pub use error::ConfigError;
pub use parser::load_config;
pub use shim::ShimConfig;
