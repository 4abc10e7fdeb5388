//! Configuration loading.
//!
//! A single TOML file provides the defaults new buffers are created with.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, DumpConfig, InputConfig, LookConfig};
