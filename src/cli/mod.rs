//! Command-line interface
//!
//! Argument parsing and assembly of the configuration layers.

pub mod args;

pub use args::Cli;

use crate::config::{load_config_file, ConfigLayer};
use crate::error::Result;

/// Merge the config file, `Q5_*` environment and flags, lowest priority first
pub fn collect_layers(cli: &Cli) -> Result<ConfigLayer> {
    let mut layer = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => ConfigLayer::default(),
    };
    layer.merge_env_vars()?;
    Ok(layer.overlay(cli.to_layer()))
}
