use super::ConfigLayer;
use crate::error::{describe_error_code, ErrorCode, Q5Error, Result};
use std::path::Path;
use tracing::debug;

/// Read a TOML configuration file into a layer
pub fn load_config_file(path: &Path) -> Result<ConfigLayer> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| file_error(ErrorCode::CONFIG_NOT_FOUND, path).with_source(e))?;

    let layer: ConfigLayer = toml::from_str(&content)
        .map_err(|e| file_error(ErrorCode::CONFIG_INVALID_TOML, path).with_source(e))?;

    debug!("Loaded configuration from {}", path.display());
    Ok(layer)
}

fn file_error(code: u16, path: &Path) -> Q5Error {
    Q5Error::config_with_code(code, describe_error_code(code), Some("config".to_string()))
        .with_context(path.display())
}
