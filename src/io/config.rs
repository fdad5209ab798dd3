//! Load `EngineConfig` overrides from JSON.

use std::fs::File;
use std::path::Path;

use crate::domain::EngineConfig;
use crate::error::EngineError;

/// Read and validate an engine config file. Omitted fields keep their defaults.
pub fn read_engine_config(path: &Path) -> Result<EngineConfig, EngineError> {
    let file = File::open(path).map_err(|e| {
        EngineError::Io(format!("Failed to open config '{}': {e}", path.display()))
    })?;
    let config: EngineConfig = serde_json::from_reader(file).map_err(|e| {
        EngineError::Configuration(format!("invalid config '{}': {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}
