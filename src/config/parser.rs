use super::OrchestratorConfig;
use crate::errors::Error;
use std::fs;
use std::path::Path;

/// Loads and validates a YAML configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<OrchestratorConfig, Error> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read config file {}: {}", path.display(), e)))?;
    let config: OrchestratorConfig = serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))?;
    Ok(config)
}
