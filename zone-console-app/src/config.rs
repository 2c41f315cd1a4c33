//! Application configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zone_console_core::error::{CoreError, CoreResult};
use zone_console_core::types::Domain;
use zone_console_core::ControllerConfig;

/// Application configuration, read from a JSON file.
///
/// Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Domain details view behaviour
    pub controller: ControllerConfig,
    /// JSON file with domains for the built-in in-memory store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load the configuration from a JSON file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = serde_json::from_str(&raw).map_err(|e| {
            CoreError::ConfigError(format!("invalid config {}: {e}", path.display()))
        })?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the seed domains, if a seed file is configured.
    ///
    /// A relative seed path is resolved against `base`.
    pub fn load_seed_domains(&self, base: &Path) -> CoreResult<Vec<Domain>> {
        let Some(seed) = &self.seed_file else {
            return Ok(Vec::new());
        };
        let path = if seed.is_relative() {
            base.join(seed)
        } else {
            seed.clone()
        };
        let raw = fs::read_to_string(&path).map_err(|e| {
            CoreError::StorageError(format!("cannot read {}: {e}", path.display()))
        })?;
        let domains: Vec<Domain> = serde_json::from_str(&raw).map_err(|e| {
            CoreError::StorageError(format!("invalid seed file {}: {e}", path.display()))
        })?;
        log::info!("Seeded {} domains from {}", domains.len(), path.display());
        Ok(domains)
    }
}
