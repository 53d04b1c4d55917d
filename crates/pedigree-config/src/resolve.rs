// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Picks the pipeline configuration: explicit file, then store, then defaults.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use pedigree_core::PedigreeConfig;
use tracing::debug;

use crate::service::ConfigService;
use crate::store::{ConfigError, ConfigStore};

/// Store key holding the pipeline configuration.
pub const PEDIGREE_CONFIG_KEY: &str = "pedigree";

/// Where a resolved configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// An explicitly named file.
    File(PathBuf),
    /// The config store entry [`PEDIGREE_CONFIG_KEY`].
    Store,
    /// Built-in defaults.
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Store => write!(f, "store key {PEDIGREE_CONFIG_KEY:?}"),
            Self::Default => f.write_str("defaults"),
        }
    }
}

/// Reads and checks a configuration file. Unknown fields are ignored and
/// missing fields take their defaults.
pub fn read_config_file(path: &Path) -> Result<PedigreeConfig, ConfigError> {
    let bytes = fs::read(path)?;
    let config: PedigreeConfig = serde_json::from_slice(&bytes)?;
    check(config)
}

/// Resolves the configuration for one run.
///
/// An explicit file must exist and parse. A store entry is used when present;
/// a missing entry (or no store at all) falls back to defaults.
pub fn resolve_config<S: ConfigStore>(
    explicit: Option<&Path>,
    service: Option<&ConfigService<S>>,
) -> Result<(PedigreeConfig, ConfigSource), ConfigError> {
    let resolved = if let Some(path) = explicit {
        (read_config_file(path)?, ConfigSource::File(path.to_path_buf()))
    } else if let Some(config) = service
        .map(|s| s.load::<PedigreeConfig>(PEDIGREE_CONFIG_KEY))
        .transpose()?
        .flatten()
    {
        (check(config)?, ConfigSource::Store)
    } else {
        (PedigreeConfig::default(), ConfigSource::Default)
    };
    debug!(source = %resolved.1, "configuration resolved");
    Ok(resolved)
}

fn check(config: PedigreeConfig) -> Result<PedigreeConfig, ConfigError> {
    // Zero collapses a row onto one point; negative values reverse it.
    if !(config.layout.spacing.is_finite() && config.layout.spacing > 0.0) {
        return Err(ConfigError::Invalid(format!(
            "layout.spacing must be a positive finite number, got {}",
            config.layout.spacing
        )));
    }
    if config.coding.kinship_systems.is_empty() && config.coding.role_systems.is_empty() {
        return Err(ConfigError::Invalid(
            "no coding systems configured; every relationship would be dropped".into(),
        ));
    }
    Ok(config)
}
