//! YAML configuration loader.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, UnitConfig};

/// Loads `UnitConfig` from a YAML file on disk.
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    /// Resolve the config path: explicit flag, then `TESTER_UNIT_CONFIG`,
    /// then `/etc/tester-unit/config.yaml`.
    #[must_use]
    pub fn resolve(flag: Option<PathBuf>) -> Self {
        let path = flag
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self { path }
    }

    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration fails validation.
    pub fn load(&self) -> Result<UnitConfig> {
        let config = if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)
                .with_context(|| format!("cannot read {}", self.path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("cannot parse {}", self.path.display()))?
        } else {
            tracing::debug!(path = %self.path.display(), "config file missing, using defaults");
            UnitConfig::default()
        };
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", self.path.display()))?;
        Ok(config)
    }
}
