//! Domain types and validators for unit configuration.
//!
//! Pure functions only: no I/O and no filesystem access.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::install::InstallationSpec;
use crate::domain::scrape::{ScrapeMetadata, ScrapeTarget, parse_interval};

// ── Constants ────────────────────────────────────────────────────────────────

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/tester-unit/config.yaml";

/// Environment variable overriding the configuration path.
pub const CONFIG_PATH_ENV: &str = "TESTER_UNIT_CONFIG";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `/etc/tester-unit/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    /// Tester script copied into place on install.
    pub source_artifact: PathBuf,
    /// Persisted lifecycle state.
    pub state_path: PathBuf,
    /// OS packages installed as one batch.
    pub packages: Vec<String>,
    pub runtime: RuntimeConfig,
    pub scrape: ScrapeConfig,
    pub registrar: RegistrarConfig,
    pub topology: ScrapeMetadata,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            source_artifact: PathBuf::from("src/tester.py"),
            state_path: PathBuf::from("/var/lib/tester-unit/state.json"),
            packages: vec!["python3".to_string(), "python3-pip".to_string()],
            runtime: RuntimeConfig::default(),
            scrape: ScrapeConfig::default(),
            registrar: RegistrarConfig::default(),
            topology: ScrapeMetadata {
                model: "default".to_string(),
                model_uuid: String::new(),
                application: "prometheus-tester".to_string(),
                unit: "prometheus-tester/0".to_string(),
            },
        }
    }
}

/// Runtime package manager settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub manager: String,
    pub package: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            manager: "pip3".to_string(),
            package: "prometheus-client".to_string(),
        }
    }
}

/// Scrape target declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Duration string, e.g. `1s`.
    pub interval: String,
    pub targets: Vec<String>,
    pub labels: BTreeMap<String, String>,
    pub metrics_path: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            interval: "1s".to_string(),
            targets: vec!["*:8000".to_string()],
            labels: BTreeMap::from([("status".to_string(), "testing".to_string())]),
            metrics_path: "/metrics".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrarConfig {
    /// Where the scrape registration document is written.
    pub path: PathBuf,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/var/lib/tester-unit/scrape-jobs.json"),
        }
    }
}

impl UnitConfig {
    /// Check the invariants the lifecycle relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated [`ConfigError`].
    pub fn validate(&self) -> Result<()> {
        if self.packages.is_empty() {
            return Err(ConfigError::NoPackages.into());
        }
        if self.runtime.package.trim().is_empty() {
            return Err(ConfigError::EmptyRuntimePackage.into());
        }
        parse_interval(&self.scrape.interval)?;
        if self.scrape.targets.is_empty() {
            return Err(ConfigError::NoScrapeTargets.into());
        }
        Ok(())
    }

    #[must_use]
    pub fn installation_spec(&self) -> InstallationSpec {
        InstallationSpec::new(
            self.packages.clone(),
            self.runtime.manager.clone(),
            self.runtime.package.clone(),
            self.source_artifact.clone(),
        )
    }

    /// # Errors
    ///
    /// Returns an error if the scrape interval cannot be parsed.
    pub fn scrape_target(&self) -> Result<ScrapeTarget> {
        Ok(ScrapeTarget {
            targets: self.scrape.targets.clone(),
            interval: parse_interval(&self.scrape.interval)?,
            labels: self.scrape.labels.clone(),
            metrics_path: self.scrape.metrics_path.clone(),
        })
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
