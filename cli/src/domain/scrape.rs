//! Scrape target declaration and the registrar payload built from it.
//!
//! The payload mirrors the Prometheus `scrape_config` shape: a list of jobs,
//! each with a duration-string interval and static target groups.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

/// Where and how often the monitoring system should scrape this unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeTarget {
    /// Address patterns, e.g. `*:8000`.
    pub targets: Vec<String>,
    pub interval: Duration,
    pub labels: BTreeMap<String, String>,
    pub metrics_path: String,
}

/// Topology of the registering unit, attached to every job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeMetadata {
    pub model: String,
    pub model_uuid: String,
    pub application: String,
    pub unit: String,
}

impl ScrapeMetadata {
    fn topology_labels(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("juju_model".to_string(), self.model.clone()),
            ("juju_model_uuid".to_string(), self.model_uuid.clone()),
            ("juju_application".to_string(), self.application.clone()),
            ("juju_unit".to_string(), self.unit.clone()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticConfig {
    pub targets: Vec<String>,
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeJob {
    pub job_name: String,
    pub metrics_path: String,
    pub scrape_interval: String,
    pub static_configs: Vec<StaticConfig>,
}

/// Document handed to the monitoring registrar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationData {
    pub scrape_metadata: ScrapeMetadata,
    pub scrape_jobs: Vec<ScrapeJob>,
}

/// Build one job per declared target, enriched with topology labels.
///
/// Explicit labels on the target win over topology labels with the same key.
#[must_use]
pub fn build_jobs(targets: &[ScrapeTarget], metadata: &ScrapeMetadata) -> Vec<ScrapeJob> {
    targets
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let mut labels = metadata.topology_labels();
            labels.extend(target.labels.clone());
            ScrapeJob {
                job_name: job_name(metadata, i),
                metrics_path: target.metrics_path.clone(),
                scrape_interval: format_interval(target.interval),
                static_configs: vec![StaticConfig {
                    targets: target.targets.clone(),
                    labels,
                }],
            }
        })
        .collect()
}

fn job_name(metadata: &ScrapeMetadata, index: usize) -> String {
    let base = format!(
        "juju_{}_{}_prometheus_scrape",
        metadata.model, metadata.application
    );
    if index == 0 {
        base
    } else {
        format!("{base}_{index}")
    }
}

/// Format a duration as the shortest exact duration string (`1s`, `2m`, `250ms`).
#[must_use]
pub fn format_interval(d: Duration) -> String {
    let ms = d.as_millis();
    if ms % 1000 != 0 {
        return format!("{ms}ms");
    }
    let secs = d.as_secs();
    match secs {
        0 => "0s".to_string(),
        s if s % 3600 == 0 => format!("{}h", s / 3600),
        s if s % 60 == 0 => format!("{}m", s / 60),
        s => format!("{s}s"),
    }
}

/// Parse a duration string with an `ms`, `s`, `m` or `h` suffix.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidInterval`] for malformed or zero durations.
pub fn parse_interval(s: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidInterval(s.to_string());
    let trimmed = s.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (digits, unit) = trimmed.split_at(split);
    let n: u64 = digits.parse().map_err(|_| invalid())?;
    let d = match unit {
        "ms" => Duration::from_millis(n),
        "s" => Duration::from_secs(n),
        "m" => Duration::from_secs(n.saturating_mul(60)),
        "h" => Duration::from_secs(n.saturating_mul(3600)),
        _ => return Err(invalid()),
    };
    if d.is_zero() {
        return Err(invalid());
    }
    Ok(d)
}
