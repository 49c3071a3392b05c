//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed JSON document
//! on stdout.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::services::lifecycle::EventOutcome;
use crate::domain::{RelationData, UnitConfig, UnitState};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format a lifecycle event outcome.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_outcome(outcome: &EventOutcome) -> Result<String> {
    let obj = serde_json::json!({
        "event": outcome.event.to_string(),
        "phase": outcome.phase,
        "status": outcome.status,
        "skipped": outcome.skipped,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stateless JSON renderer.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        print(&serde_json::json!({ "version": version }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_outcome(outcome: &EventOutcome) -> Result<()> {
        println!("{}", format_outcome(outcome)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_status(state: &UnitState) -> Result<()> {
        print(state)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_scrape_jobs(data: &RelationData) -> Result<()> {
        print(data)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(config: &UnitConfig) -> Result<()> {
        print(config)
    }
}

fn print(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}
