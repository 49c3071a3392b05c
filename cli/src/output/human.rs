//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::services::lifecycle::EventOutcome;
use crate::domain::{LifecycleStatus, RelationData, UnitConfig, UnitState};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    pub fn render_version(&self, version: &str) {
        println!("tester-unit {version}");
    }

    /// Summarize the result of one lifecycle event.
    ///
    /// A blocked outcome is printed to stderr even when `quiet`.
    pub fn render_outcome(&self, outcome: &EventOutcome) {
        if let Some(reason) = outcome.skipped {
            self.ctx.info(&format!("{} skipped: {reason}", outcome.event));
            return;
        }
        match &outcome.status {
            LifecycleStatus::Blocked(reason) => self.ctx.error(&format!("blocked: {reason}")),
            status => self
                .ctx
                .success(&format!("{}: {} ({status})", outcome.event, outcome.phase)),
        }
    }

    pub fn render_status(&self, state: &UnitState) {
        self.ctx.kv("Phase:  ", &state.phase.to_string());
        self.ctx.kv("Status: ", &status_display(&self.ctx.styles, &state.status));
        if let Some(sha) = &state.artifact_sha256 {
            self.ctx.kv("Digest: ", sha);
        }
        self.ctx.kv("Updated:", &state.updated_at.to_rfc3339());
    }

    pub fn render_scrape_jobs(&self, data: &RelationData) {
        for job in &data.scrape_jobs {
            self.ctx.header(&job.job_name);
            self.ctx.kv("path:    ", &job.metrics_path);
            self.ctx.kv("interval:", &job.scrape_interval);
            for group in &job.static_configs {
                self.ctx.kv("targets: ", &group.targets.join(", "));
                for (k, v) in &group.labels {
                    self.ctx.kv("label:   ", &format!("{k}={v}"));
                }
            }
        }
    }

    pub fn render_config(&self, config: &UnitConfig, path: &Path) {
        self.ctx.header(&format!("Configuration ({})", path.display()));
        self.ctx.kv("source_artifact:", &config.source_artifact.display().to_string());
        self.ctx.kv("state_path:     ", &config.state_path.display().to_string());
        self.ctx.kv("packages:       ", &config.packages.join(" "));
        self.ctx.kv(
            "runtime:        ",
            &format!("{} install {}", config.runtime.manager, config.runtime.package),
        );
        self.ctx.kv("scrape.interval:", &config.scrape.interval);
        self.ctx.kv("scrape.targets: ", &config.scrape.targets.join(", "));
        self.ctx.kv("registrar.path: ", &config.registrar.path.display().to_string());
    }
}

fn status_display(styles: &crate::output::Styles, status: &LifecycleStatus) -> String {
    match status {
        LifecycleStatus::Active => status.style(styles.success).to_string(),
        LifecycleStatus::Blocked(_) => status.style(styles.error).to_string(),
        LifecycleStatus::Unknown => status.style(styles.dim).to_string(),
    }
}
