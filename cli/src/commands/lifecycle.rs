//! `install`, `start` and `stop`: dispatch one lifecycle event.
//!
//! Each invocation loads the persisted state, builds the controller (which
//! registers the scrape target), handles exactly one event and persists the
//! result.

use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::ports::UnitStateStore;
use crate::application::services::lifecycle::{Collaborators, LifecycleController, UnitSpecs};
use crate::domain::{LifecycleEvent, ServiceUnitSpec, UnitConfig};
use crate::infra::apt::AptPackageManager;
use crate::infra::fs::HostFs;
use crate::infra::pip::PipRuntimeManager;
use crate::infra::registrar::FileScrapeRegistrar;
use crate::infra::state::StateManager;
use crate::infra::systemd::SystemctlServiceManager;
use crate::output::TerminalReporter;

/// Exit code for an event that leaves the unit blocked.
pub const EXIT_BLOCKED: u8 = 2;

/// Build controller specs from validated configuration.
///
/// # Errors
///
/// Returns an error if the scrape interval cannot be parsed.
pub fn unit_specs(config: &UnitConfig) -> Result<UnitSpecs> {
    Ok(UnitSpecs {
        install: config.installation_spec(),
        unit: ServiceUnitSpec::default(),
        scrape_targets: vec![config.scrape_target()?],
        topology: config.topology.clone(),
    })
}

/// Run one lifecycle event.
///
/// # Errors
///
/// Returns an error if configuration or state cannot be read or written.
/// Stage failures are not errors; they produce exit code 2.
pub async fn run(app: &AppContext, event: LifecycleEvent) -> Result<ExitCode> {
    let config = app.config()?;
    let store = StateManager::with_path(config.state_path.clone());
    let state = store.load_async().await?.unwrap_or_default();

    let packages = AptPackageManager::default_runner();
    let runtime = PipRuntimeManager::default_runner();
    let services = SystemctlServiceManager::default_runner();
    let registrar = FileScrapeRegistrar::new(config.registrar.path.clone());

    let mut controller = LifecycleController::new(
        Collaborators {
            packages: &packages,
            runtime: &runtime,
            services: &services,
            fs: &HostFs,
        },
        unit_specs(&config)?,
        &registrar,
        state,
    );

    let outcome = {
        let reporter = TerminalReporter::new(&app.output);
        controller.handle(event, &reporter).await
    };

    if outcome.skipped.is_none() {
        store
            .save_async(controller.state())
            .await
            .with_context(|| format!("saving unit state to {}", store.path().display()))?;
    }

    app.renderer().render_outcome(&outcome)?;
    if outcome.is_blocked() {
        return Ok(ExitCode::from(EXIT_BLOCKED));
    }
    Ok(ExitCode::SUCCESS)
}
