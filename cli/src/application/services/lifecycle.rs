//! Lifecycle controller: turns typed lifecycle events into stage calls and a
//! unit status.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//!
//! Every fatal stage error is caught here and converted into
//! `LifecycleStatus::Blocked(reason)`; `handle` itself never fails. Events are
//! handled one at a time by the caller; there is no retry.

use chrono::Utc;

use crate::application::ports::{
    FileHasher, LocalFs, PackageManager, ProgressReporter, RuntimePackageManager, ScrapeRegistrar,
    ServiceManager,
};
use crate::application::services::scrape_registrar::{self, ScrapeRegistration};
use crate::application::services::{artifact_deployer, package_installer, service_unit};
use crate::domain::status::Transition;
use crate::domain::{
    InstallationSpec, LifecycleEvent, LifecyclePhase, LifecycleStatus, ScrapeMetadata,
    ScrapeTarget, ServiceUnitSpec, UnitState,
};

/// External collaborators, injected at construction.
pub struct Collaborators<'a, P, R, S, F> {
    pub packages: &'a P,
    pub runtime: &'a R,
    pub services: &'a S,
    pub fs: &'a F,
}

/// Immutable specs the controller works from.
#[derive(Debug, Clone)]
pub struct UnitSpecs {
    pub install: InstallationSpec,
    pub unit: ServiceUnitSpec,
    pub scrape_targets: Vec<ScrapeTarget>,
    pub topology: ScrapeMetadata,
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    pub event: LifecycleEvent,
    pub phase: LifecyclePhase,
    pub status: LifecycleStatus,
    /// Set when the event was not run from the current phase.
    pub skipped: Option<&'static str>,
}

impl EventOutcome {
    /// Whether this event ended in a blocked unit.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.skipped.is_none() && self.phase == LifecyclePhase::Blocked
    }
}

pub struct LifecycleController<'a, P, R, S, F> {
    ports: Collaborators<'a, P, R, S, F>,
    specs: UnitSpecs,
    state: UnitState,
    registration: Option<ScrapeRegistration>,
}

impl<'a, P, R, S, F> LifecycleController<'a, P, R, S, F>
where
    P: PackageManager,
    R: RuntimePackageManager,
    S: ServiceManager,
    F: LocalFs + FileHasher,
{
    /// Build the controller and register the scrape target.
    ///
    /// Registration happens exactly once, here. A failed registration is
    /// logged and leaves [`Self::registration`] empty; it never blocks the unit.
    pub fn new(
        ports: Collaborators<'a, P, R, S, F>,
        specs: UnitSpecs,
        registrar: &impl ScrapeRegistrar,
        state: UnitState,
    ) -> Self {
        let registration =
            match scrape_registrar::register(registrar, &specs.scrape_targets, &specs.topology) {
                Ok(handle) => {
                    tracing::info!(jobs = ?handle.job_names(), "scrape target registered");
                    Some(handle)
                }
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "scrape target registration failed");
                    None
                }
            };
        Self {
            ports,
            specs,
            state,
            registration,
        }
    }

    #[must_use]
    pub fn status(&self) -> &LifecycleStatus {
        &self.state.status
    }

    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.state.phase
    }

    #[must_use]
    pub fn state(&self) -> &UnitState {
        &self.state
    }

    #[must_use]
    pub fn registration(&self) -> Option<&ScrapeRegistration> {
        self.registration.as_ref()
    }

    /// Handle one lifecycle event to completion.
    pub async fn handle(
        &mut self,
        event: LifecycleEvent,
        reporter: &impl ProgressReporter,
    ) -> EventOutcome {
        let entering = match self.state.phase.on(event) {
            Transition::Run(phase) => phase,
            Transition::Skip(reason) => {
                tracing::info!(%event, phase = %self.state.phase, reason, "event skipped");
                return self.outcome(event, Some(reason));
            }
        };
        tracing::info!(%event, from = %self.state.phase, "handling lifecycle event");

        let before = self.state.clone();
        self.state.phase = entering;
        match event {
            LifecycleEvent::Install => self.install(reporter).await,
            LifecycleEvent::Start => self.start(reporter).await,
            LifecycleEvent::Stop => self.stop(reporter).await,
        }
        if self.state.phase != before.phase
            || self.state.status != before.status
            || self.state.artifact_sha256 != before.artifact_sha256
        {
            self.state.updated_at = Utc::now();
        }
        tracing::info!(%event, phase = %self.state.phase, status = %self.state.status, "event handled");
        self.outcome(event, None)
    }

    async fn install(&mut self, reporter: &impl ProgressReporter) {
        let spec = &self.specs.install;
        if let Err(e) =
            package_installer::ensure_packages(self.ports.packages, self.ports.runtime, spec, reporter)
                .await
        {
            self.block(e.blocked_reason());
            return;
        }

        reporter.step("deploying tester artifact...");
        if let Err(e) = artifact_deployer::deploy(
            self.ports.fs,
            &spec.source_artifact,
            &spec.destination_artifact,
            spec.executable_bits,
        ) {
            tracing::error!(error = %e, "artifact deploy failed");
            self.block(e.blocked_reason());
            return;
        }
        self.state.artifact_sha256 = match self.ports.fs.sha256_file(&spec.destination_artifact) {
            Ok(digest) => Some(digest),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "could not hash deployed artifact");
                None
            }
        };

        self.state.phase = LifecyclePhase::Installed;
        // A successful install supersedes an earlier blocked reason, but only
        // a successful start may report the unit as active.
        if self.state.status.is_blocked() {
            self.state.status = LifecycleStatus::Unknown;
        }
        reporter.success("tester installed");
    }

    async fn start(&mut self, reporter: &impl ProgressReporter) {
        reporter.step(&format!("starting {}...", self.specs.unit.name));
        match service_unit::publish_and_start(self.ports.services, self.ports.fs, &self.specs.unit)
            .await
        {
            Ok(()) => {
                self.state.phase = LifecyclePhase::Active;
                self.state.status = LifecycleStatus::Active;
                reporter.success(&format!("{} active", self.specs.unit.name));
            }
            Err(e) => {
                tracing::error!(error = %e, "unit start failed");
                self.block(&e.blocked_reason());
            }
        }
    }

    async fn stop(&mut self, reporter: &impl ProgressReporter) {
        match service_unit::stop_if_running(self.ports.services, &self.specs.unit.name).await {
            Ok(stopped) => {
                self.state.phase = LifecyclePhase::Stopped;
                if stopped {
                    reporter.success(&format!("{} stopped", self.specs.unit.name));
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "unit stop failed");
                self.block(&e.blocked_reason());
            }
        }
    }

    fn block(&mut self, reason: &str) {
        tracing::error!(reason, "unit blocked");
        self.state.phase = LifecyclePhase::Blocked;
        self.state.status = LifecycleStatus::blocked(reason);
    }

    fn outcome(&self, event: LifecycleEvent, skipped: Option<&'static str>) -> EventOutcome {
        EventOutcome {
            event,
            phase: self.state.phase,
            status: self.state.status.clone(),
            skipped,
        }
    }
}
