//! Package installation stage of the install event.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//!
//! Steps come from [`InstallationSpec::plan`] and carry their own policy:
//! a `Fatal` failure stops the plan and becomes an [`InstallError`], a
//! `BestEffort` failure is logged and recorded in the [`InstallReport`].

use anyhow::Result;

use crate::application::ports::{PackageManager, ProgressReporter, RuntimePackageManager};
use crate::domain::{InstallError, InstallStep, InstallationSpec, PackageError, StepPolicy};

/// Non-fatal outcomes of a successful package stage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Best-effort steps that failed, with their error text.
    pub skipped: Vec<String>,
}

/// Run every package step in order.
///
/// # Errors
///
/// Returns the [`InstallError`] of the first failing `Fatal` step. No later
/// step runs after a fatal failure.
pub async fn ensure_packages(
    packages: &impl PackageManager,
    runtime: &impl RuntimePackageManager,
    spec: &InstallationSpec,
    reporter: &impl ProgressReporter,
) -> Result<InstallReport, InstallError> {
    let mut report = InstallReport::default();
    for planned in spec.plan() {
        let Err(err) = run_step(packages, runtime, &planned.step, reporter).await else {
            continue;
        };
        match planned.policy {
            StepPolicy::Fatal => {
                let err = classify(&planned.step, &err);
                tracing::error!(error = %format!("{err:#}"), "{}", err.blocked_reason());
                return Err(err);
            }
            StepPolicy::BestEffort => {
                tracing::warn!(error = %format!("{err:#}"), "best-effort install step failed");
                reporter.warn(&format!("{err:#}"));
                report.skipped.push(format!("{err:#}"));
            }
        }
    }
    Ok(report)
}

async fn run_step(
    packages: &impl PackageManager,
    runtime: &impl RuntimePackageManager,
    step: &InstallStep,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    match step {
        InstallStep::RefreshIndex => {
            tracing::debug!("updating package index");
            reporter.step("updating package index...");
            packages.refresh_index().await
        }
        InstallStep::InstallPackages(names) => {
            tracing::debug!("installing packages: {}", names.join(", "));
            reporter.step(&format!("installing {}...", names.join(", ")));
            packages.install_packages(names).await
        }
        InstallStep::InstallRuntimePackage { manager, package } => {
            tracing::debug!(%manager, %package, "installing runtime package");
            reporter.step(&format!("installing {package} with {manager}..."));
            runtime.install_package(manager, package).await
        }
    }
}

fn classify(step: &InstallStep, err: &anyhow::Error) -> InstallError {
    let detail = format!("{err:#}");
    match step {
        InstallStep::RefreshIndex => InstallError::IndexRefreshFailed(detail),
        _ => match err.downcast_ref::<PackageError>() {
            Some(PackageError::NotFound(name)) => InstallError::PackageNotFound(name.clone()),
            _ => InstallError::InstallFailed(detail),
        },
    }
}
