//! Installation spec and the ordered step plan derived from it.

use std::path::PathBuf;

/// Where the tester executable is installed. Not configurable.
pub const ARTIFACT_INSTALL_PATH: &str = "/usr/local/bin/prometheus_tester";

/// Everything the install event needs. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationSpec {
    /// OS packages, installed as one batch in this order.
    pub os_packages: Vec<String>,
    /// Runtime package manager binary, e.g. `pip3`.
    pub runtime_manager: String,
    /// Package installed through `runtime_manager`.
    pub runtime_package: String,
    pub source_artifact: PathBuf,
    pub destination_artifact: PathBuf,
    /// Bits OR-ed into the destination's mode after copying.
    pub executable_bits: u32,
}

impl InstallationSpec {
    /// Build a spec targeting the fixed artifact install path.
    #[must_use]
    pub fn new(
        os_packages: Vec<String>,
        runtime_manager: impl Into<String>,
        runtime_package: impl Into<String>,
        source_artifact: impl Into<PathBuf>,
    ) -> Self {
        Self {
            os_packages,
            runtime_manager: runtime_manager.into(),
            runtime_package: runtime_package.into(),
            source_artifact: source_artifact.into(),
            destination_artifact: PathBuf::from(ARTIFACT_INSTALL_PATH),
            executable_bits: 0o100,
        }
    }

    /// Override the destination (tests deploy into a temp dir).
    #[must_use]
    pub fn with_destination(mut self, dst: impl Into<PathBuf>) -> Self {
        self.destination_artifact = dst.into();
        self
    }

    /// The package steps, in execution order, each tagged with its policy.
    #[must_use]
    pub fn plan(&self) -> Vec<PlannedStep> {
        vec![
            PlannedStep {
                step: InstallStep::RefreshIndex,
                policy: StepPolicy::Fatal,
            },
            PlannedStep {
                step: InstallStep::InstallPackages(self.os_packages.clone()),
                policy: StepPolicy::Fatal,
            },
            PlannedStep {
                step: InstallStep::InstallRuntimePackage {
                    manager: self.runtime_manager.clone(),
                    package: self.runtime_package.clone(),
                },
                policy: StepPolicy::BestEffort,
            },
        ]
    }
}

/// Whether a step failure aborts the install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    /// Failure blocks the unit and skips every later step.
    Fatal,
    /// Failure is logged and the install carries on.
    BestEffort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStep {
    RefreshIndex,
    InstallPackages(Vec<String>),
    InstallRuntimePackage { manager: String, package: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub step: InstallStep,
    pub policy: StepPolicy,
}
