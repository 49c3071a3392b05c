//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::unit::UNIT_NAME;

// ── Package manager errors ────────────────────────────────────────────────────

/// Failure reported by the OS package-manager collaborator.
///
/// Adapters return this inside `anyhow::Error` so the installer can tell a
/// missing package apart from every other failure with `downcast_ref`.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("package not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

/// Errors from the fatal package-installation steps.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("failed to refresh the package index: {0}")]
    IndexRefreshFailed(String),

    #[error("a requested package was not found: {0}")]
    PackageNotFound(String),

    #[error("failed to install packages: {0}")]
    InstallFailed(String),
}

impl InstallError {
    /// Operator-facing reason shown in `Blocked` status.
    #[must_use]
    pub fn blocked_reason(&self) -> &'static str {
        match self {
            Self::IndexRefreshFailed(_) => "could not update index",
            Self::PackageNotFound(_) => "could not find package",
            Self::InstallFailed(_) => "could not install packages",
        }
    }
}

/// Failure of the best-effort runtime-package step. Logged, never fatal.
#[derive(Debug, Error)]
pub enum RuntimePackageError {
    #[error("{manager} install {package} exited with {code}: {stderr}")]
    ExitStatus {
        manager: String,
        package: String,
        code: String,
        stderr: String,
    },

    #[error("could not run {manager}: {reason}")]
    Spawn { manager: String, reason: String },
}

// ── Artifact errors ───────────────────────────────────────────────────────────

/// Errors deploying the tester executable.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("source artifact {} does not exist", .0.display())]
    SourceMissing(PathBuf),

    #[error("copying {} to {}: {reason}", .src.display(), .dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        reason: String,
    },

    #[error("marking {} executable: {reason}", .path.display())]
    Permissions { path: PathBuf, reason: String },
}

impl ArtifactError {
    #[must_use]
    pub fn blocked_reason(&self) -> &'static str {
        "could not deploy tester artifact"
    }
}

// ── Service manager errors ────────────────────────────────────────────────────

/// Errors publishing, starting or stopping the service unit.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("writing unit file {}: {reason}", .path.display())]
    UnitWrite { path: PathBuf, reason: String },

    #[error("reloading service manager units: {0}")]
    Reload(String),

    #[error("restarting {unit}: {reason}")]
    Restart { unit: String, reason: String },

    #[error("querying state of {unit}: {reason}")]
    Query { unit: String, reason: String },

    #[error("stopping {unit}: {reason}")]
    Stop { unit: String, reason: String },
}

impl ServiceError {
    /// Operator-facing reason shown in `Blocked` status.
    #[must_use]
    pub fn blocked_reason(&self) -> String {
        match self {
            Self::UnitWrite { .. } => "could not write unit file".to_string(),
            Self::Reload(_) => "could not reload units".to_string(),
            Self::Restart { .. } => format!("could not restart {UNIT_NAME}"),
            Self::Query { .. } => format!("could not query {UNIT_NAME}"),
            Self::Stop { .. } => format!("could not stop {UNIT_NAME}"),
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No OS packages configured. At least one entry is required under `packages`.")]
    NoPackages,

    #[error("Runtime package name must not be empty.")]
    EmptyRuntimePackage,

    #[error("Invalid scrape interval '{0}': expected a number followed by ms, s, m or h")]
    InvalidInterval(String),

    #[error("No scrape targets configured. At least one entry is required under `scrape.targets`.")]
    NoScrapeTargets,
}
