//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::Output;

use anyhow::Result;

use crate::domain::{RelationData, UnitState};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}

// ── Package Manager Ports ─────────────────────────────────────────────────────

/// OS package manager (apt on the target hosts).
///
/// `install_packages` reports a missing package as
/// [`crate::domain::PackageError::NotFound`] wrapped in `anyhow::Error`.
#[allow(async_fn_in_trait)]
pub trait PackageManager {
    /// Refresh the package index.
    async fn refresh_index(&self) -> Result<()>;
    /// Install all `names` in one batch.
    async fn install_packages(&self, names: &[String]) -> Result<()>;
}

/// Language runtime package manager, e.g. `pip3`, invoked as a subprocess.
#[allow(async_fn_in_trait)]
pub trait RuntimePackageManager {
    /// Install `package` with the `manager` binary.
    async fn install_package(&self, manager: &str, package: &str) -> Result<()>;
}

// ── Service Manager Port ──────────────────────────────────────────────────────

/// Host service manager (systemd).
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    /// Make the service manager re-read unit definitions.
    async fn reload_units(&self) -> Result<()>;
    /// Restart the unit, starting it if it is not running.
    async fn restart(&self, unit: &str) -> Result<()>;
    /// Stop the unit.
    async fn stop(&self, unit: &str) -> Result<()>;
    /// Whether the unit is currently running.
    async fn is_running(&self, unit: &str) -> Result<bool>;
}

// ── Monitoring Registrar Port ─────────────────────────────────────────────────

/// Accepts the scrape registration for this unit. Called once.
pub trait ScrapeRegistrar {
    /// Publish the relation data where the monitoring side reads it.
    fn publish(&self, data: &RelationData) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── State and Filesystem Ports ────────────────────────────────────────────────

/// Abstracts unit state persistence (load/save).
#[allow(async_fn_in_trait)]
pub trait UnitStateStore {
    /// Load the persisted unit state, returning `None` if no state exists.
    async fn load_async(&self) -> Result<Option<UnitState>>;
    /// Persist the given unit state.
    async fn save_async(&self, state: &UnitState) -> Result<()>;
}

/// Abstracts file hashing operations.
pub trait FileHasher {
    /// Compute the SHA-256 hash of a file.
    fn sha256_file(&self, path: &Path) -> Result<String>;
}

/// Abstracts local filesystem operations used by the deployer and unit manager.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Overwrite `path` with `content`.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Byte-for-byte copy, replacing `dst` if it exists.
    fn copy(&self, src: &Path, dst: &Path) -> Result<()>;
    /// Unix permission bits of `path`.
    fn mode(&self, path: &Path) -> Result<u32>;
    fn set_mode(&self, path: &Path, mode: u32) -> Result<()>;
}
