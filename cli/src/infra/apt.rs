//! apt-backed implementation of the `PackageManager` port.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::application::ports::{CommandRunner, PackageManager};
use crate::domain::PackageError;
use crate::infra::command_runner::{PACKAGE_CMD_TIMEOUT, TokioCommandRunner, describe_failure};

static NOT_FOUND: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Pattern is a compile-time constant
    Regex::new(
        r"Unable to locate package (\S+)|Package '?([^'\s]+)'? has no installation candidate",
    )
    .expect("valid regex")
});

/// Routes apt calls through a `CommandRunner`.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct AptPackageManager<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> AptPackageManager<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl AptPackageManager<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(
            TokioCommandRunner::new(PACKAGE_CMD_TIMEOUT)
                .with_env("DEBIAN_FRONTEND", "noninteractive"),
        )
    }
}

impl<R: CommandRunner> PackageManager for AptPackageManager<R> {
    async fn refresh_index(&self) -> Result<()> {
        let output = self
            .runner
            .run("apt-get", &["update"])
            .await
            .context("apt-get update")?;
        if !output.status.success() {
            anyhow::bail!(describe_failure("apt-get update", &output));
        }
        Ok(())
    }

    async fn install_packages(&self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Err(PackageError::Other("no packages given".to_string()).into());
        }
        if let Some(bad) = names
            .iter()
            .find(|n| n.trim().is_empty() || n.starts_with('-'))
        {
            return Err(PackageError::Other(format!("invalid package name '{bad}'")).into());
        }

        let mut args = vec!["install", "-y"];
        args.extend(names.iter().map(String::as_str));
        let output = self
            .runner
            .run("apt-get", &args)
            .await
            .context("apt-get install")?;
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if let Some(name) = missing_package(&stderr) {
            return Err(PackageError::NotFound(name).into());
        }
        Err(PackageError::Other(describe_failure("apt-get install", &output)).into())
    }
}

/// Extract the first package apt reported as missing.
fn missing_package(stderr: &str) -> Option<String> {
    let caps = NOT_FOUND.captures(stderr)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}
