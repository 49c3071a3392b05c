//! Subprocess implementation of the `RuntimePackageManager` port.

use anyhow::Result;

use crate::application::ports::{CommandRunner, RuntimePackageManager};
use crate::domain::RuntimePackageError;
use crate::infra::command_runner::{PACKAGE_CMD_TIMEOUT, TokioCommandRunner};

/// Runs `<manager> install <package>`, e.g. `pip3 install prometheus-client`.
pub struct PipRuntimeManager<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> PipRuntimeManager<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl PipRuntimeManager<TokioCommandRunner> {
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::new(PACKAGE_CMD_TIMEOUT))
    }
}

impl<R: CommandRunner> RuntimePackageManager for PipRuntimeManager<R> {
    async fn install_package(&self, manager: &str, package: &str) -> Result<()> {
        let output = self
            .runner
            .run(manager, &["install", package])
            .await
            .map_err(|e| RuntimePackageError::Spawn {
                manager: manager.to_string(),
                reason: format!("{e:#}"),
            })?;
        if output.status.success() {
            return Ok(());
        }
        Err(RuntimePackageError::ExitStatus {
            manager: manager.to_string(),
            package: package.to_string(),
            code: output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string()),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into())
    }
}
