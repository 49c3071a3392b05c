//! systemd implementation of the `ServiceManager` port.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ServiceManager};
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner, describe_failure};

/// Drives units through `systemctl`.
pub struct SystemctlServiceManager<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> SystemctlServiceManager<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn systemctl(&self, args: &[&str]) -> Result<()> {
        let output = self
            .runner
            .run("systemctl", args)
            .await
            .with_context(|| format!("systemctl {}", args.join(" ")))?;
        if !output.status.success() {
            anyhow::bail!(describe_failure(
                &format!("systemctl {}", args.join(" ")),
                &output
            ));
        }
        Ok(())
    }
}

impl SystemctlServiceManager<TokioCommandRunner> {
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT))
    }
}

impl<R: CommandRunner> ServiceManager for SystemctlServiceManager<R> {
    async fn reload_units(&self) -> Result<()> {
        self.systemctl(&["daemon-reload"]).await
    }

    async fn restart(&self, unit: &str) -> Result<()> {
        self.systemctl(&["restart", unit]).await
    }

    async fn stop(&self, unit: &str) -> Result<()> {
        self.systemctl(&["stop", unit]).await
    }

    async fn is_running(&self, unit: &str) -> Result<bool> {
        // Non-zero covers inactive, failed and unknown units.
        let output = self
            .runner
            .run("systemctl", &["is-active", "--quiet", unit])
            .await
            .with_context(|| format!("systemctl is-active {unit}"))?;
        Ok(output.status.success())
    }
}
