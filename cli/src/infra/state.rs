//! Infrastructure implementation of the `UnitStateStore` port.
//!
//! `StateManager` provides async load/save using `tokio::task::spawn_blocking`
//! with atomic write (temp file + rename) to prevent state corruption.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::UnitStateStore;
use crate::domain::UnitState;

/// State file manager: implements `UnitStateStore` for the infra layer.
pub struct StateManager {
    path: PathBuf,
}

impl StateManager {
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Synchronous load. Used internally by `load_async` via `spawn_blocking`.
    fn load_sync(&self) -> Result<Option<UnitState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading state file {}", self.path.display()))?;
        let state: UnitState = serde_json::from_str(&content)
            .with_context(|| format!("parsing state file {}", self.path.display()))?;
        Ok(Some(state))
    }

    /// Synchronous save. Used internally by `save_async` via `spawn_blocking`.
    fn save_sync(&self, state: &UnitState) -> Result<()> {
        let content = serde_json::to_string_pretty(state).context("serializing state")?;
        write_atomic(&self.path, &content)
    }
}

impl UnitStateStore for StateManager {
    async fn load_async(&self) -> Result<Option<UnitState>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || StateManager::with_path(path).load_sync())
            .await
            .context("state load task panicked")?
    }

    async fn save_async(&self, state: &UnitState) -> Result<()> {
        let path = self.path.clone();
        let state = state.clone();
        tokio::task::spawn_blocking(move || StateManager::with_path(path).save_sync(&state))
            .await
            .context("state save task panicked")?
    }
}

/// Write `content` to `path` via a sibling temp file and rename, mode 0600.
///
/// # Errors
///
/// Returns an error if the parent directory, temp file or rename fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);
    std::fs::write(&temp_path, content)
        .with_context(|| format!("writing temp file {}", temp_path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
    }

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("finalizing {}", path.display()))?;
    Ok(())
}
