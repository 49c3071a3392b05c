//! Status command: print the persisted unit state. Read-only.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::UnitStateStore;
use crate::infra::state::StateManager;

/// Run the status command.
///
/// # Errors
///
/// Returns an error if the config or state file cannot be read.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.config()?;
    let store = StateManager::with_path(config.state_path);
    let state = store.load_async().await?.unwrap_or_default();
    app.renderer().render_status(&state)?;
    Ok(ExitCode::SUCCESS)
}
