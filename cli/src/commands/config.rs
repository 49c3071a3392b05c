//! `tester-unit config`: inspect configuration.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration and where it was read from
    Show,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or rendered.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let config = app.config()?;
    app.renderer()
        .render_config(&config, app.config_store.path())?;
    Ok(ExitCode::SUCCESS)
}
