//! `tester-unit scrape-jobs`: show the registration payload without
//! publishing it.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::scrape_registrar;

/// Run the scrape-jobs command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.config()?;
    let data = scrape_registrar::relation_data(&[config.scrape_target()?], &config.topology);
    app.renderer().render_scrape_jobs(&data)?;
    Ok(ExitCode::SUCCESS)
}
