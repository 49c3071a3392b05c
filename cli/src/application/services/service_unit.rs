//! Service unit operations: publish the unit file, restart, stop.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::{LocalFs, ServiceManager};
use crate::domain::{ServiceError, ServiceUnitSpec};

/// Render and write the unit file, reload units, then restart the unit.
///
/// The unit file is overwritten unconditionally; rendering is deterministic
/// so repeated calls leave identical contents.
///
/// # Errors
///
/// Returns the [`ServiceError`] of the first failing step. Later steps do not
/// run.
pub async fn publish_and_start(
    svc: &impl ServiceManager,
    fs: &impl LocalFs,
    spec: &ServiceUnitSpec,
) -> Result<(), ServiceError> {
    let unit_write = |e: anyhow::Error| ServiceError::UnitWrite {
        path: spec.unit_path.clone(),
        reason: format!("{e:#}"),
    };
    if let Some(parent) = spec.unit_path.parent()
        && !fs.exists(parent)
    {
        fs.create_dir_all(parent).map_err(unit_write)?;
    }
    fs.write(&spec.unit_path, &spec.render()).map_err(unit_write)?;
    tracing::debug!(path = %spec.unit_path.display(), "unit file written");

    svc.reload_units()
        .await
        .map_err(|e| ServiceError::Reload(format!("{e:#}")))?;

    let service = spec.service_name();
    svc.restart(&service)
        .await
        .map_err(|e| ServiceError::Restart {
            unit: service.clone(),
            reason: format!("{e:#}"),
        })?;
    tracing::info!(unit = %service, "unit restarted");
    Ok(())
}

/// Stop `unit` if, and only if, it is currently running.
///
/// Returns whether a stop was issued.
///
/// # Errors
///
/// Returns [`ServiceError::Query`] if the running state cannot be read, or
/// [`ServiceError::Stop`] if a running unit fails to stop.
pub async fn stop_if_running(svc: &impl ServiceManager, unit: &str) -> Result<bool, ServiceError> {
    let running = svc.is_running(unit).await.map_err(|e| ServiceError::Query {
        unit: unit.to_string(),
        reason: format!("{e:#}"),
    })?;
    if !running {
        tracing::debug!(%unit, "unit not running; nothing to stop");
        return Ok(false);
    }
    svc.stop(unit).await.map_err(|e| ServiceError::Stop {
        unit: unit.to_string(),
        reason: format!("{e:#}"),
    })?;
    tracing::info!(%unit, "unit stopped");
    Ok(true)
}
