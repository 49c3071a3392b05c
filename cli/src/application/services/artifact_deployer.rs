//! Copy the tester executable into place and mark it executable.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use crate::application::ports::LocalFs;
use crate::domain::ArtifactError;

/// Copy `src` to `dst` and OR `exec_bits` into the destination mode.
///
/// Existing permission bits are never cleared.
///
/// # Errors
///
/// Returns [`ArtifactError::SourceMissing`] when `src` does not exist, or the
/// copy/permission failure otherwise.
pub fn deploy(
    fs: &impl LocalFs,
    src: &Path,
    dst: &Path,
    exec_bits: u32,
) -> Result<(), ArtifactError> {
    if !fs.exists(src) {
        return Err(ArtifactError::SourceMissing(src.to_path_buf()));
    }
    let copy_failed = |e: anyhow::Error| ArtifactError::Copy {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        reason: format!("{e:#}"),
    };
    if let Some(parent) = dst.parent()
        && !fs.exists(parent)
    {
        fs.create_dir_all(parent).map_err(copy_failed)?;
    }
    fs.copy(src, dst).map_err(copy_failed)?;

    let permissions = |e: anyhow::Error| ArtifactError::Permissions {
        path: dst.to_path_buf(),
        reason: format!("{e:#}"),
    };
    let mode = fs.mode(dst).map_err(permissions)?;
    fs.set_mode(dst, mode | exec_bits).map_err(permissions)?;
    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        mode = %format!("{:o}", mode | exec_bits),
        "artifact deployed"
    );
    Ok(())
}
