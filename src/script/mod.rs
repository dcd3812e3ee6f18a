//! Generated script: emission, status rows, and writing the executable file.

pub mod emitter;
pub mod status;

pub use emitter::ScriptEmitter;
pub use status::{Status, StatusRecord, StatusReport};

use crate::error::SweepError;
use std::path::Path;
use tracing::info;

/// Write `text` to `path` and mark it executable.
pub fn write_script(path: &Path, text: &str) -> Result<(), SweepError> {
    let write_failed = |source| SweepError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(write_failed)?;
        }
    }
    std::fs::write(path, text).map_err(write_failed)?;
    mark_executable(path).map_err(write_failed)?;

    info!(path = %path.display(), bytes = text.len(), "Sweep script written");
    Ok(())
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    std::fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
