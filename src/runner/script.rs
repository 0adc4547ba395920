//! Script materialization
//!
//! Writes a command's script body to a temporary executable file that lives
//! exactly as long as its [`ScriptFile`] handle.

use crate::error::{ExecutionError, ExecutionResult};
use std::io::{self, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile, TempPath};
use tracing::trace;

/// An executable copy of a script body on disk. Dropping it deletes the file.
#[derive(Debug)]
pub struct ScriptFile {
    path: TempPath,
}

impl ScriptFile {
    /// Write `script` verbatim to a new, uniquely named file in `scratch_dir` and mark it executable
    pub fn materialize(script: &str, scratch_dir: &Path) -> ExecutionResult<Self> {
        let map_err = |source: io::Error| ExecutionError::Materialize {
            dir: scratch_dir.to_path_buf(),
            source,
        };

        let mut file = Builder::new()
            .prefix("yar-")
            .tempfile_in(scratch_dir)
            .map_err(map_err)?;

        // Any failure below drops `file`, which removes it from disk
        file.write_all(script.as_bytes()).map_err(map_err)?;
        file.flush().map_err(map_err)?;
        make_executable(&file).map_err(map_err)?;

        // Close the write handle; executing a file that is still open for writing fails with ETXTBSY
        let path = file.into_temp_path();
        trace!(path = %path.display(), "materialized script");

        Ok(ScriptFile { path })
    }

    /// Location of the script on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the script, reporting whether removal succeeded
    pub fn release(self) -> io::Result<()> {
        self.path.close()
    }
}

#[cfg(unix)]
fn make_executable(file: &NamedTempFile) -> io::Result<()> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    file.as_file().set_permissions(Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_file: &NamedTempFile) -> io::Result<()> {
    Ok(())
}
