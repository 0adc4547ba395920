//! Script execution
//!
//! Runs a materialized script as a child process with the caller's standard
//! streams attached and turns a non-zero exit into an error.

use crate::error::{ExecutionError, ExecutionResult};
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Shell used for scripts the kernel refuses to execute directly
const FALLBACK_SHELL: &str = "/bin/sh";

/// ENOEXEC: the file has no recognizable executable format (no `#!` line)
#[cfg(unix)]
const ENOEXEC: i32 = 8;

/// Attempts made while another thread's fork still holds the script open for writing
const BUSY_ATTEMPTS: u32 = 5;

/// Run the script at `path` in `working_dir`, blocking until it exits
pub fn execute_script(path: &Path, working_dir: &Path) -> ExecutionResult<()> {
    // The child changes directory before exec, so a relative script path would no longer resolve
    let path = std::path::absolute(path).map_err(|source| ExecutionError::Spawn {
        path: path.to_path_buf(),
        source,
    })?;
    let status = spawn_and_wait(&path, working_dir)?;
    check_status(status)
}

/// Start the script and wait for it.
///
/// Only the exec step is repeated, and only while the kernel reports the freshly
/// written file as busy (`ETXTBSY`). A busy exec never started the script, so the
/// command itself runs at most once and a failed command is never retried.
fn spawn_and_wait(path: &Path, working_dir: &Path) -> ExecutionResult<ExitStatus> {
    let mut attempt = 1;

    loop {
        match build_command(path, working_dir).status() {
            Ok(status) => return Ok(status),
            Err(e) if is_missing_interpreter(&e) => {
                debug!(path = %path.display(), "no interpreter line, running through {}", FALLBACK_SHELL);
                let mut command = Command::new(FALLBACK_SHELL);
                command.arg(path);
                return configure(command, working_dir)
                    .status()
                    .map_err(|source| ExecutionError::Spawn {
                        path: path.to_path_buf(),
                        source,
                    });
            }
            Err(e) if e.kind() == io::ErrorKind::ExecutableFileBusy && attempt < BUSY_ATTEMPTS => {
                debug!(attempt, "script busy, retrying spawn");
                attempt += 1;
                thread::sleep(Duration::from_millis(10 * u64::from(attempt)));
            }
            Err(source) => {
                return Err(ExecutionError::Spawn {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
}

fn build_command(path: &Path, working_dir: &Path) -> Command {
    configure(Command::new(path), working_dir)
}

fn configure(mut command: Command, working_dir: &Path) -> Command {
    command.current_dir(working_dir);
    command.stdin(Stdio::inherit());
    command.stdout(Stdio::inherit());
    command.stderr(Stdio::inherit());
    command
}

#[cfg(unix)]
fn is_missing_interpreter(err: &io::Error) -> bool {
    err.raw_os_error() == Some(ENOEXEC)
}

#[cfg(not(unix))]
fn is_missing_interpreter(_err: &io::Error) -> bool {
    false
}

fn check_status(status: ExitStatus) -> ExecutionResult<()> {
    if status.success() {
        return Ok(());
    }
    Err(ExecutionError::CommandFailed(exit_code(status)))
}

/// Exit code of the child; a signal death maps to 128 + signal as shells report it
#[cfg(unix)]
fn exit_code(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;

    status.code().or_else(|| status.signal().map(|sig| 128 + sig))
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> Option<i32> {
    status.code()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::runner::ScriptFile;
    use std::fs;
    use tempfile::TempDir;

    fn run(body: &str, working_dir: &Path) -> ExecutionResult<()> {
        let scratch = TempDir::new().unwrap();
        let script = ScriptFile::materialize(body, scratch.path()).unwrap();
        execute_script(script.path(), working_dir)
    }

    #[test]
    fn test_execute_with_shebang() {
        let dir = TempDir::new().unwrap();
        assert!(run("#!/bin/sh\ntrue\n", dir.path()).is_ok());
    }

    #[test]
    fn test_execute_without_shebang() {
        let dir = TempDir::new().unwrap();
        run("echo done > marker.txt\n", dir.path()).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("marker.txt")).unwrap(), "done\n");
    }

    #[test]
    fn test_execute_nonzero_exit() {
        let dir = TempDir::new().unwrap();
        let result = run("exit 7", dir.path());
        assert!(matches!(result, Err(ExecutionError::CommandFailed(Some(7)))));
    }

    #[test]
    fn test_failed_command_runs_once() {
        let dir = TempDir::new().unwrap();
        let result = run("#!/bin/sh\necho ran >> runs.txt\nexit 3\n", dir.path());
        assert!(matches!(result, Err(ExecutionError::CommandFailed(Some(3)))));
        assert_eq!(fs::read_to_string(dir.path().join("runs.txt")).unwrap(), "ran\n");
    }

    #[test]
    fn test_execute_killed_by_signal() {
        let dir = TempDir::new().unwrap();
        let result = run("#!/bin/sh\nkill -TERM $$\n", dir.path());
        assert!(matches!(result, Err(ExecutionError::CommandFailed(Some(143)))));
    }

    #[test]
    fn test_execute_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("not-there");
        let result = execute_script(&missing, dir.path());
        assert!(matches!(result, Err(ExecutionError::Spawn { path, .. }) if path == missing));
    }

    #[test]
    fn test_execute_missing_interpreter() {
        let dir = TempDir::new().unwrap();
        let result = run("#!/nonexistent/interpreter\n", dir.path());
        assert!(matches!(result, Err(ExecutionError::Spawn { .. })));
    }
}
