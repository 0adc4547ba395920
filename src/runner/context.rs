//! Execution context for command running
//!
//! The context carries the directories the core would otherwise read from
//! process state: where relative globs are anchored and where scripts are written.

use std::env;
use std::path::{Path, PathBuf};

/// Execution context for a single command invocation
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory relative glob patterns are resolved against; also the script's working directory
    pub base_dir: PathBuf,

    /// Directory materialized scripts are written to
    pub scratch_dir: PathBuf,

    /// Skip execution when the command's outputs are newer than its inputs
    pub skip_up_to_date: bool,
}

impl Context {
    /// Create a context from the current directory and the system temp directory
    pub fn new() -> Self {
        Context {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            scratch_dir: env::temp_dir(),
            skip_up_to_date: false,
        }
    }

    /// Set the base directory
    pub fn with_base_dir(mut self, dir: PathBuf) -> Self {
        self.base_dir = dir;
        self
    }

    /// Use the directory containing the configuration file as base directory
    pub fn with_config_path(self, path: &Path) -> Self {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.with_base_dir(parent.to_path_buf()),
            _ => self,
        }
    }

    /// Set the scratch directory
    pub fn with_scratch_dir(mut self, dir: PathBuf) -> Self {
        self.scratch_dir = dir;
        self
    }

    /// Skip commands whose outputs are already fresh
    pub fn with_skip_up_to_date(mut self, skip: bool) -> Self {
        self.skip_up_to_date = skip;
        self
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
