//! Error types for Yar

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Yar operations
pub type Result<T> = std::result::Result<T, YarError>;

/// Main error type for Yar
#[derive(Error, Debug)]
pub enum YarError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Glob resolution and timestamp errors
    #[error("Freshness check failed: {0}")]
    Freshness(#[from] FreshnessError),

    /// Script materialization and execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl YarError {
    /// Process exit status for this error.
    ///
    /// A script that exited non-zero hands its own status through; everything
    /// else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            YarError::Execution(ExecutionError::CommandFailed(Some(code))) if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Configuration parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find config file (searched: {0})")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Command '{0}' is not defined")]
    UnknownCommand(String),
}

/// Errors raised while resolving globs and reading modification times
#[derive(Error, Debug)]
pub enum FreshnessError {
    #[error("Malformed glob pattern '{pattern}': {source}")]
    MalformedPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Cannot read modification time of '{path}': {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Script materialization and execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Failed to write script to scratch directory '{dir}': {source}")]
    Materialize {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to start '{path}': {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Command failed with exit code {0:?}")]
    CommandFailed(Option<i32>),
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for glob and timestamp operations
pub type FreshnessResult<T> = std::result::Result<T, FreshnessError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
