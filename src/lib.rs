//! Yar - a minimal declarative command runner
//!
//! A `yar.yml` file names commands, each with a script body, the files it
//! depends on and the files it creates. Running a command reports whether its
//! outputs are newer than its inputs, writes the script to a temporary
//! executable and runs it with the terminal's streams attached.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod runner;

// Re-export commonly used types
pub use error::{Result, YarError};

/// Current version of Yar
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
