//! Command execution engine
//!
//! This module resolves globs, checks freshness, materializes scripts and
//! runs them.

pub mod context;
pub mod freshness;
pub mod paths;
pub mod process;
pub mod script;
pub mod task;

// Re-export main types
pub use context::*;
pub use freshness::*;
pub use paths::*;
pub use process::*;
pub use script::*;
pub use task::*;
