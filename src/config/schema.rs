//! Configuration validation
//!
//! This module provides validation logic for configuration files.

use crate::config::types::{YarCommand, YarFile};
use crate::error::{ConfigError, ConfigResult};
use tracing::warn;

/// Validate a complete configuration
pub fn validate_config(config: &YarFile) -> ConfigResult<()> {
    for (name, command) in &config.commands {
        validate_command(name, command, config)?;
    }

    Ok(())
}

/// Validate a single command
pub fn validate_command(name: &str, command: &YarCommand, config: &YarFile) -> ConfigResult<()> {
    validate_command_name(name)?;

    // needs are never executed; a dangling name is worth a warning, not a failure
    for need in &command.needs {
        if !config.commands.contains_key(need) {
            warn!(command = name, need = %need, "command needs an undefined command");
        }
    }

    Ok(())
}

/// Command names become subcommands, so they must be addressable from a shell
fn validate_command_name(name: &str) -> ConfigResult<()> {
    if name.is_empty() {
        return Err(ConfigError::Invalid("command names cannot be empty".to_string()));
    }
    if name.starts_with('-') {
        return Err(ConfigError::Invalid(format!(
            "command name '{}' cannot start with '-'",
            name
        )));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid(format!(
            "command name '{}' cannot contain whitespace",
            name
        )));
    }
    Ok(())
}
