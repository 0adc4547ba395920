//! Configuration file parsing and discovery

use crate::config::types::{CommandTable, YarCommand, YarFile};
use crate::error::{ConfigError, ConfigResult, YarError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file names to search for
pub const CONFIG_FILE_NAMES: &[&str] = &["yar.yml", "yar.yaml"];

/// Find the configuration file by searching current and parent directories
pub fn find_config_file() -> ConfigResult<PathBuf> {
    find_config_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find the configuration file starting from a specific directory
pub fn find_config_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in CONFIG_FILE_NAMES {
            let config_path = current_dir.join(file_name);
            searched_paths.push(config_path.display().to_string());

            if config_path.is_file() {
                return Ok(config_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Parse a configuration file from a path
pub fn parse_config_file(path: &Path) -> Result<YarFile, YarError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ConfigError::Invalid(format!("Failed to read {}: {}", path.display(), e))
    })?;

    parse_config(&contents)
}

/// Parse configuration from a string
pub fn parse_config(yaml: &str) -> Result<YarFile, YarError> {
    // serde_yaml rejects a document with no content; treat it as a file with no commands
    if is_blank_document(yaml) {
        return Ok(YarFile::default());
    }

    let config: YarFile = serde_yaml::from_str(yaml)?;
    Ok(config)
}

fn is_blank_document(yaml: &str) -> bool {
    yaml.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

/// Parse configuration with automatic file discovery
pub fn parse_config_auto() -> Result<(YarFile, PathBuf), YarError> {
    let config_path = find_config_file()?;
    let config = parse_config_file(&config_path)?;
    Ok((config, config_path))
}

/// Look up a command by name
pub fn lookup_command<'a>(table: &'a CommandTable, name: &str) -> ConfigResult<&'a YarCommand> {
    table
        .get(name)
        .ok_or_else(|| ConfigError::UnknownCommand(name.to_string()))
}
