//! Core configuration types
//!
//! This module defines the data structures that represent a yar.yml configuration file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Commands keyed by name
pub type CommandTable = HashMap<String, YarCommand>;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct YarFile {
    /// Commands defined in the configuration
    #[serde(default)]
    pub commands: CommandTable,
}

/// A command definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct YarCommand {
    /// Human-facing description for the command listing
    #[serde(default)]
    pub description: String,

    /// Script body, written verbatim to an executable file
    #[serde(default)]
    pub script: String,

    /// Commands that are meant to run before this one. Not acted upon.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_string_list"
    )]
    pub needs: Vec<String>,

    /// Glob patterns of input files
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_string_list"
    )]
    pub dependencies: Vec<String>,

    /// Glob patterns of files this command produces
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_string_list"
    )]
    pub creates: Vec<String>,
}

impl YarCommand {
    /// Description with surrounding whitespace removed (block scalars end in a newline)
    pub fn summary(&self) -> &str {
        self.description.trim()
    }
}

/// Custom deserializer for lists that also accepts a single string
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::String(s) => Ok(vec![s]),
        Value::Sequence(seq) => {
            let mut items = Vec::with_capacity(seq.len());
            for item in seq {
                let s = String::deserialize(item).map_err(D::Error::custom)?;
                items.push(s);
            }
            Ok(items)
        }
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("expected a string or a list of strings")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_command() {
        let yaml = r#"
commands:
  build:
    description: Build the thing
    script: |
      #!/bin/sh
      make all
    needs: [fetch]
    dependencies:
      - "src/**/*.c"
    creates:
      - "out/app"
"#;
        let file: YarFile = serde_yaml::from_str(yaml).unwrap();
        let build = file.commands.get("build").unwrap();
        assert_eq!(build.description, "Build the thing");
        assert_eq!(build.script, "#!/bin/sh\nmake all\n");
        assert_eq!(build.needs, vec!["fetch"]);
        assert_eq!(build.dependencies, vec!["src/**/*.c"]);
        assert_eq!(build.creates, vec!["out/app"]);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let yaml = r#"
commands:
  noop: {}
"#;
        let file: YarFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.commands.get("noop"), Some(&YarCommand::default()));
    }

    #[test]
    fn test_single_string_patterns() {
        let yaml = r#"
commands:
  gen:
    script: echo gen
    dependencies: "*.proto"
    creates: gen/out.rs
"#;
        let file: YarFile = serde_yaml::from_str(yaml).unwrap();
        let generate = file.commands.get("gen").unwrap();
        assert_eq!(generate.dependencies, vec!["*.proto"]);
        assert_eq!(generate.creates, vec!["gen/out.rs"]);
    }

    #[test]
    fn test_rejects_mapping_as_pattern_list() {
        let yaml = r#"
commands:
  bad:
    creates:
      nested: value
"#;
        let result: Result<YarFile, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_summary_trims_block_scalar() {
        let cmd = YarCommand {
            description: "  Run the tests\n".to_string(),
            ..Default::default()
        };
        assert_eq!(cmd.summary(), "Run the tests");
    }
}
