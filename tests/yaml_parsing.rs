//! Integration tests for YAML parsing

mod common;

use common::create_test_config;
use yar::config::{lookup_command, parse_config, parse_config_file, validate_config};
use yar::error::{ConfigError, YarError};

#[test]
fn test_parse_complete_config() {
    let yaml = r#"
commands:
  build:
    description: |
      Build the project
    needs:
      - generate
    dependencies:
      - "src/**/*.rs"
      - Cargo.toml
    creates:
      - target/release/app
    script: |
      #!/bin/sh
      cargo build --release

  generate:
    description: Generate sources
    dependencies: proto/*.proto
    creates: src/generated.rs
    script: ./gen.sh

  clean:
    script: rm -rf target
"#;

    let config = parse_config(yaml).unwrap();
    validate_config(&config).unwrap();

    assert_eq!(config.commands.len(), 3);

    let build = lookup_command(&config.commands, "build").unwrap();
    assert_eq!(build.summary(), "Build the project");
    assert_eq!(build.needs, vec!["generate"]);
    assert_eq!(build.dependencies, vec!["src/**/*.rs", "Cargo.toml"]);
    assert_eq!(build.creates, vec!["target/release/app"]);
    assert!(build.script.starts_with("#!/bin/sh\n"));

    let generate = lookup_command(&config.commands, "generate").unwrap();
    assert_eq!(generate.dependencies, vec!["proto/*.proto"]);
    assert_eq!(generate.creates, vec!["src/generated.rs"]);

    let clean = lookup_command(&config.commands, "clean").unwrap();
    assert!(clean.description.is_empty());
    assert!(clean.needs.is_empty());
    assert!(clean.dependencies.is_empty());
    assert!(clean.creates.is_empty());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let yaml = r#"
version: 2
commands:
  hello:
    script: echo hi
    shell: zsh
"#;

    let config = parse_config(yaml).unwrap();
    assert!(config.commands.contains_key("hello"));
}

#[test]
fn test_parse_config_file_from_disk() {
    let (_dir, config_path) = create_test_config(
        r#"
commands:
  test:
    script: cargo test
"#,
    );

    let config = parse_config_file(&config_path).unwrap();
    assert!(config.commands.contains_key("test"));
}

#[test]
fn test_file_without_commands() {
    let config = parse_config("# nothing here yet\n").unwrap();
    assert!(config.commands.is_empty());
}

#[test]
fn test_invalid_command_name_rejected() {
    let yaml = r#"
commands:
  "run all":
    script: echo all
"#;

    let config = parse_config(yaml).unwrap();
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_wrong_type_is_a_yaml_error() {
    let yaml = r#"
commands:
  build:
    dependencies: 42
"#;

    assert!(matches!(parse_config(yaml), Err(YarError::Yaml(_))));
}
