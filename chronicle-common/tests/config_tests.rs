//! Integration tests for configuration loading and config file resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate CHRONICLE_CONFIG are marked with #[serial].

use chronicle_common::config::{
    load_toml_config, resolve_config_path, TomlConfig, CONFIG_ENV_VAR,
};
use chronicle_common::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_full_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("chronicle-import.toml");
    std::fs::write(
        &path,
        r#"
[logging]
level = "debug"
file = "/var/log/chronicle.log"

[dates]
min_year = 800
max_year = 2000
circa_confidence = 0.65

[matching]
person_threshold = 0.75
birth_year_window = 3
"#,
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, Some(PathBuf::from("/var/log/chronicle.log")));
    assert_eq!(config.dates.min_year, 800);
    assert_eq!(config.dates.max_year, 2000);
    assert_eq!(config.dates.circa_confidence, 0.65);
    // Untouched values keep their defaults
    assert_eq!(config.dates.year_confidence, 0.8);
    assert_eq!(config.matching.person_threshold, 0.75);
    assert_eq!(config.matching.birth_year_window, 3);
    assert_eq!(config.matching.event_location_threshold, 0.7);
}

#[test]
fn test_empty_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.toml");
    std::fs::write(&path, "").unwrap();

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.toml");

    let result = TomlConfig::load(Some(&path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_invalid_threshold_in_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "[matching]\nevent_threshold = -0.2\n").unwrap();

    let err = load_toml_config(&path).unwrap_err();
    assert!(err.to_string().contains("matching.event_threshold"));
}

#[test]
#[serial]
fn test_env_var_used_when_no_cli_arg() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("from-env.toml");
    std::fs::write(&path, "[matching]\nperson_threshold = 0.6\n").unwrap();

    env::set_var(CONFIG_ENV_VAR, &path);
    let resolved = resolve_config_path(None, CONFIG_ENV_VAR);
    let config = TomlConfig::load(None);
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(resolved, Some(path));
    assert_eq!(config.unwrap().matching.person_threshold, 0.6);
}

#[test]
#[serial]
fn test_cli_arg_beats_env_var() {
    let temp_dir = TempDir::new().unwrap();
    let cli_path = temp_dir.path().join("cli.toml");
    let env_path = temp_dir.path().join("env.toml");

    env::set_var(CONFIG_ENV_VAR, &env_path);
    let resolved = resolve_config_path(Some(&cli_path), CONFIG_ENV_VAR);
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(resolved, Some(cli_path));
}

#[test]
#[serial]
fn test_blank_env_var_is_ignored() {
    env::set_var(CONFIG_ENV_VAR, "   ");
    let resolved = resolve_config_path(None, CONFIG_ENV_VAR);
    env::remove_var(CONFIG_ENV_VAR);

    // Falls through to the platform path, which only resolves if it exists
    if let Some(path) = resolved {
        assert!(path.exists());
    }
}
