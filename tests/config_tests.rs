//! Tests for loading the YAML configuration file

use podminator::config::loader::REFRESH_ENV;
use podminator::config::{Config, ConfigLoader};
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn test_full_config_file() {
    let file = write_config(
        r#"refreshIntervalSecs: 15
searchDebounceMs: 500
useNewTerminal: true
execCommand: /bin/bash
statusTimeoutSecs: 8
terminal:
  command: ["x-terminal-emulator", "-e"]
ui:
  enableMouse: true
"#,
    );

    let config = ConfigLoader::load_file(file.path()).unwrap();
    assert_eq!(config.refresh_interval(), Duration::from_secs(15));
    assert_eq!(config.search_debounce(), Duration::from_millis(500));
    assert!(config.use_new_terminal);
    assert_eq!(config.exec_command, "/bin/bash");
    assert_eq!(config.status_timeout(), Duration::from_secs(8));
    assert_eq!(config.terminal.command, vec!["x-terminal-emulator", "-e"]);
    assert!(config.ui.enable_mouse);
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = write_config("{}\n");
    let config = ConfigLoader::load_file(file.path()).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.exec_command, "/bin/sh");
    assert!(config.terminal.command.is_empty());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = ConfigLoader::load_file(&dir.path().join("config.yaml")).unwrap_err();
    assert!(error.to_string().contains("Failed to read config file"));
}

#[test]
fn test_env_override_wins_over_file() {
    let file = write_config("refreshIntervalSecs: 15\n");
    let config = ConfigLoader::load_file(file.path()).unwrap();
    let config = ConfigLoader::apply_overrides(config, |key| {
        (key == REFRESH_ENV).then(|| "90".to_string())
    });
    assert_eq!(config.refresh_interval_secs, 90);
}

#[test]
fn test_invalid_env_override_is_ignored() {
    let config = ConfigLoader::apply_overrides(Config::default(), |key| {
        (key == REFRESH_ENV).then(|| "soon".to_string())
    });
    assert_eq!(config.refresh_interval_secs, 60);
}

#[test]
fn test_config_round_trips_through_yaml() {
    let mut config = Config::default();
    config.search_debounce_ms = 120;
    config.terminal.command = vec!["kitty".to_string()];
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, config);
}
