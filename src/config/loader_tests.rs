//! Tests for configuration file loading.

use super::*;
use crate::dock::{DockBinding, SplitDirection, SplitDirective};
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_dockshell_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("dockshell") && path_str.ends_with("config.toml"),
            "Path should contain 'dockshell' and end with 'config.toml', got: {}",
            path_str
        );
    }
}

#[test]
fn default_log_path_ends_with_dockshell_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("dockshell.log"),
        "Default log path should end with 'dockshell.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("dockshell_test_config_valid.toml");

    let toml_content = r#"
title = "Scene Editor"
frame_rate = 30

[console]
capture = false
stream = "stdout"
tee = true
max_lines = 500
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Config should be present");

    assert_eq!(config.title, Some("Scene Editor".to_string()));
    assert_eq!(config.frame_rate, Some(30));
    let console = config.console.expect("Console section should be present");
    assert_eq!(console.capture, Some(false));
    assert_eq!(console.stream, Some(CaptureStream::Stdout));
    assert_eq!(console.tee, Some(true));
    assert_eq!(console.max_lines, Some(500));
    assert_eq!(config.layout, None);

    let _ = fs::remove_file(&config_path);
}

#[test]
fn load_config_file_parses_layout_section() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("dockshell_test_config_layout.toml");

    let toml_content = r#"
[[layout.split]]
parent = "root"
direction = "vertical"
ratio = 0.8
first = "top"
second = "bottom"

[[layout.dock]]
panel = "viewport"
region = "top"

[[layout.dock]]
panel = "console"
region = "bottom"
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path).unwrap().unwrap();
    let layout = config.layout.expect("Layout should be present");

    assert_eq!(
        layout.splits,
        vec![SplitDirective::new("root", SplitDirection::Vertical, 0.8, "top", "bottom").unwrap()]
    );
    assert_eq!(
        layout.docks,
        vec![
            DockBinding::new("viewport", "top").unwrap(),
            DockBinding::new("console", "bottom").unwrap(),
        ]
    );

    let _ = fs::remove_file(&config_path);
}

#[test]
fn load_config_file_rejects_invalid_toml() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("dockshell_test_config_invalid.toml");

    fs::write(&config_path, "frame_rate = [not valid").unwrap();

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a parse error, got {:?}",
        result
    );

    let _ = fs::remove_file(&config_path);
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("dockshell_test_config_unknown.toml");

    fs::write(&config_path, "theme = \"monokai\"\n").unwrap();

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    let _ = fs::remove_file(&config_path);
}

#[test]
fn merge_config_none_returns_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_only_present_fields() {
    let config_file = ConfigFile {
        frame_rate: Some(144),
        console: Some(ConsoleSection {
            tee: Some(true),
            ..ConsoleSection::default()
        }),
        ..ConfigFile::default()
    };

    let merged = merge_config(Some(config_file));
    let defaults = ResolvedConfig::default();

    assert_eq!(merged.frame_rate, 144);
    assert!(merged.console.tee);
    assert_eq!(merged.console.capture, defaults.console.capture);
    assert_eq!(merged.console.max_lines, defaults.console.max_lines);
    assert_eq!(merged.title, defaults.title);
    assert_eq!(merged.layout, defaults.layout);
}

#[test]
fn resolved_default_matches_reference_shell() {
    let config = ResolvedConfig::default();
    assert_eq!(config.title, "Application");
    assert_eq!(config.frame_rate, 60);
    assert!(config.console.capture);
    assert_eq!(config.console.stream, CaptureStream::Stderr);
    assert!(!config.console.tee);
}

#[test]
fn frame_interval_is_reciprocal_of_rate() {
    let config = ResolvedConfig {
        frame_rate: 50,
        ..ResolvedConfig::default()
    };
    assert_eq!(config.frame_interval(), Duration::from_millis(20));
}

#[test]
fn frame_interval_treats_zero_rate_as_one() {
    let config = ResolvedConfig {
        frame_rate: 0,
        ..ResolvedConfig::default()
    };
    assert_eq!(config.frame_interval(), Duration::from_secs(1));
}

#[test]
#[serial(env)]
fn env_overrides_frame_rate_and_capture() {
    env::set_var(FRAME_RATE_ENV, "24");
    env::set_var(NO_CAPTURE_ENV, "1");

    let config = apply_env_overrides(ResolvedConfig::default());

    env::remove_var(FRAME_RATE_ENV);
    env::remove_var(NO_CAPTURE_ENV);

    assert_eq!(config.frame_rate, 24);
    assert!(!config.console.capture);
}

#[test]
#[serial(env)]
fn env_ignores_invalid_frame_rate_and_falsy_no_capture() {
    env::set_var(FRAME_RATE_ENV, "fast");
    env::set_var(NO_CAPTURE_ENV, "false");

    let config = apply_env_overrides(ResolvedConfig::default());

    env::remove_var(FRAME_RATE_ENV);
    env::remove_var(NO_CAPTURE_ENV);

    assert_eq!(config.frame_rate, 60);
    assert!(config.console.capture);
}

#[test]
#[serial(env)]
fn env_config_path_is_used_when_no_explicit_path() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("dockshell_test_config_env.toml");
    fs::write(&config_path, "title = \"From Env\"\n").unwrap();

    env::set_var(CONFIG_ENV, &config_path);
    let result = load_config_with_precedence(None);
    env::remove_var(CONFIG_ENV);

    let config = result.unwrap().unwrap();
    assert_eq!(config.title, Some("From Env".to_string()));

    let _ = fs::remove_file(&config_path);
}

#[test]
#[serial(env)]
fn explicit_path_wins_over_env_path() {
    let temp_dir = env::temp_dir();
    let explicit = temp_dir.join("dockshell_test_config_explicit.toml");
    let from_env = temp_dir.join("dockshell_test_config_shadowed.toml");
    fs::write(&explicit, "title = \"Explicit\"\n").unwrap();
    fs::write(&from_env, "title = \"Env\"\n").unwrap();

    env::set_var(CONFIG_ENV, &from_env);
    let result = load_config_with_precedence(Some(explicit.clone()));
    env::remove_var(CONFIG_ENV);

    assert_eq!(result.unwrap().unwrap().title, Some("Explicit".to_string()));

    let _ = fs::remove_file(&explicit);
    let _ = fs::remove_file(&from_env);
}

#[test]
fn cli_overrides_have_highest_precedence() {
    let config = ResolvedConfig::default();

    let config = apply_cli_overrides(config, Some("CLI".to_string()), Some(15), Some(false), Some(true));

    assert_eq!(config.title, "CLI");
    assert_eq!(config.frame_rate, 15);
    assert!(!config.console.capture);
    assert!(config.console.tee);
}

#[test]
fn cli_overrides_none_leave_config_unchanged() {
    let config = ResolvedConfig::default();

    let result = apply_cli_overrides(config.clone(), None, None, None, None);

    assert_eq!(result, config);
}

#[test]
fn validate_accepts_defaults() {
    assert_eq!(ResolvedConfig::default().validate(), Ok(()));
}

#[test]
fn validate_rejects_capturing_the_drawing_stream() {
    let mut config = ResolvedConfig::default();
    config.console.stream = CaptureStream::Stdout;

    let err = config.validate().unwrap_err();

    assert!(matches!(err, ConfigError::InvalidValue { key: "console.stream", .. }));
    assert!(err.to_string().contains("console.stream"));
}

#[test]
fn validate_allows_stdout_setting_when_capture_is_off() {
    let mut config = ResolvedConfig::default();
    config.console.stream = CaptureStream::Stdout;
    config.console.capture = false;

    assert_eq!(config.validate(), Ok(()));
}

#[test]
#[serial(env)]
fn overrides_after_logging_starts_keep_log_path() {
    let mut merged = ResolvedConfig::default();
    merged.log_file_path = PathBuf::from("/tmp/dockshell_test_logs/run.log");

    env::set_var(FRAME_RATE_ENV, "fast");
    let with_env = apply_env_overrides(merged.clone());
    env::remove_var(FRAME_RATE_ENV);
    let resolved = apply_cli_overrides(with_env, Some("CLI".to_string()), Some(30), None, None);

    assert_eq!(resolved.log_file_path, merged.log_file_path);
}
