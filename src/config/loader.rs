//! Configuration file loading with precedence handling.

use crate::console::CaptureStream;
use crate::dock::LayoutSpec;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DOCKSHELL_CONFIG";
/// Environment variable overriding the frame rate.
pub const FRAME_RATE_ENV: &str = "DOCKSHELL_FRAME_RATE";
/// Environment variable disabling output capture when set to a truthy value.
pub const NO_CAPTURE_ENV: &str = "DOCKSHELL_NO_CAPTURE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting has a value the shell cannot run with.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Dotted key of the setting.
        key: &'static str,
        /// Why the value is rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/dockshell/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Window (terminal) title.
    #[serde(default)]
    pub title: Option<String>,

    /// Frames per second of the render loop.
    #[serde(default)]
    pub frame_rate: Option<u32>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Output capture console settings.
    #[serde(default)]
    pub console: Option<ConsoleSection>,

    /// Dock layout; replaces the built-in arrangement entirely when present.
    #[serde(default)]
    pub layout: Option<LayoutSpec>,
}

/// `[console]` section of the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConsoleSection {
    /// Intercept the stream at all.
    #[serde(default)]
    pub capture: Option<bool>,

    /// Which stream to intercept. Only "stderr" passes validation while
    /// capture is on, since stdout carries the UI.
    #[serde(default)]
    pub stream: Option<CaptureStream>,

    /// Keep writing captured bytes to the original destination too.
    #[serde(default)]
    pub tee: Option<bool>,

    /// Lines retained in the console (0 = unbounded).
    #[serde(default)]
    pub max_lines: Option<usize>,
}

/// Resolved console settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleSettings {
    /// Intercept the stream at all.
    pub capture: bool,
    /// Stream to intercept.
    pub stream: CaptureStream,
    /// Keep writing captured bytes to the original destination too.
    pub tee: bool,
    /// Lines retained in the console (0 = unbounded).
    pub max_lines: usize,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            capture: true,
            stream: CaptureStream::Stderr,
            tee: false,
            max_lines: 10_000,
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Window title.
    pub title: String,
    /// Render loop frequency in frames per second.
    pub frame_rate: u32,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Console settings.
    pub console: ConsoleSettings,
    /// Dock layout description.
    pub layout: LayoutSpec,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            title: "Application".to_string(),
            frame_rate: 60,
            log_file_path: default_log_path(),
            console: ConsoleSettings::default(),
            layout: LayoutSpec::default(),
        }
    }
}

impl ResolvedConfig {
    /// Time budget of one frame. A frame rate of 0 is treated as 1.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Reject combinations the shell cannot run with.
    ///
    /// The terminal is drawn on standard output, so that stream cannot
    /// also be redirected into the console.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.console.capture && self.console.stream == CaptureStream::Stdout {
            return Err(ConfigError::InvalidValue {
                key: "console.stream",
                reason: "stdout is the drawing surface; only \"stderr\" can be captured"
                    .to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/dockshell/dockshell.log` on Unix-like systems,
/// or the platform equivalent. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("dockshell").join("dockshell.log")
    } else {
        PathBuf::from("dockshell.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path (`~/.config/dockshell/config.toml` on Unix).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dockshell").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `DOCKSHELL_CONFIG` environment variable
/// 3. Default path `~/.config/dockshell/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let console = config.console.unwrap_or_default();

    ResolvedConfig {
        title: config.title.unwrap_or(defaults.title),
        frame_rate: config.frame_rate.unwrap_or(defaults.frame_rate),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        console: ConsoleSettings {
            capture: console.capture.unwrap_or(defaults.console.capture),
            stream: console.stream.unwrap_or(defaults.console.stream),
            tee: console.tee.unwrap_or(defaults.console.tee),
            max_lines: console.max_lines.unwrap_or(defaults.console.max_lines),
        },
        layout: config.layout.unwrap_or(defaults.layout),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `DOCKSHELL_FRAME_RATE`: Override frame rate (ignored if not a positive integer)
/// - `DOCKSHELL_NO_CAPTURE`: Disable capture unless empty, `0` or `false`
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(FRAME_RATE_ENV) {
        match raw.trim().parse::<u32>() {
            Ok(rate) if rate > 0 => config.frame_rate = rate,
            _ => warn!(value = %raw, "Ignoring invalid {}", FRAME_RATE_ENV),
        }
    }

    if let Ok(raw) = std::env::var(NO_CAPTURE_ENV) {
        if is_truthy(&raw) {
            config.console.capture = false;
        }
    }

    config
}

fn is_truthy(raw: &str) -> bool {
    let value = raw.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    title_override: Option<String>,
    frame_rate_override: Option<u32>,
    capture_override: Option<bool>,
    tee_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(title) = title_override {
        config.title = title;
    }

    if let Some(rate) = frame_rate_override {
        config.frame_rate = rate;
    }

    if let Some(capture) = capture_override {
        config.console.capture = capture;
    }

    if let Some(tee) = tee_override {
        config.console.tee = tee;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
