//! Configuration module.

pub mod keybindings;
mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ConsoleSection, ConsoleSettings, ResolvedConfig, CONFIG_ENV, FRAME_RATE_ENV, NO_CAPTURE_ENV,
};
