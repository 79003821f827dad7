//! Dock Shell - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Dock Shell - docked-panel terminal application shell
#[derive(Parser, Debug)]
#[command(name = "dockshell")]
#[command(version)]
#[command(about = "Terminal application shell with docked panels and an output-capture console")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not capture the diagnostic stream into the console
    #[arg(long)]
    pub no_capture: bool,

    /// Keep writing captured output to its original destination too
    #[arg(long)]
    pub tee: bool,

    /// Frames per second of the render loop (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: Option<u32>,

    /// Window (terminal) title
    #[arg(long)]
    pub title: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 1. Load config file (or None if missing)
    let config_file = dockshell::config::load_config_with_precedence(args.config.clone())?;

    // 2. Merge with defaults
    let merged = dockshell::config::merge_config(config_file);

    // Logging starts before the overrides, which may warn. Neither env vars
    // nor flags change the log path.
    // Keep the guard alive until exit so buffered records are flushed
    let _log_guard = dockshell::logging::init(&merged.log_file_path)?;

    // 3. Apply environment variable overrides
    let with_env = dockshell::config::apply_env_overrides(merged);

    // 4. Apply CLI argument overrides
    // Boolean flags only override when explicitly set
    let capture_override = if args.no_capture { Some(false) } else { None };
    let tee_override = if args.tee { Some(true) } else { None };

    let config = dockshell::config::apply_cli_overrides(
        with_env,
        args.title.clone(),
        args.fps,
        capture_override,
        tee_override,
    );

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let colors = dockshell::view::ColorConfig::from_env_and_args(args.no_color);
    dockshell::view::run_with_config(&config, colors)?;

    info!("Shutdown complete");
    Ok(())
}
