#![forbid(unsafe_code)]

mod commands;
mod config;
mod constants;
mod desktop;
mod display;
mod error;
mod identity;
mod lock;
mod types;
mod watch;
mod x11_utils;
mod xresources;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use config::Settings;
use desktop::X11Desktop;
use lock::InstanceLock;
use watch::{TickOutcome, WatchContext};

/// Apply a per-monitor-set xrandr layout script whenever displays change,
/// and publish the resulting outputs to i3 through X resources.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Program to run after each change
    #[arg(long, value_name = "PATH")]
    post: Option<PathBuf>,

    /// Apply the current configuration once and exit (no instance lock)
    #[arg(long)]
    once: bool,

    /// Config file (default: ~/.config/xrandr-autolayout/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn parse_level(level: &str) -> TraceLevel {
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&log_level))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&config_path)?;
    info!(config = ?settings, "settings");

    let _lock = if cli.once {
        None
    } else {
        Some(InstanceLock::acquire(&lock::default_lock_path()?)?)
    };

    let desktop = X11Desktop::connect(&settings).context("Failed to set up X11 session")?;
    let ctx = WatchContext {
        backend: &desktop,
        script_dir: &settings.script_dir,
        xresources_path: &settings.xresources_path,
        post_hook: cli.post.as_deref(),
    };

    if cli.once {
        info!("running once");
        if let TickOutcome::Changed { fingerprint, script_applied, .. } = watch::run_once(&ctx)? {
            info!(displays = %fingerprint, script_applied, "applied display configuration");
        }
        return Ok(());
    }

    watch::run(&ctx, settings.poll_interval())
}
