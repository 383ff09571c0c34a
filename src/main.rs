//! Browser Profile Launcher
//!
//! Entry point for CLI and GUI modes.

mod cli;
mod gui;

use anyhow::Context;
use browser_profile_launcher::core::registry::ProfileRegistry;
use browser_profile_launcher::{config, server, util};
use clap::Parser;
use cli::Args;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config, using defaults: {:#}", e);
            config::Config::default()
        }
    };

    // Handle subcommands first
    if let Some(command) = args.command {
        return cli::handle_command(command, &config).await;
    }

    // GUI mode: discover profiles, start the icon server, then open the window
    tracing::info!("Starting Browser Profile Launcher GUI");
    let registry = ProfileRegistry::discover();
    let icon_addr = server::spawn(&config.server, registry.clone()).await?;
    let runtime = tokio::runtime::Handle::current();

    tokio::task::block_in_place(|| gui::run(config, registry, icon_addr, runtime))
}

/// Log to stderr and to the log file in the data directory
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose || cfg!(debug_assertions) {
        "debug"
    } else {
        "error"
    };
    let directives = format!("warn,browser_profile_launcher={}", default_level);
    let filter = if verbose {
        EnvFilter::new(directives)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
    };

    let log_path = util::log_path();
    let (log_file, log_error) = match open_log_file(&log_path) {
        Ok(file) => (Some(file), None),
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(log_file.map(|file| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        }))
        .init();

    if let Some(e) = log_error {
        tracing::warn!("Logging to stderr only: {:#}", e);
    }
    Ok(())
}

/// Open the log file for appending, creating its directory
fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {:?}", dir))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join(util::LOG_FILE_NAME);
        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_open_log_file_reports_blocked_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let err = open_log_file(&blocker.join(util::LOG_FILE_NAME)).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to create log directory"));
    }
}
