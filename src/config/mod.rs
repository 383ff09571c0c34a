//! Configuration module
//!
//! Handles loading and saving launcher configuration.

mod schema;

pub use schema::{
    BehaviorAfterLaunch, BrowsersConfig, Config, GeneralConfig, Language, ServerConfig,
    WindowConfig,
};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the configuration directory path
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".browser-profile-launcher")
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load configuration from disk
pub fn load() -> Result<Config> {
    load_from(&config_path())
}

/// Save configuration to disk
pub fn save(config: &Config) -> Result<()> {
    save_to(&config_path(), config)
}

/// Load configuration from a specific file, writing defaults if it does not exist
pub fn load_from(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    } else {
        let config = Config::default();
        save_to(path, &config)?;
        Ok(config)
    }
}

/// Save configuration to a specific file
pub fn save_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;

    tracing::info!("Configuration saved to {:?}", path);
    Ok(())
}
