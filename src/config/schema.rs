//! Configuration schema
//!
//! Defines the structure of the configuration file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub browsers: BrowsersConfig,
}

/// General launcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// UI language
    #[serde(default)]
    pub language: Language,

    /// What the window does after a profile was launched
    #[serde(default)]
    pub behavior_after_launch: BehaviorAfterLaunch,

    /// Number of launches kept in history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            behavior_after_launch: BehaviorAfterLaunch::default(),
            history_limit: default_history_limit(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ja];

    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ja => "日本語",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorAfterLaunch {
    #[default]
    None,
    Minimize,
    Close,
}

impl BehaviorAfterLaunch {
    pub const ALL: [BehaviorAfterLaunch; 3] = [
        BehaviorAfterLaunch::None,
        BehaviorAfterLaunch::Minimize,
        BehaviorAfterLaunch::Close,
    ];
}

/// Main window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default = "default_height")]
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Icon server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the icon server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Port (0 = pick a free port)
    #[serde(default)]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: 0,
        }
    }
}

/// Per-browser launch settings, keyed by browser id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowsersConfig {
    /// Extra arguments passed on every launch
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Executable overrides, e.g. `chrome = "/opt/google/chrome/chrome"`
    #[serde(default)]
    pub paths: BTreeMap<String, String>,
}

// Default value functions for serde
fn default_history_limit() -> usize {
    20
}
fn default_title() -> String {
    "Browser Profile Launcher".to_string()
}
fn default_width() -> f32 {
    420.0
}
fn default_height() -> f32 {
    580.0
}
fn default_bind() -> String {
    "127.0.0.1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [general]
            behavior_after_launch = "close"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.general.behavior_after_launch,
            BehaviorAfterLaunch::Close
        );
        assert_eq!(config.general.language, Language::En);
        assert_eq!(config.general.history_limit, 20);
        assert_eq!(config.window.width, 420.0);
        assert_eq!(config.window.height, 580.0);
        assert_eq!(config.server.bind, "127.0.0.1");
    }

    #[test]
    fn test_browser_overrides() {
        let config: Config = toml::from_str(
            r#"
            [browsers]
            extra_args = ["--new-window"]

            [browsers.paths]
            chrome = "/opt/google/chrome/chrome"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.browsers.paths.get("chrome").map(String::as_str),
            Some("/opt/google/chrome/chrome")
        );
        assert_eq!(config.browsers.extra_args, vec!["--new-window"]);
    }
}
