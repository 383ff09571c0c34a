//! Profile module
//!
//! Browser profiles and their discovery.

mod browser;
mod discovery;

pub use browser::Browser;
pub use discovery::{discover, discover_browser, discover_in};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One launchable browser profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub browser: Browser,
    /// Profile directory name inside the user data dir, e.g. `Profile 1`
    pub directory: String,
    /// Name shown by the browser for this profile
    pub name: String,
    pub ico_path: Option<PathBuf>,
    pub user_data_dir: PathBuf,
}

impl Profile {
    pub fn key(&self) -> ProfileKey {
        ProfileKey::new(self.browser, &self.directory)
    }

    /// Full path of the profile directory
    pub fn path(&self) -> PathBuf {
        self.user_data_dir.join(&self.directory)
    }

    pub fn matches(&self, browser: &str, directory: &str) -> bool {
        self.browser.id() == browser && self.directory == directory
    }
}

/// Identifies a profile across runs
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileKey {
    pub browser: Browser,
    pub directory: String,
}

impl ProfileKey {
    pub fn new(browser: Browser, directory: impl Into<String>) -> Self {
        Self {
            browser,
            directory: directory.into(),
        }
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.browser, self.directory)
    }
}

impl FromStr for ProfileKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (browser, directory) = s
            .split_once('/')
            .ok_or_else(|| anyhow::anyhow!("Expected <browser>/<directory>, got '{}'", s))?;
        if directory.is_empty() {
            anyhow::bail!("Profile directory is empty in '{}'", s);
        }
        Ok(Self::new(browser.parse()?, directory))
    }
}
