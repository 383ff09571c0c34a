//! Known browsers
//!
//! Chromium-family browsers whose profiles can be discovered and launched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Browser {
    Chrome,
    ChromeBeta,
    ChromeCanary,
    Chromium,
    Edge,
    Brave,
    Vivaldi,
}

impl Browser {
    /// All known browsers, in display order
    pub const ALL: [Browser; 7] = [
        Browser::Chrome,
        Browser::ChromeBeta,
        Browser::ChromeCanary,
        Browser::Chromium,
        Browser::Edge,
        Browser::Brave,
        Browser::Vivaldi,
    ];

    /// Stable identifier used in query strings, config keys and CLI arguments
    pub fn id(self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::ChromeBeta => "chrome-beta",
            Browser::ChromeCanary => "chrome-canary",
            Browser::Chromium => "chromium",
            Browser::Edge => "edge",
            Browser::Brave => "brave",
            Browser::Vivaldi => "vivaldi",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Browser::Chrome => "Google Chrome",
            Browser::ChromeBeta => "Google Chrome Beta",
            Browser::ChromeCanary => "Google Chrome Canary",
            Browser::Chromium => "Chromium",
            Browser::Edge => "Microsoft Edge",
            Browser::Brave => "Brave",
            Browser::Vivaldi => "Vivaldi",
        }
    }

    /// File name of the profile badge icon the browser writes into each profile directory
    pub fn icon_file_name(self) -> &'static str {
        match self {
            Browser::Chrome | Browser::ChromeBeta | Browser::ChromeCanary | Browser::Chromium => {
                "Google Profile.ico"
            }
            Browser::Edge => "Edge Profile.ico",
            Browser::Brave => "Brave Profile.ico",
            Browser::Vivaldi => "Vivaldi Profile.ico",
        }
    }

    /// Default user data directory on this OS
    pub fn user_data_dir(self) -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        let base = dirs::data_local_dir();
        #[cfg(not(target_os = "windows"))]
        let base = dirs::config_dir();

        base.map(|base| {
            self.user_data_segments()
                .iter()
                .fold(base, |path, segment| path.join(segment))
        })
    }

    #[cfg(target_os = "windows")]
    fn user_data_segments(self) -> &'static [&'static str] {
        match self {
            Browser::Chrome => &["Google", "Chrome", "User Data"],
            Browser::ChromeBeta => &["Google", "Chrome Beta", "User Data"],
            Browser::ChromeCanary => &["Google", "Chrome SxS", "User Data"],
            Browser::Chromium => &["Chromium", "User Data"],
            Browser::Edge => &["Microsoft", "Edge", "User Data"],
            Browser::Brave => &["BraveSoftware", "Brave-Browser", "User Data"],
            Browser::Vivaldi => &["Vivaldi", "User Data"],
        }
    }

    #[cfg(target_os = "macos")]
    fn user_data_segments(self) -> &'static [&'static str] {
        match self {
            Browser::Chrome => &["Google", "Chrome"],
            Browser::ChromeBeta => &["Google", "Chrome Beta"],
            Browser::ChromeCanary => &["Google", "Chrome Canary"],
            Browser::Chromium => &["Chromium"],
            Browser::Edge => &["Microsoft Edge"],
            Browser::Brave => &["BraveSoftware", "Brave-Browser"],
            Browser::Vivaldi => &["Vivaldi"],
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    fn user_data_segments(self) -> &'static [&'static str] {
        match self {
            Browser::Chrome => &["google-chrome"],
            Browser::ChromeBeta => &["google-chrome-beta"],
            Browser::ChromeCanary => &["google-chrome-unstable"],
            Browser::Chromium => &["chromium"],
            Browser::Edge => &["microsoft-edge"],
            Browser::Brave => &["BraveSoftware", "Brave-Browser"],
            Browser::Vivaldi => &["vivaldi"],
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Browser {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Browser::ALL
            .into_iter()
            .find(|b| b.id() == needle)
            .ok_or_else(|| {
                let known: Vec<&str> = Browser::ALL.iter().map(|b| b.id()).collect();
                anyhow::anyhow!("Unknown browser: {}. Use one of: {}", s, known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_browser_ids() {
        for browser in Browser::ALL {
            assert_eq!(browser.id().parse::<Browser>().unwrap(), browser);
        }
        assert_eq!(" Chrome ".parse::<Browser>().unwrap(), Browser::Chrome);
        assert!("firefox".parse::<Browser>().is_err());
    }

    #[test]
    fn test_serde_id_matches() {
        let json = serde_json::to_string(&Browser::ChromeBeta).unwrap();
        assert_eq!(json, "\"chrome-beta\"");
    }

    #[test]
    fn test_user_data_dir_is_browser_specific() {
        if let (Some(chrome), Some(edge)) = (
            Browser::Chrome.user_data_dir(),
            Browser::Edge.user_data_dir(),
        ) {
            assert_ne!(chrome, edge);
        }
    }
}
