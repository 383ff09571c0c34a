//! Profile icon lookup
//!
//! Maps a `(browser, directory)` pair to the bytes of the profile's icon file.

use super::profile::{Profile, ProfileKey};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("No profile for browser '{browser}' and directory '{directory}'")]
    UnknownProfile { browser: String, directory: String },

    #[error("Profile {0} has no icon")]
    NoIcon(ProfileKey),

    #[error("Could not read icon {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Icon path of the first profile matching `(browser, directory)`
pub fn find_icon_path<'a>(
    profiles: &'a [Profile],
    browser: &str,
    directory: &str,
) -> Result<&'a Path, IconError> {
    let profile = profiles
        .iter()
        .find(|p| p.matches(browser, directory))
        .ok_or_else(|| IconError::UnknownProfile {
            browser: browser.to_string(),
            directory: directory.to_string(),
        })?;

    profile
        .ico_path
        .as_deref()
        .ok_or_else(|| IconError::NoIcon(profile.key()))
}

/// Read the icon file of the profile matching `(browser, directory)`
pub fn load(profiles: &[Profile], browser: &str, directory: &str) -> Result<Vec<u8>, IconError> {
    let path = find_icon_path(profiles, browser, directory)?;
    std::fs::read(path).map_err(|source| IconError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::Browser;

    fn profile(directory: &str, ico_path: Option<PathBuf>) -> Profile {
        Profile {
            browser: Browser::Chrome,
            directory: directory.to_string(),
            name: directory.to_string(),
            ico_path,
            user_data_dir: PathBuf::from("/data"),
        }
    }

    #[test]
    fn test_load_returns_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let ico = dir.path().join("Google Profile.ico");
        std::fs::write(&ico, [0u8, 0, 1, 0, 42]).unwrap();

        let profiles = vec![profile("Default", None), profile("Profile 1", Some(ico))];
        let bytes = load(&profiles, "chrome", "Profile 1").unwrap();
        assert_eq!(bytes, vec![0u8, 0, 1, 0, 42]);
    }

    #[test]
    fn test_unknown_pair() {
        let profiles = vec![profile("Default", None)];
        let err = load(&profiles, "edge", "Default").unwrap_err();
        assert!(matches!(err, IconError::UnknownProfile { .. }));
    }

    #[test]
    fn test_profile_without_icon() {
        let profiles = vec![profile("Default", None)];
        let err = load(&profiles, "chrome", "Default").unwrap_err();
        assert!(matches!(err, IconError::NoIcon(_)));
    }

    #[test]
    fn test_unreadable_icon() {
        let profiles = vec![profile("Default", Some(PathBuf::from("/nonexistent/x.ico")))];
        let err = load(&profiles, "chrome", "Default").unwrap_err();
        assert!(matches!(err, IconError::Read { .. }));
    }
}
