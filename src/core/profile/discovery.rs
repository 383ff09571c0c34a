//! Profile discovery
//!
//! Reads each browser's `Local State` to enumerate its profiles.

use super::{Browser, Profile};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const LOCAL_STATE_FILE: &str = "Local State";
const PREFERENCES_FILE: &str = "Preferences";

#[derive(Debug, Default, Deserialize)]
struct LocalState {
    #[serde(default)]
    profile: ProfileSection,
}

#[derive(Debug, Default, Deserialize)]
struct ProfileSection {
    #[serde(default)]
    info_cache: BTreeMap<String, InfoCacheEntry>,
    #[serde(default)]
    profiles_order: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct InfoCacheEntry {
    #[serde(default)]
    name: String,
}

/// Discover profiles of every installed browser
pub fn discover() -> Vec<Profile> {
    let roots: Vec<(Browser, PathBuf)> = Browser::ALL
        .into_iter()
        .filter_map(|browser| {
            let user_data_dir = browser.user_data_dir()?;
            if user_data_dir.is_dir() {
                Some((browser, user_data_dir))
            } else {
                tracing::debug!("{} not installed ({:?})", browser, user_data_dir);
                None
            }
        })
        .collect();

    discover_in(&roots)
}

/// Discover profiles under the given browser user data directories
///
/// A root that cannot be read or parsed is logged and skipped.
pub fn discover_in(roots: &[(Browser, PathBuf)]) -> Vec<Profile> {
    let mut profiles = Vec::new();

    for (browser, user_data_dir) in roots {
        match discover_browser(*browser, user_data_dir) {
            Ok(found) => {
                tracing::info!("Found {} profile(s) for {}", found.len(), browser);
                profiles.extend(found);
            }
            Err(e) => tracing::warn!("Skipping {}: {:#}", browser, e),
        }
    }

    profiles
}

/// Discover the profiles of one browser in the given user data directory
pub fn discover_browser(browser: Browser, user_data_dir: &Path) -> Result<Vec<Profile>> {
    let entries = match read_local_state(user_data_dir) {
        Ok(entries) if !entries.is_empty() => entries,
        Ok(_) => scan_profile_dirs(user_data_dir)?,
        Err(e) => {
            tracing::debug!("Falling back to directory scan for {}: {:#}", browser, e);
            scan_profile_dirs(user_data_dir)?
        }
    };

    Ok(entries
        .into_iter()
        .map(|(directory, name)| {
            let profile_dir = user_data_dir.join(&directory);
            Profile {
                browser,
                ico_path: find_icon(browser, &profile_dir),
                name: if name.is_empty() {
                    directory.clone()
                } else {
                    name
                },
                directory,
                user_data_dir: user_data_dir.to_path_buf(),
            }
        })
        .collect())
}

/// Returns `(directory, name)` pairs in the browser's own profile order
fn read_local_state(user_data_dir: &Path) -> Result<Vec<(String, String)>> {
    let path = user_data_dir.join(LOCAL_STATE_FILE);
    let content =
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
    let state: LocalState =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))?;

    let mut cache = state.profile.info_cache;
    let mut entries = Vec::with_capacity(cache.len());

    for directory in state.profile.profiles_order {
        if let Some(entry) = cache.remove(&directory) {
            entries.push((directory, entry.name));
        }
    }
    entries.extend(cache.into_iter().map(|(dir, entry)| (dir, entry.name)));

    Ok(entries)
}

/// `Default` and `Profile *` directories holding a `Preferences` file
fn scan_profile_dirs(user_data_dir: &Path) -> Result<Vec<(String, String)>> {
    let mut dirs = Vec::new();

    for entry in std::fs::read_dir(user_data_dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if (name == "Default" || name.starts_with("Profile "))
            && path.join(PREFERENCES_FILE).is_file()
        {
            dirs.push(name.to_string());
        }
    }

    dirs.sort();
    Ok(dirs.into_iter().map(|dir| (dir, String::new())).collect())
}

fn find_icon(browser: Browser, profile_dir: &Path) -> Option<PathBuf> {
    let preferred = profile_dir.join(browser.icon_file_name());
    if preferred.is_file() {
        return Some(preferred);
    }

    let pattern = format!(
        "{}/* Profile.ico",
        glob::Pattern::escape(&profile_dir.to_string_lossy())
    );
    glob::glob(&pattern)
        .ok()?
        .filter_map(Result::ok)
        .find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_local_state_order_and_names() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join(LOCAL_STATE_FILE),
            r#"{
                "profile": {
                    "info_cache": {
                        "Default": { "name": "Personal" },
                        "Profile 1": { "name": "Work" },
                        "Profile 3": { "name": "" }
                    },
                    "profiles_order": ["Profile 1", "Default", "Profile 9"]
                }
            }"#,
        );
        write(&dir.path().join("Profile 1").join("Google Profile.ico"), "ico");

        let profiles = discover_browser(Browser::Chrome, dir.path()).unwrap();
        let dirs: Vec<&str> = profiles.iter().map(|p| p.directory.as_str()).collect();
        assert_eq!(dirs, vec!["Profile 1", "Default", "Profile 3"]);

        assert_eq!(profiles[0].name, "Work");
        assert_eq!(
            profiles[0].ico_path,
            Some(dir.path().join("Profile 1").join("Google Profile.ico"))
        );
        assert_eq!(profiles[1].ico_path, None);
        // Empty names fall back to the directory
        assert_eq!(profiles[2].name, "Profile 3");
    }

    #[test]
    fn test_fallback_scan_without_local_state() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("Default").join(PREFERENCES_FILE), "{}");
        write(&dir.path().join("Profile 2").join(PREFERENCES_FILE), "{}");
        write(&dir.path().join("System Profile").join(PREFERENCES_FILE), "{}");
        std::fs::create_dir_all(dir.path().join("Profile 5")).unwrap();

        let profiles = discover_browser(Browser::Brave, dir.path()).unwrap();
        let dirs: Vec<&str> = profiles.iter().map(|p| p.directory.as_str()).collect();
        assert_eq!(dirs, vec!["Default", "Profile 2"]);
        assert!(profiles.iter().all(|p| p.browser == Browser::Brave));
    }

    #[test]
    fn test_broken_local_state_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join(LOCAL_STATE_FILE), "not json");
        write(&dir.path().join("Default").join(PREFERENCES_FILE), "{}");

        let profiles = discover_browser(Browser::Edge, dir.path()).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "Default");
    }

    #[test]
    fn test_unreadable_root_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("chrome-data");
        write(&not_a_dir, "plain file");
        let edge = dir.path().join("edge-data");
        write(&edge.join("Default").join(PREFERENCES_FILE), "{}");

        let profiles = discover_in(&[(Browser::Chrome, not_a_dir), (Browser::Edge, edge)]);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].browser, Browser::Edge);
        assert_eq!(profiles[0].directory, "Default");
    }

    #[test]
    fn test_icon_glob_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let profile_dir = dir.path().join("Profile [1]");
        write(&profile_dir.join("Other Profile.ico"), "ico");

        assert_eq!(
            find_icon(Browser::Vivaldi, &profile_dir),
            Some(profile_dir.join("Other Profile.ico"))
        );
    }
}
