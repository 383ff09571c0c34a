//! Launch module
//!
//! Start a browser with the selected profile directory.

use crate::config::BrowsersConfig;
use crate::core::profile::{Browser, Profile};
use crate::core::registry::ProfileRegistry;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("No profile for browser '{browser}' and directory '{directory}'")]
    UnknownProfile { browser: String, directory: String },

    #[error("{} executable not found", .0.display_name())]
    ExecutableNotFound(Browser),

    #[error("Failed to start {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Look up `(browser, directory)` in the registry and launch it
pub fn run(
    registry: &ProfileRegistry,
    browser: &str,
    directory: &str,
    config: &BrowsersConfig,
) -> Result<u32, LaunchError> {
    let profile = registry
        .find(browser, directory)
        .ok_or_else(|| LaunchError::UnknownProfile {
            browser: browser.to_string(),
            directory: directory.to_string(),
        })?;

    launch(&profile, config)
}

/// Launch the browser owning `profile`, returning the process id
pub fn launch(profile: &Profile, config: &BrowsersConfig) -> Result<u32, LaunchError> {
    let exe = find_executable(profile.browser, config)
        .ok_or(LaunchError::ExecutableNotFound(profile.browser))?;

    let mut cmd = build_command(&exe, profile, &config.extra_args);
    tracing::info!("Launching {}: {:?}", profile.key(), cmd);

    let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
        path: exe.clone(),
        source,
    })?;
    let pid = child.id();

    // Reap the process so a browser that hands off to a running instance does not linger
    std::thread::spawn(move || {
        let _ = child.wait();
    });

    Ok(pid)
}

/// Build the browser command line for a profile
pub fn build_command(exe: &Path, profile: &Profile, extra_args: &[String]) -> Command {
    let mut cmd = Command::new(exe);
    cmd.arg(format!("--profile-directory={}", profile.directory));
    cmd.args(extra_args);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

/// Find the browser executable: configured path first, then well-known locations
pub fn find_executable(browser: Browser, config: &BrowsersConfig) -> Option<PathBuf> {
    if let Some(path) = config.paths.get(browser.id()) {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Some(path);
        }
        tracing::warn!(
            "Configured path for {} does not exist: {:?}",
            browser,
            path
        );
    }

    candidates(browser).into_iter().find(|p| p.is_file())
}

#[cfg(target_os = "windows")]
fn candidates(browser: Browser) -> Vec<PathBuf> {
    let relative = match browser {
        Browser::Chrome => r"Google\Chrome\Application\chrome.exe",
        Browser::ChromeBeta => r"Google\Chrome Beta\Application\chrome.exe",
        Browser::ChromeCanary => r"Google\Chrome SxS\Application\chrome.exe",
        Browser::Chromium => r"Chromium\Application\chrome.exe",
        Browser::Edge => r"Microsoft\Edge\Application\msedge.exe",
        Browser::Brave => r"BraveSoftware\Brave-Browser\Application\brave.exe",
        Browser::Vivaldi => r"Vivaldi\Application\vivaldi.exe",
    };

    ["PROGRAMFILES", "PROGRAMFILES(X86)", "LOCALAPPDATA"]
        .iter()
        .filter_map(|var| std::env::var_os(var))
        .map(|root| PathBuf::from(root).join(relative))
        .collect()
}

#[cfg(target_os = "macos")]
fn candidates(browser: Browser) -> Vec<PathBuf> {
    let bundle = match browser {
        Browser::Chrome => "Google Chrome.app/Contents/MacOS/Google Chrome",
        Browser::ChromeBeta => "Google Chrome Beta.app/Contents/MacOS/Google Chrome Beta",
        Browser::ChromeCanary => "Google Chrome Canary.app/Contents/MacOS/Google Chrome Canary",
        Browser::Chromium => "Chromium.app/Contents/MacOS/Chromium",
        Browser::Edge => "Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        Browser::Brave => "Brave Browser.app/Contents/MacOS/Brave Browser",
        Browser::Vivaldi => "Vivaldi.app/Contents/MacOS/Vivaldi",
    };

    let mut roots = vec![PathBuf::from("/Applications")];
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join("Applications"));
    }
    roots.into_iter().map(|root| root.join(bundle)).collect()
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn candidates(browser: Browser) -> Vec<PathBuf> {
    let names: &[&str] = match browser {
        Browser::Chrome => &["google-chrome", "google-chrome-stable"],
        Browser::ChromeBeta => &["google-chrome-beta"],
        Browser::ChromeCanary => &["google-chrome-unstable"],
        Browser::Chromium => &["chromium", "chromium-browser"],
        Browser::Edge => &["microsoft-edge", "microsoft-edge-stable"],
        Browser::Brave => &["brave-browser", "brave"],
        Browser::Vivaldi => &["vivaldi", "vivaldi-stable"],
    };

    let Some(path_var) = std::env::var_os("PATH") else {
        return Vec::new();
    };
    let search_dirs: Vec<PathBuf> = std::env::split_paths(&path_var).collect();

    names
        .iter()
        .flat_map(|name| search_dirs.iter().map(move |dir| dir.join(name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(directory: &str) -> Profile {
        Profile {
            browser: Browser::Chrome,
            directory: directory.to_string(),
            name: directory.to_string(),
            ico_path: None,
            user_data_dir: PathBuf::from("/data"),
        }
    }

    #[test]
    fn test_command_line() {
        let cmd = build_command(
            Path::new("/usr/bin/google-chrome"),
            &profile("Profile 3"),
            &["--new-window".to_string()],
        );

        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["--profile-directory=Profile 3", "--new-window"]);
        assert_eq!(cmd.get_program(), "/usr/bin/google-chrome");
    }

    #[test]
    fn test_configured_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("my-chrome");
        std::fs::write(&exe, "").unwrap();

        let mut config = BrowsersConfig::default();
        config
            .paths
            .insert("chrome".to_string(), exe.to_string_lossy().into_owned());

        assert_eq!(find_executable(Browser::Chrome, &config), Some(exe));
    }

    #[test]
    fn test_unknown_profile() {
        let registry = ProfileRegistry::new(vec![profile("Default")]);
        let err = run(&registry, "chrome", "Profile 7", &BrowsersConfig::default()).unwrap_err();
        assert!(matches!(err, LaunchError::UnknownProfile { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_failure_is_reported() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("not-executable");
        std::fs::write(&exe, "").unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o644)).unwrap();

        let mut config = BrowsersConfig::default();
        config
            .paths
            .insert("chrome".to_string(), exe.to_string_lossy().into_owned());

        let err = launch(&profile("Default"), &config).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }
}
