//! Profile registry
//!
//! In-memory, ordered list of discovered profiles shared by the GUI and the icon server.

use super::profile::{self, Profile};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Arc<RwLock<Vec<Profile>>>,
}

impl ProfileRegistry {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Arc::new(RwLock::new(profiles)),
        }
    }

    /// Build a registry from the profiles installed on this machine
    pub fn discover() -> Self {
        Self::new(profile::discover())
    }

    /// Snapshot of all profiles in discovery order
    pub fn list(&self) -> Vec<Profile> {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the whole list, e.g. after re-running discovery
    pub fn replace(&self, profiles: Vec<Profile>) {
        let mut guard = self
            .profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = profiles;
    }

    /// First profile matching `(browser, directory)`
    pub fn find(&self, browser: &str, directory: &str) -> Option<Profile> {
        self.with_profiles(|profiles| {
            profiles
                .iter()
                .find(|p| p.matches(browser, directory))
                .cloned()
        })
    }

    /// Run `f` against the current list without cloning it
    pub fn with_profiles<T>(&self, f: impl FnOnce(&[Profile]) -> T) -> T {
        let guard = self.profiles.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn len(&self) -> usize {
        self.with_profiles(|profiles| profiles.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::Browser;
    use std::path::PathBuf;

    fn profile(browser: Browser, directory: &str, name: &str) -> Profile {
        Profile {
            browser,
            directory: directory.to_string(),
            name: name.to_string(),
            ico_path: None,
            user_data_dir: PathBuf::from("/data"),
        }
    }

    #[test]
    fn test_find_first_match() {
        let registry = ProfileRegistry::new(vec![
            profile(Browser::Chrome, "Default", "first"),
            profile(Browser::Edge, "Default", "edge"),
            profile(Browser::Chrome, "Default", "duplicate"),
        ]);

        assert_eq!(registry.find("chrome", "Default").unwrap().name, "first");
        assert_eq!(registry.find("edge", "Default").unwrap().name, "edge");
        assert!(registry.find("brave", "Default").is_none());
    }

    #[test]
    fn test_replace_is_visible_to_clones() {
        let registry = ProfileRegistry::default();
        let shared = registry.clone();
        assert!(shared.is_empty());

        registry.replace(vec![profile(Browser::Brave, "Profile 1", "b")]);
        assert_eq!(shared.len(), 1);
        assert_eq!(shared.list()[0].directory, "Profile 1");
    }
}
