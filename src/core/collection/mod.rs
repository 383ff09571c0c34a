//! Collections
//!
//! User-defined groups of profiles, shown as extra tabs.

use crate::core::profile::ProfileKey;
use crate::util;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const COLLECTIONS_FILE: &str = "collections.json";

/// Tab names that cannot be used for collections
pub const RESERVED_NAMES: &[&str] = &["all", "history"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    #[error("Collection name is empty")]
    EmptyName,
    #[error("'{0}' is a reserved name")]
    Reserved(String),
    #[error("Collection '{0}' already exists")]
    Duplicate(String),
    #[error("Collection '{0}' does not exist")]
    NotFound(String),
}

/// Collections a single profile belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCollections {
    pub key: ProfileKey,
    #[serde(default)]
    pub collections: Vec<String>,
}

/// Stored collections data
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CollectionsData {
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub profiles: Vec<ProfileCollections>,
}

impl CollectionsData {
    pub fn add(&mut self, name: &str) -> Result<String, CollectionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CollectionError::EmptyName);
        }
        if RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(name)) {
            return Err(CollectionError::Reserved(name.to_string()));
        }
        if self.contains(name) {
            return Err(CollectionError::Duplicate(name.to_string()));
        }

        self.collections.push(name.to_string());
        Ok(name.to_string())
    }

    /// Remove a collection and drop it from every profile
    pub fn remove(&mut self, name: &str) -> Result<(), CollectionError> {
        let name = name.trim();
        if !self.contains(name) {
            return Err(CollectionError::NotFound(name.to_string()));
        }

        self.collections.retain(|c| c != name);
        for profile in &mut self.profiles {
            profile.collections.retain(|c| c != name);
        }
        self.profiles.retain(|p| !p.collections.is_empty());
        Ok(())
    }

    pub fn assign(&mut self, key: &ProfileKey, name: &str) -> Result<(), CollectionError> {
        let name = name.trim();
        if !self.contains(name) {
            return Err(CollectionError::NotFound(name.to_string()));
        }

        match self.profiles.iter_mut().find(|p| &p.key == key) {
            Some(profile) => {
                if !profile.collections.iter().any(|c| c == name) {
                    profile.collections.push(name.to_string());
                }
            }
            None => self.profiles.push(ProfileCollections {
                key: key.clone(),
                collections: vec![name.to_string()],
            }),
        }
        Ok(())
    }

    pub fn unassign(&mut self, key: &ProfileKey, name: &str) {
        let name = name.trim();
        if let Some(profile) = self.profiles.iter_mut().find(|p| &p.key == key) {
            profile.collections.retain(|c| c != name);
        }
        self.profiles.retain(|p| !p.collections.is_empty());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.collections.iter().any(|c| c == name)
    }

    /// Profile keys in a collection, in assignment order
    pub fn keys(&self, name: &str) -> Vec<ProfileKey> {
        self.profiles
            .iter()
            .filter(|p| p.collections.iter().any(|c| c == name))
            .map(|p| p.key.clone())
            .collect()
    }

    /// Collections the profile belongs to
    pub fn collections_of(&self, key: &ProfileKey) -> Vec<String> {
        self.profiles
            .iter()
            .find(|p| &p.key == key)
            .map(|p| p.collections.clone())
            .unwrap_or_default()
    }
}

/// Persistent collection store
pub struct CollectionManager {
    path: PathBuf,
    data: CollectionsData,
}

impl CollectionManager {
    /// Load collections from the config directory
    pub fn new() -> Result<Self> {
        Self::with_path(crate::config::config_dir().join(COLLECTIONS_FILE))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = util::read_json(&path)?;
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &CollectionsData {
        &self.data
    }

    pub fn names(&self) -> &[String] {
        &self.data.collections
    }

    pub fn add(&mut self, name: &str) -> Result<String> {
        let name = self.data.add(name)?;
        self.save()?;
        tracing::info!("Added collection '{}'", name);
        Ok(name)
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        self.data.remove(name)?;
        self.save()?;
        tracing::info!("Removed collection '{}'", name);
        Ok(())
    }

    pub fn assign(&mut self, key: &ProfileKey, name: &str) -> Result<()> {
        self.data.assign(key, name)?;
        self.save()
    }

    pub fn unassign(&mut self, key: &ProfileKey, name: &str) -> Result<()> {
        self.data.unassign(key, name);
        self.save()
    }

    fn save(&self) -> Result<()> {
        util::write_json(&self.path, &self.data)
    }
}
