//! Launch history
//!
//! Recently launched profiles, most recent first.

use crate::core::profile::ProfileKey;
use crate::util;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const HISTORY_FILE: &str = "history.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub key: ProfileKey,
    pub launched_at: DateTime<Utc>,
}

/// Stored history data
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HistoryData {
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
}

impl HistoryData {
    /// Move `key` to the front, dropping the oldest entries beyond `limit`
    pub fn push(&mut self, key: ProfileKey, at: DateTime<Utc>, limit: usize) {
        self.entries.retain(|e| e.key != key);
        self.entries.insert(
            0,
            HistoryEntry {
                key,
                launched_at: at,
            },
        );
        self.entries.truncate(limit);
    }
}

/// Persistent launch history
pub struct HistoryManager {
    path: PathBuf,
    limit: usize,
    data: HistoryData,
}

impl HistoryManager {
    /// Load history from the config directory
    pub fn new(limit: usize) -> Result<Self> {
        Self::with_path(crate::config::config_dir().join(HISTORY_FILE), limit)
    }

    pub fn with_path(path: impl Into<PathBuf>, limit: usize) -> Result<Self> {
        let path = path.into();
        let mut data: HistoryData = util::read_json(&path)?;
        data.entries.truncate(limit);
        Ok(Self { path, limit, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.data.entries
    }

    /// Profile keys, most recent first
    pub fn keys(&self) -> Vec<ProfileKey> {
        self.data.entries.iter().map(|e| e.key.clone()).collect()
    }

    /// Record a launch and persist it
    pub fn record(&mut self, key: ProfileKey) -> Result<()> {
        tracing::debug!("Recording launch of {}", key);
        self.data.push(key, Utc::now(), self.limit);
        self.save()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.data.entries.clear();
        self.save()
    }

    fn save(&self) -> Result<()> {
        util::write_json(&self.path, &self.data)
    }
}
