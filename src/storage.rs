//! Persisted state: one versionless TOML document holding the preferences
//! table and the server list. Absent fields default on load; flat keys left
//! behind by old releases live at the document root until the preferences
//! loader migrates them away.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellError};
use crate::preferences::Preferences;
use crate::server::Server;

const STORAGE_DIR: &str = "hubshell";
const STORAGE_FILE: &str = "storage.toml";

/// On-disk layout. Legacy keys are declared first so TOML serialization
/// emits them before the tables (they are only ever written back as absent).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageDocument {
    // Flat keys from the old single-value layout, read once then deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_tray: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autohide_menu: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_window_on_unread_changed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
}

/// File-backed storage in the platform config directory, with a path
/// override for tests.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new() -> Result<Self> {
        let config_dir = BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(STORAGE_DIR))
            .ok_or_else(|| ShellError::Storage("could not determine config directory".to_string()))?;
        Ok(Self {
            path: config_dir.join(STORAGE_FILE),
        })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole document. A missing, unreadable, or malformed file
    /// degrades to the empty document; the cause is logged.
    pub fn load(&self) -> StorageDocument {
        if !self.path.exists() {
            tracing::debug!("no storage file, starting from defaults");
            return StorageDocument::default();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(document) => document,
                Err(err) => {
                    tracing::warn!("failed to parse {}: {}", self.path.display(), err);
                    StorageDocument::default()
                }
            },
            Err(err) => {
                tracing::warn!("failed to read {}: {}", self.path.display(), err);
                StorageDocument::default()
            }
        }
    }

    pub fn save(&self, document: &StorageDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    ShellError::Storage(format!("failed to create config dir: {err}"))
                })?;
            }
        }

        let content = toml::to_string_pretty(document)
            .map_err(|err| ShellError::Storage(format!("failed to serialize storage: {err}")))?;
        std::fs::write(&self.path, content)
            .map_err(|err| ShellError::Storage(format!("failed to write storage: {err}")))?;
        Ok(())
    }

    pub fn load_servers(&self) -> Vec<Server> {
        self.load().servers
    }

    /// Rewrite only the server list, keeping the rest of the document.
    pub fn save_servers(&self, servers: &[Server]) -> Result<()> {
        let mut document = self.load();
        document.servers = servers.to_vec();
        self.save(&document)
    }
}
