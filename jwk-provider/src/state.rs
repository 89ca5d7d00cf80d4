//! Local resource state
//!
//! Persists the attributes of every applied resource instance to a JSON file
//! so that later runs can read, update, destroy or import against it.

use crate::error::{Error, Result};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default directory for provider state
pub const DEFAULT_JWK_DIR: &str = ".jwk";
/// Default filename for the state file
pub const DEFAULT_STATE_FILE: &str = "state.json";

/// Recorded attributes of one resource instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Resource type name, e.g. `jwk_rsa_key`
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Instance name chosen by the user
    pub name: String,
    /// Configuration and computed attributes
    pub attributes: Value,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default = "chrono::Utc::now")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ResourceState {
    /// Address of this instance, `type.name`
    pub fn address(&self) -> String {
        StateStore::address(&self.resource_type, &self.name)
    }
}

/// All resource instances managed from one state file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateStore {
    /// Incremented every time the state is written
    #[serde(default)]
    pub serial: u64,
    /// Instances keyed by address
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceState>,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default = "chrono::Utc::now")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Default for StateStore {
    fn default() -> Self {
        let now = chrono::Utc::now();
        Self {
            serial: 0,
            resources: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl StateStore {
    /// Create a new empty state
    pub fn new() -> Self {
        Default::default()
    }

    pub fn address(resource_type: &str, name: &str) -> String {
        format!("{}.{}", resource_type, name)
    }

    pub fn get(&self, resource_type: &str, name: &str) -> Option<&ResourceState> {
        self.resources.get(&Self::address(resource_type, name))
    }

    /// Records the attributes of an instance, keeping its creation time
    pub fn upsert(&mut self, resource_type: &str, name: &str, attributes: Value) {
        let now = chrono::Utc::now();
        let address = Self::address(resource_type, name);
        match self.resources.get_mut(&address) {
            Some(existing) => {
                existing.attributes = attributes;
                existing.updated_at = now;
            }
            None => {
                self.resources.insert(
                    address,
                    ResourceState {
                        resource_type: resource_type.to_string(),
                        name: name.to_string(),
                        attributes,
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }
        self.updated_at = now;
    }

    /// Forgets an instance, returning what was recorded for it
    pub fn remove(&mut self, resource_type: &str, name: &str) -> Option<ResourceState> {
        let removed = self.resources.remove(&Self::address(resource_type, name));
        if removed.is_some() {
            self.updated_at = chrono::Utc::now();
        }
        removed
    }

    /// Instances in address order
    pub fn list(&self) -> impl Iterator<Item = &ResourceState> {
        self.resources.values()
    }

    /// Get the default state path
    pub fn default_state_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(DEFAULT_JWK_DIR).join(DEFAULT_STATE_FILE))
    }

    /// Load state from the default location
    pub fn load_default() -> Result<Self> {
        let path = Self::default_state_path().ok_or_else(|| {
            Error::State("Could not determine home directory for default state path".to_string())
        })?;
        Self::load_from_path(&path)
    }

    /// Load state from a specific path, or start empty if the file is missing
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No state file at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| Error::State(format!("Failed to read state file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| Error::State(format!("Failed to parse state file: {}", e)))
    }

    /// Save state to a specific path, creating parent directories as needed
    pub fn save_to_path(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::State(format!("Failed to create state directory: {}", e))
                })?;
            }
        }

        self.serial += 1;
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::State(format!("Failed to serialize state: {}", e)))?;

        fs::write(path, contents)
            .map_err(|e| Error::State(format!("Failed to write state file: {}", e)))?;

        debug!("Saved state serial {} to {}", self.serial, path.display());
        Ok(())
    }
}
