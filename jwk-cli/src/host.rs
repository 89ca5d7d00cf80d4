//! Resource lifecycle host
//!
//! Drives the provider the way an infrastructure-as-code engine would: plans
//! are applied as create or update depending on recorded state, and every
//! change is written back to the state file.

use crate::error::{Error, Result};
use jwk_provider::{Diagnostics, JwkProvider, ProviderConfig, ProviderSchema, ResourceState, StateStore};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What a lifecycle command did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Created,
    Updated,
    Read,
    Deleted,
    Imported,
}

/// Result of a lifecycle command on one resource instance
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleOutcome {
    pub address: String,
    pub action: Action,
    pub attributes: Value,
    /// Reported separately in the output envelope
    #[serde(skip)]
    pub diagnostics: Diagnostics,
}

/// Provider plus the state file it is applied against
pub struct Host {
    provider: JwkProvider,
    state_path: PathBuf,
}

impl Host {
    /// Create a host for the given state file and optional provider block
    pub fn new(state_path: Option<PathBuf>, provider_config: Option<&Path>) -> Result<Self> {
        let state_path = match state_path {
            Some(path) => path,
            None => StateStore::default_state_path().ok_or_else(|| {
                Error::InvalidInput("Could not determine home directory for default state path".to_string())
            })?,
        };

        let provider = JwkProvider::new(ProviderConfig::default());
        if let Some(path) = provider_config {
            let config = read_json_file(path)?;
            let mut diags = Diagnostics::new();
            provider.configure(&config, &mut diags);
            if diags.has_error() {
                return Err(Error::Diagnostics(diags));
            }
        }

        debug!("Using state file {}", state_path.display());
        Ok(Self {
            provider,
            state_path,
        })
    }

    pub fn provider(&self) -> &JwkProvider {
        &self.provider
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn load_state(&self) -> Result<StateStore> {
        Ok(StateStore::load_from_path(&self.state_path)?)
    }

    pub fn schema(&self) -> ProviderSchema {
        self.provider.schema()
    }

    /// Validates a configuration without touching state
    pub async fn validate(&self, resource_type: &str, config: &Value) -> Result<Diagnostics> {
        let resource = self.provider.resource(resource_type)?;
        let mut diags = Diagnostics::new();
        resource.validate_config(config, &mut diags).await;
        finish(diags)
    }

    /// Creates the instance, or updates it when state already records one
    pub async fn apply(&self, resource_type: &str, name: &str, config: &Value) -> Result<LifecycleOutcome> {
        let resource = self.provider.resource(resource_type)?;
        let mut state = self.load_state()?;
        let mut diags = Diagnostics::new();

        let (action, attributes) = match state.get(resource_type, name) {
            Some(prior) => {
                info!("Updating {}", prior.address());
                let attributes = resource.update(&prior.attributes, config, &mut diags).await;
                (Action::Updated, attributes)
            }
            None => {
                info!("Creating {}", StateStore::address(resource_type, name));
                let attributes = resource.create(config, &mut diags).await;
                (Action::Created, attributes)
            }
        };

        let attributes = settle(attributes, diags.clone())?;
        state.upsert(resource_type, name, attributes.clone());
        state.save_to_path(&self.state_path)?;

        Ok(LifecycleOutcome {
            address: StateStore::address(resource_type, name),
            action,
            attributes,
            diagnostics: diags,
        })
    }

    /// Reads an instance back through its resource handler
    pub async fn show(&self, resource_type: &str, name: &str) -> Result<LifecycleOutcome> {
        let resource = self.provider.resource(resource_type)?;
        let state = self.load_state()?;
        let recorded = recorded(&state, resource_type, name)?;

        let mut diags = Diagnostics::new();
        let attributes = resource.read(&recorded.attributes, &mut diags).await;
        let attributes = settle(attributes, diags.clone())?;

        Ok(LifecycleOutcome {
            address: recorded.address(),
            action: Action::Read,
            attributes,
            diagnostics: diags,
        })
    }

    /// Deletes an instance and forgets it
    pub async fn destroy(&self, resource_type: &str, name: &str) -> Result<LifecycleOutcome> {
        let resource = self.provider.resource(resource_type)?;
        let mut state = self.load_state()?;
        let recorded = recorded(&state, resource_type, name)?.clone();

        let mut diags = Diagnostics::new();
        resource.delete(&recorded.attributes, &mut diags).await;
        if diags.has_error() {
            return Err(Error::Diagnostics(diags));
        }

        state.remove(resource_type, name);
        state.save_to_path(&self.state_path)?;
        info!("Destroyed {}", recorded.address());

        Ok(LifecycleOutcome {
            address: recorded.address(),
            action: Action::Deleted,
            attributes: recorded.attributes,
            diagnostics: diags,
        })
    }

    /// Brings an existing key document under management
    pub async fn import(&self, resource_type: &str, name: &str, id: &str) -> Result<LifecycleOutcome> {
        let resource = self.provider.resource(resource_type)?;
        let mut state = self.load_state()?;
        let address = StateStore::address(resource_type, name);
        if state.get(resource_type, name).is_some() {
            return Err(Error::AlreadyExists(address));
        }

        let mut diags = Diagnostics::new();
        let attributes = resource.import_state(id, &mut diags).await;
        let attributes = settle(attributes, diags.clone())?;

        state.upsert(resource_type, name, attributes.clone());
        state.save_to_path(&self.state_path)?;
        info!("Imported {}", address);

        Ok(LifecycleOutcome {
            address,
            action: Action::Imported,
            attributes,
            diagnostics: diags,
        })
    }

    /// Calls a provider function
    pub async fn call(&self, function: &str, arguments: &[String]) -> Result<String> {
        Ok(self.provider.call_function(function, arguments).await?)
    }

    /// Replaces the values of sensitive attributes for display
    pub fn redact(&self, resource_type: &str, attributes: &Value) -> Result<Value> {
        let schema = self.provider.resource(resource_type)?.schema();
        let mut redacted = attributes.clone();
        if let Value::Object(map) = &mut redacted {
            for name in schema.sensitive_attributes() {
                if let Some(value) = map.get_mut(name) {
                    if !value.is_null() {
                        *value = Value::String("(sensitive value)".to_string());
                    }
                }
            }
        }
        Ok(redacted)
    }
}

fn recorded<'a>(state: &'a StateStore, resource_type: &str, name: &str) -> Result<&'a ResourceState> {
    state
        .get(resource_type, name)
        .ok_or_else(|| Error::NotFound(StateStore::address(resource_type, name)))
}

fn finish(diags: Diagnostics) -> Result<Diagnostics> {
    for warning in diags.warnings() {
        warn!("{}", warning);
    }
    if diags.has_error() {
        return Err(Error::Diagnostics(diags));
    }
    Ok(diags)
}

fn settle(attributes: Option<Value>, diags: Diagnostics) -> Result<Value> {
    let diags = finish(diags)?;
    attributes.ok_or(Error::Diagnostics(diags))
}

/// Reads a JSON document from a file
pub fn read_json_file(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| Error::InvalidInput(format!("{} is not valid JSON: {}", path.display(), e)))
}

/// Resolves `@path` to the contents of the file, otherwise returns the value as-is
pub fn read_argument(value: &str) -> Result<String> {
    match value.strip_prefix('@') {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => Ok(value.to_string()),
    }
}
