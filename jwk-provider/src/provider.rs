//! Provider registration
//!
//! [`JwkProvider`] declares which resource types and functions exist and
//! routes lifecycle calls to them by name.

use crate::config::ProviderConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::functions::{Function, PublicKeyFunction, ToPemFunction};
use crate::resources::{
    EcKeyResource, KeysetResource, OctKeyResource, OkpKeyResource, Resource, RsaKeyResource,
};
use crate::schema::{FunctionDefinition, Schema};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};
use tracing::{debug, error, info};

/// Provider type name, the prefix of every resource type
pub const PROVIDER_TYPE_NAME: &str = "jwk";

/// Complete schema of the provider, its resources and functions
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSchema {
    pub type_name: String,
    pub version: String,
    pub provider: Schema,
    pub resources: BTreeMap<String, Schema>,
    pub functions: BTreeMap<String, FunctionDefinition>,
}

/// Registry for all resource types and functions of the provider
pub struct JwkProvider {
    config: Arc<RwLock<ProviderConfig>>,
    resources: HashMap<String, Box<dyn Resource>>,
    functions: HashMap<String, Box<dyn Function>>,
}

impl JwkProvider {
    /// Create a new provider with all resources and functions registered
    pub fn new(config: ProviderConfig) -> Self {
        let config = Arc::new(RwLock::new(config));

        let resources: Vec<Box<dyn Resource>> = vec![
            Box::new(RsaKeyResource::new()),
            Box::new(EcKeyResource::new()),
            Box::new(OctKeyResource::new()),
            Box::new(OkpKeyResource::new()),
            Box::new(KeysetResource::new(config.clone())),
        ];
        let functions: Vec<Box<dyn Function>> = vec![
            Box::new(PublicKeyFunction::new()),
            Box::new(ToPemFunction::new()),
        ];

        let resources: HashMap<_, _> = resources
            .into_iter()
            .map(|r| (r.type_name().to_string(), r))
            .collect();
        let functions: HashMap<_, _> = functions
            .into_iter()
            .map(|f| (f.name().to_string(), f))
            .collect();

        debug!(
            "Initialized provider with {} resources and {} functions",
            resources.len(),
            functions.len()
        );

        Self {
            config,
            resources,
            functions,
        }
    }

    pub fn type_name(&self) -> &'static str {
        PROVIDER_TYPE_NAME
    }

    /// Applies provider block settings
    pub fn configure(&self, config: &Value, diags: &mut Diagnostics) {
        let parsed = match ProviderConfig::from_value(config) {
            Ok(parsed) => parsed,
            Err(e) => {
                diags.add_error("Invalid provider configuration", e.to_string());
                return;
            }
        };

        info!("Configuring provider (strict_keysets: {})", parsed.strict_keysets);
        match self.config.write() {
            Ok(mut current) => *current = parsed,
            Err(poisoned) => *poisoned.into_inner() = parsed,
        }
    }

    /// Current provider settings
    pub fn config(&self) -> ProviderConfig {
        match self.config.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn schema(&self) -> ProviderSchema {
        ProviderSchema {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: crate::VERSION.to_string(),
            provider: ProviderConfig::schema(),
            resources: self
                .resources
                .iter()
                .map(|(name, r)| (name.clone(), r.schema()))
                .collect(),
            functions: self
                .functions
                .iter()
                .map(|(name, f)| (name.clone(), f.definition()))
                .collect(),
        }
    }

    /// Resource type names, sorted
    pub fn resource_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Function names, sorted
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Looks up a resource type by name
    pub fn resource(&self, type_name: &str) -> Result<&dyn Resource> {
        match self.resources.get(type_name) {
            Some(resource) => Ok(resource.as_ref()),
            None => {
                error!("Resource type not found: {}", type_name);
                Err(Error::UnknownResource(type_name.to_string()))
            }
        }
    }

    /// Looks up a function by name
    pub fn function(&self, name: &str) -> Result<&dyn Function> {
        match self.functions.get(name) {
            Some(function) => Ok(function.as_ref()),
            None => {
                error!("Function not found: {}", name);
                Err(Error::UnknownFunction(name.to_string()))
            }
        }
    }

    /// Call a function by name
    pub async fn call_function(&self, name: &str, arguments: &[String]) -> Result<String> {
        let function = self.function(name)?;
        debug!("Calling function: {}", name);
        function.call(arguments).await
    }
}

impl Default for JwkProvider {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}
