//! `jwk_keyset` resource

use super::{decode, encode, Resource};
use crate::config::ProviderConfig;
use crate::diagnostics::Diagnostics;
use crate::keyset::{create_keyset, duplicate_kids, parse_keyset};
use crate::schema::{Attribute, AttributeType, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Attributes of a key set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysetModel {
    /// JWK documents, in the order they appear in the set
    pub keys: Vec<String>,
    #[serde(default)]
    pub json: Option<String>,
}

/// Resource assembling JWK documents into a JWK Set
#[derive(Debug, Default)]
pub struct KeysetResource {
    config: Arc<RwLock<ProviderConfig>>,
}

impl KeysetResource {
    pub fn new(config: Arc<RwLock<ProviderConfig>>) -> Self {
        Self { config }
    }

    fn strict(&self) -> bool {
        match self.config.read() {
            Ok(config) => config.strict_keysets,
            Err(poisoned) => poisoned.into_inner().strict_keysets,
        }
    }

    fn check(&self, model: &KeysetModel, diags: &mut Diagnostics) {
        let mut parsed = Vec::with_capacity(model.keys.len());
        for (i, key) in model.keys.iter().enumerate() {
            let attribute = format!("keys[{}]", i);
            match serde_json::from_str::<Value>(key) {
                Ok(value) if value.is_object() => parsed.push(value),
                Ok(_) => diags.add_attribute_warning(
                    &attribute,
                    "Key set element is not a JSON object",
                    format!("Element {} will be included as-is but is not a JWK", i),
                ),
                Err(e) => diags.add_attribute_error(
                    &attribute,
                    "Invalid JSON in key set",
                    format!("Element {} could not be parsed: {}", i, e),
                ),
            }
        }

        let duplicates = duplicate_kids(&parsed);
        if duplicates.is_empty() {
            return;
        }
        let detail = format!(
            "The following key IDs appear more than once: {}",
            duplicates.join(", ")
        );
        if self.strict() {
            diags.add_attribute_error("keys", "Duplicate key IDs in key set", detail);
        } else {
            diags.add_attribute_warning("keys", "Duplicate key IDs in key set", detail);
        }
    }

    fn assemble(&self, model: &mut KeysetModel, diags: &mut Diagnostics) -> Option<()> {
        match create_keyset(&model.keys) {
            Ok(json) => {
                model.json = Some(json);
                Some(())
            }
            Err(e) => {
                diags.add_error("Failed to create JWK Keyset", e.to_string());
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl Resource for KeysetResource {
    fn type_name(&self) -> &'static str {
        "jwk_keyset"
    }

    fn schema(&self) -> Schema {
        Schema::new("A JWK Set assembled from individual JWK documents.")
            .attribute(
                "keys",
                Attribute::list_of(AttributeType::String)
                    .required()
                    .description("JWK JSON documents, in order."),
            )
            .attribute(
                "json",
                Attribute::string()
                    .computed()
                    .description("The key set as `{\"keys\":[...]}` JSON."),
            )
    }

    async fn validate_config(&self, config: &Value, diags: &mut Diagnostics) {
        if let Some(model) = decode::<KeysetModel>(config, diags) {
            self.check(&model, diags);
        }
    }

    async fn create(&self, plan: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut model: KeysetModel = decode(plan, diags)?;
        self.check(&model, diags);
        if diags.has_error() {
            return None;
        }

        info!("Assembling key set with {} keys", model.keys.len());
        self.assemble(&mut model, diags)?;
        encode(&model, diags)
    }

    async fn read(&self, state: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let model: KeysetModel = decode(state, diags)?;
        if let Some(json) = model.json.as_deref() {
            if let Err(e) = parse_keyset(json) {
                diags.add_error("Invalid key set in state", e.to_string());
                return None;
            }
        }
        Some(state.clone())
    }

    async fn update(&self, _prior: &Value, plan: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut model: KeysetModel = decode(plan, diags)?;
        self.check(&model, diags);
        if diags.has_error() {
            return None;
        }

        debug!("Reassembling key set with {} keys", model.keys.len());
        self.assemble(&mut model, diags)?;
        encode(&model, diags)
    }

    async fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Value> {
        let members = match parse_keyset(id) {
            Ok(members) => members,
            Err(e) => {
                diags.add_error("Invalid JWK Set JSON", e.to_string());
                return None;
            }
        };

        let mut keys = Vec::with_capacity(members.len());
        for member in &members {
            match serde_json::to_string(member) {
                Ok(key) => keys.push(key),
                Err(e) => {
                    diags.add_error("Invalid JWK Set JSON", e.to_string());
                    return None;
                }
            }
        }

        let mut model = KeysetModel { keys, json: None };
        self.check(&model, diags);
        if diags.has_error() {
            return None;
        }
        self.assemble(&mut model, diags)?;

        info!("Imported key set with {} keys", model.keys.len());
        encode(&model, diags)
    }
}
