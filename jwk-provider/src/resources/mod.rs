//! Resource handlers
//!
//! Each managed resource type implements [`Resource`]. Handlers take and return
//! attribute objects as JSON and report user-facing problems through
//! [`Diagnostics`]; a lifecycle call that returns `None` has recorded at least
//! one error.

mod ec_key;
mod keyset;
mod oct_key;
mod okp_key;
mod rsa_key;

pub use ec_key::{EcKeyModel, EcKeyResource};
pub use keyset::{KeysetModel, KeysetResource};
pub use oct_key::{OctKeyModel, OctKeyResource};
pub use okp_key::{OkpKeyModel, OkpKeyResource};
pub use rsa_key::{RsaKeyModel, RsaKeyResource};

use crate::algorithms::KeyUse;
use crate::diagnostics::Diagnostics;
use crate::jwk::{Jwk, KeyMaterial, KeyMetadata};
use crate::schema::Schema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Trait for handling the lifecycle of one resource type
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    /// Full type name, e.g. `jwk_rsa_key`
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Checks a configuration without generating anything
    async fn validate_config(&self, config: &Value, diags: &mut Diagnostics);

    /// Generates key material for a planned configuration
    async fn create(&self, plan: &Value, diags: &mut Diagnostics) -> Option<Value>;

    /// Refreshes recorded state
    async fn read(&self, state: &Value, diags: &mut Diagnostics) -> Option<Value>;

    /// Moves an instance from its prior state to a new plan
    async fn update(&self, prior: &Value, plan: &Value, diags: &mut Diagnostics) -> Option<Value>;

    /// Removes an instance; nothing exists outside of state
    async fn delete(&self, _state: &Value, _diags: &mut Diagnostics) {}

    /// Reconstructs state from an existing document
    async fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Value>;
}

/// Decodes attributes into a resource model
pub(crate) fn decode<T: DeserializeOwned>(value: &Value, diags: &mut Diagnostics) -> Option<T> {
    match serde_json::from_value(value.clone()) {
        Ok(model) => Some(model),
        Err(e) => {
            diags.add_error("Invalid resource attributes", e.to_string());
            None
        }
    }
}

/// Encodes a resource model back into attributes
pub(crate) fn encode<T: Serialize>(model: &T, diags: &mut Diagnostics) -> Option<Value> {
    match serde_json::to_value(model) {
        Ok(value) => Some(value),
        Err(e) => {
            diags.add_error("Failed to encode resource state", e.to_string());
            None
        }
    }
}

/// Parses `use`, recording the standard error when it is not `sig` or `enc`
pub(crate) fn validate_use(key_use: &str, diags: &mut Diagnostics) -> Option<KeyUse> {
    match key_use.parse() {
        Ok(parsed) => Some(parsed),
        Err(detail) => {
            diags.add_attribute_error("use", "Invalid attribute value for 'use'", detail);
            None
        }
    }
}

/// Checks that recorded key JSON still parses
pub(crate) fn check_stored_jwk(json: Option<&str>, diags: &mut Diagnostics) -> Option<Jwk> {
    let Some(json) = json else {
        diags.add_error("Invalid JWK in state", "No key JSON recorded for this resource");
        return None;
    };
    match Jwk::from_json(json) {
        Ok(jwk) => Some(jwk),
        Err(e) => {
            diags.add_error(
                "Invalid JWK in state",
                format!("Could not parse stored JWK: {}", e),
            );
            None
        }
    }
}

/// Parses the document handed to an import
pub(crate) fn parse_import(id: &str, diags: &mut Diagnostics) -> Option<Jwk> {
    match Jwk::from_json(id) {
        Ok(jwk) => Some(jwk),
        Err(e) => {
            diags.add_error(
                "Invalid JWK JSON",
                format!("Could not parse imported JWK: {}", e),
            );
            None
        }
    }
}

/// Reads the `kid` and `use` every imported key must carry
pub(crate) fn import_identity(jwk: &Jwk, diags: &mut Diagnostics) -> Option<(String, String)> {
    let kid = match jwk.kid.as_deref() {
        Some(kid) if !kid.is_empty() => kid.to_string(),
        _ => {
            diags.add_error("Missing Key ID", "Imported JWK must contain 'kid' field");
            return None;
        }
    };
    match jwk.key_use.as_deref() {
        Some(key_use @ ("sig" | "enc")) => Some((kid, key_use.to_string())),
        _ => {
            diags.add_error(
                "Missing or invalid Use",
                "Imported JWK must contain valid 'use' field ('sig' or 'enc')",
            );
            None
        }
    }
}

/// Requires the imported key to be of type `kty` and returns its key material
pub(crate) fn check_import_key(jwk: &Jwk, kty: &str, diags: &mut Diagnostics) -> Option<KeyMaterial> {
    if jwk.kty != kty {
        diags.add_error(
            "Invalid Key Type",
            format!("Imported JWK must be of type '{}'", kty),
        );
        return None;
    }
    match jwk.parse_key() {
        Ok(material) => Some(material),
        Err(e) => {
            diags.add_error("Invalid Key Material", e.to_string());
            None
        }
    }
}

/// Rewrites `kid`/`use`/`alg` of recorded key JSON, keeping its key material
pub(crate) fn rewrite_metadata(
    json: Option<&str>,
    metadata: KeyMetadata,
    diags: &mut Diagnostics,
) -> Option<String> {
    let jwk = check_stored_jwk(json, diags)?.with_metadata(metadata);
    match jwk.to_json() {
        Ok(json) => Some(json),
        Err(e) => {
            diags.add_error("Failed to update key metadata", e.to_string());
            None
        }
    }
}

/// Returns `value` unless it is empty
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
