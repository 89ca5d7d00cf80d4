//! `jwk_rsa_key` resource

use super::{
    check_import_key, check_stored_jwk, decode, encode, import_identity, parse_import, present,
    rewrite_metadata, validate_use, Resource,
};
use crate::algorithms::{self, KeyUse, RSA_KEY_SIZES, RSA_MIN_KEY_SIZE};
use crate::diagnostics::Diagnostics;
use crate::jwk::{Jwk, KeyMetadata};
use crate::keygen;
use crate::schema::{Attribute, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Attributes of an RSA key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaKeyModel {
    pub kid: String,
    #[serde(rename = "use")]
    pub key_use: String,
    /// Modulus length in bits
    pub size: u32,
    #[serde(default)]
    pub alg: Option<String>,
    #[serde(default)]
    pub json: Option<String>,
}

impl RsaKeyModel {
    fn metadata(&self) -> KeyMetadata {
        KeyMetadata::new(&self.kid, &self.key_use, present(&self.alg))
    }
}

/// Resource managing a generated RSA private key
#[derive(Debug, Default)]
pub struct RsaKeyResource;

impl RsaKeyResource {
    pub fn new() -> Self {
        Self
    }

    fn check(&self, model: &RsaKeyModel, diags: &mut Diagnostics) {
        let Some(key_use) = validate_use(&model.key_use, diags) else {
            return;
        };

        if model.size < RSA_MIN_KEY_SIZE {
            diags.add_attribute_error(
                "size",
                "Invalid attribute value for 'size'",
                format!("size must be at least {}, got '{}'", RSA_MIN_KEY_SIZE, model.size),
            );
            return;
        }
        if !RSA_KEY_SIZES.contains(&model.size) {
            let sizes: Vec<String> = RSA_KEY_SIZES.iter().map(|s| s.to_string()).collect();
            diags.add_attribute_error(
                "size",
                "Invalid attribute value for 'size'",
                format!("Expected one of {}, got '{}'", sizes.join(", "), model.size),
            );
            return;
        }

        let table = algorithms::rsa_algorithms(key_use);
        let kind = match key_use {
            KeyUse::Sig => "signature",
            KeyUse::Enc => "encryption",
        };

        match present(&model.alg) {
            Some(alg) => match algorithms::min_size(table, alg) {
                None => diags.add_attribute_error(
                    "alg",
                    format!("Invalid 'alg' attribute for use: '{}'", key_use),
                    format!(
                        "Expected a valid RSA {} algorithm ({}), got '{}'",
                        kind,
                        algorithms::join(&algorithms::names(table)),
                        alg
                    ),
                ),
                Some(expected) if model.size < expected => diags.add_attribute_warning(
                    "size",
                    "Suboptimal RSA key size",
                    format!(
                        "Algorithm '{}' should use at least {} bits. Current size: {} bits.",
                        alg, expected, model.size
                    ),
                ),
                Some(_) => {}
            },
            None => diags.add_attribute_warning(
                "alg",
                format!("No 'alg' attribute for '{}' use", key_use),
                format!(
                    "Consider setting a valid {} algorithm, one of '{}'",
                    kind,
                    algorithms::join(&algorithms::names(table))
                ),
            ),
        }
    }

    fn generate(&self, model: &RsaKeyModel, diags: &mut Diagnostics) -> Option<String> {
        let key = match keygen::rsa(model.size as usize) {
            Ok(key) => key,
            Err(e) => {
                diags.add_error("RSA Key Generation Failed", e.to_string());
                return None;
            }
        };
        match Jwk::from_material(&key, model.metadata()).and_then(|jwk| jwk.to_json()) {
            Ok(json) => Some(json),
            Err(e) => {
                diags.add_error("Failed to create RSA key", e.to_string());
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl Resource for RsaKeyResource {
    fn type_name(&self) -> &'static str {
        "jwk_rsa_key"
    }

    fn schema(&self) -> Schema {
        Schema::new("An RSA private key in JWK format.")
            .attribute(
                "kid",
                Attribute::string().required().description("Key ID, written to `kid`."),
            )
            .attribute(
                "use",
                Attribute::string().required().description("Intended use, `sig` or `enc`."),
            )
            .attribute(
                "size",
                Attribute::number()
                    .required()
                    .requires_replace()
                    .description("Modulus length in bits: 2048, 3072 or 4096."),
            )
            .attribute(
                "alg",
                Attribute::string()
                    .optional()
                    .description("Algorithm the key is intended for, e.g. `RS256` or `RSA-OAEP`."),
            )
            .attribute(
                "json",
                Attribute::string()
                    .computed()
                    .sensitive()
                    .description("The private key as JWK JSON."),
            )
    }

    async fn validate_config(&self, config: &Value, diags: &mut Diagnostics) {
        if let Some(model) = decode::<RsaKeyModel>(config, diags) {
            self.check(&model, diags);
        }
    }

    async fn create(&self, plan: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut model: RsaKeyModel = decode(plan, diags)?;
        self.check(&model, diags);
        if diags.has_error() {
            return None;
        }

        info!("Creating {}-bit RSA key '{}'", model.size, model.kid);
        model.json = Some(self.generate(&model, diags)?);
        encode(&model, diags)
    }

    async fn read(&self, state: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let model: RsaKeyModel = decode(state, diags)?;
        check_stored_jwk(model.json.as_deref(), diags)?;
        Some(state.clone())
    }

    async fn update(&self, prior: &Value, plan: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let prior: RsaKeyModel = decode(prior, diags)?;
        let mut model: RsaKeyModel = decode(plan, diags)?;
        self.check(&model, diags);
        if diags.has_error() {
            return None;
        }

        model.json = if prior.size == model.size {
            debug!("Keeping RSA key material for '{}'", model.kid);
            Some(rewrite_metadata(prior.json.as_deref(), model.metadata(), diags)?)
        } else {
            info!(
                "Replacing RSA key '{}': size {} -> {}",
                model.kid, prior.size, model.size
            );
            Some(self.generate(&model, diags)?)
        };
        encode(&model, diags)
    }

    async fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Value> {
        let jwk = parse_import(id, diags)?;
        let (kid, key_use) = import_identity(&jwk, diags)?;
        let material = check_import_key(&jwk, "RSA", diags)?;
        let size = material.size_bits().unwrap_or_default() as u32;

        info!("Imported RSA key '{}'", kid);
        encode(
            &RsaKeyModel {
                kid,
                key_use,
                size,
                alg: jwk.alg.clone(),
                json: Some(id.trim().to_string()),
            },
            diags,
        )
    }
}
