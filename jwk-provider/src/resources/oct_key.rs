//! `jwk_oct_key` resource

use super::{
    check_stored_jwk, decode, encode, import_identity, parse_import, present, rewrite_metadata,
    validate_use, Resource,
};
use crate::algorithms::{self, KeyUse, OCT_RECOMMENDED_KEY_SIZE, OCT_UNKEYED_ALGORITHMS};
use crate::diagnostics::Diagnostics;
use crate::jwk::{Jwk, KeyMetadata};
use crate::keygen;
use crate::schema::{Attribute, Schema};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Attributes of a symmetric key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OctKeyModel {
    pub kid: String,
    #[serde(rename = "use")]
    pub key_use: String,
    /// Key length in bits
    pub size: u32,
    #[serde(default)]
    pub alg: Option<String>,
    #[serde(default)]
    pub json: Option<String>,
}

impl OctKeyModel {
    fn metadata(&self) -> KeyMetadata {
        KeyMetadata::new(&self.kid, &self.key_use, present(&self.alg))
    }
}

/// Resource managing random symmetric key material
#[derive(Debug, Default)]
pub struct OctKeyResource;

impl OctKeyResource {
    pub fn new() -> Self {
        Self
    }

    fn check(&self, model: &OctKeyModel, diags: &mut Diagnostics) {
        let Some(key_use) = validate_use(&model.key_use, diags) else {
            return;
        };

        let bits = model.size;
        if bits == 0 {
            diags.add_attribute_error(
                "size",
                "Invalid attribute value for 'size'",
                "size must be greater than 0",
            );
            return;
        }
        if bits % 8 != 0 {
            diags.add_attribute_error(
                "size",
                "Invalid attribute value for 'size'",
                format!("size must be divisible by 8, got '{}'", bits),
            );
            return;
        }

        let table = algorithms::oct_algorithms(key_use);
        let alg = present(&model.alg);

        if let Some(alg) = alg {
            let Some(required) = algorithms::min_size(table, alg) else {
                let kind = match key_use {
                    KeyUse::Sig => "signature",
                    KeyUse::Enc => "encryption",
                };
                diags.add_attribute_error(
                    "alg",
                    "Invalid algorithm",
                    format!("Algorithm '{}' is not a valid {} algorithm.", alg, kind),
                );
                return;
            };
            if bits < required {
                diags.add_attribute_error(
                    "size",
                    "Invalid key size for 'alg'",
                    format!(
                        "For algorithm '{}', the key size must be at least {} bits ({} bytes).",
                        alg,
                        required,
                        required / 8
                    ),
                );
                return;
            }
        }

        let unkeyed = alg.map_or(false, |a| OCT_UNKEYED_ALGORITHMS.contains(&a));
        let allowed = alg
            .and_then(|a| algorithms::min_size(table, a))
            .map_or(false, |required| required <= bits);
        if !unkeyed && !allowed && bits < OCT_RECOMMENDED_KEY_SIZE {
            diags.add_attribute_warning(
                "size",
                "Potentially insecure key size",
                format!(
                    "General security recommendation is at least {} bits, got '{}' bits",
                    OCT_RECOMMENDED_KEY_SIZE, bits
                ),
            );
        }
    }

    fn generate(&self, model: &OctKeyModel, diags: &mut Diagnostics) -> Option<String> {
        let key = match keygen::oct(model.size as usize) {
            Ok(key) => key,
            Err(e) => {
                diags.add_error("Symmetric Key Generation Failed", e.to_string());
                return None;
            }
        };
        match Jwk::from_material(&key, model.metadata()).and_then(|jwk| jwk.to_json()) {
            Ok(json) => Some(json),
            Err(e) => {
                diags.add_error("Failed to create symmetric key", e.to_string());
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl Resource for OctKeyResource {
    fn type_name(&self) -> &'static str {
        "jwk_oct_key"
    }

    fn schema(&self) -> Schema {
        Schema::new("A symmetric key in JWK format.")
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
                    .description("Key length in bits, a multiple of 8."),
            )
            .attribute(
                "alg",
                Attribute::string()
                    .optional()
                    .description("HMAC or key wrapping algorithm, e.g. `HS256` or `A256KW`."),
            )
            .attribute(
                "json",
                Attribute::string()
                    .computed()
                    .sensitive()
                    .description("The key as JWK JSON."),
            )
    }

    async fn validate_config(&self, config: &Value, diags: &mut Diagnostics) {
        if let Some(model) = decode::<OctKeyModel>(config, diags) {
            self.check(&model, diags);
        }
    }

    async fn create(&self, plan: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut model: OctKeyModel = decode(plan, diags)?;
        self.check(&model, diags);
        if diags.has_error() {
            return None;
        }

        info!("Creating {}-bit symmetric key '{}'", model.size, model.kid);
        model.json = Some(self.generate(&model, diags)?);
        encode(&model, diags)
    }

    async fn read(&self, state: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let model: OctKeyModel = decode(state, diags)?;
        check_stored_jwk(model.json.as_deref(), diags)?;
        Some(state.clone())
    }

    async fn update(&self, prior: &Value, plan: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let prior: OctKeyModel = decode(prior, diags)?;
        let mut model: OctKeyModel = decode(plan, diags)?;
        self.check(&model, diags);
        if diags.has_error() {
            return None;
        }

        model.json = if prior.size == model.size {
            debug!("Keeping symmetric key material for '{}'", model.kid);
            Some(rewrite_metadata(prior.json.as_deref(), model.metadata(), diags)?)
        } else {
            info!(
                "Replacing symmetric key '{}': size {} -> {}",
                model.kid, prior.size, model.size
            );
            Some(self.generate(&model, diags)?)
        };
        encode(&model, diags)
    }

    async fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Value> {
        let jwk = parse_import(id, diags)?;
        let (kid, key_use) = import_identity(&jwk, diags)?;

        if jwk.kty != "oct" {
            diags.add_error("Invalid Key Type", "Imported JWK must be of type 'oct'");
            return None;
        }

        let size = match jwk.k.as_deref().map(|k| URL_SAFE_NO_PAD.decode(k)) {
            Some(Ok(key)) => (key.len() * 8) as u32,
            Some(Err(e)) => {
                diags.add_error(
                    "Invalid Key Material",
                    format!("Could not decode 'k' parameter: {}", e),
                );
                return None;
            }
            None => {
                diags.add_error(
                    "Missing Key Material",
                    "Imported OCT JWK must contain 'k' field",
                );
                return None;
            }
        };

        info!("Imported symmetric key '{}'", kid);
        encode(
            &OctKeyModel {
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
