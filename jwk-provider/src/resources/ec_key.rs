//! `jwk_ec_key` resource

use super::{
    check_import_key, check_stored_jwk, decode, encode, import_identity, parse_import,
    rewrite_metadata, validate_use, Resource,
};
use crate::algorithms::{self, EcCurve, KeyUse, EC_ENCRYPTION_ALGORITHMS, EC_SIGNATURE_ALGORITHMS};
use crate::diagnostics::Diagnostics;
use crate::jwk::{Jwk, KeyMetadata};
use crate::keygen;
use crate::schema::{Attribute, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Attributes of an EC key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcKeyModel {
    pub kid: String,
    #[serde(rename = "use")]
    pub key_use: String,
    pub crv: String,
    pub alg: String,
    #[serde(default)]
    pub json: Option<String>,
}

impl EcKeyModel {
    fn metadata(&self) -> KeyMetadata {
        KeyMetadata::new(&self.kid, &self.key_use, Some(&self.alg))
    }
}

/// Resource managing a generated EC private key
#[derive(Debug, Default)]
pub struct EcKeyResource;

impl EcKeyResource {
    pub fn new() -> Self {
        Self
    }

    fn check(&self, model: &EcKeyModel, diags: &mut Diagnostics) -> Option<EcCurve> {
        let key_use = validate_use(&model.key_use, diags)?;

        let curve: EcCurve = match model.crv.parse() {
            Ok(curve) => curve,
            Err(_) => {
                diags.add_attribute_error(
                    "crv",
                    "Invalid attribute value for 'crv'",
                    format!(
                        "Expected one of '{}', got '{}'",
                        algorithms::join(&EcCurve::names()),
                        model.crv
                    ),
                );
                return None;
            }
        };

        match key_use {
            KeyUse::Sig => {
                let Some(required) = algorithms::curve_for_ec_signature(&model.alg) else {
                    let names: Vec<&str> = EC_SIGNATURE_ALGORITHMS.iter().map(|(n, _)| *n).collect();
                    diags.add_attribute_error(
                        "alg",
                        "Invalid 'alg' attribute for use: 'sig'",
                        format!(
                            "Expected a valid EC signature algorithm, one of '{}', got '{}'",
                            algorithms::join(&names),
                            model.alg
                        ),
                    );
                    return None;
                };
                if required != curve {
                    diags.add_attribute_error(
                        "crv",
                        "Invalid attribute value for 'crv'",
                        format!(
                            "Algorithm '{}' requires curve '{}', got '{}'",
                            model.alg, required, curve
                        ),
                    );
                    return None;
                }
            }
            KeyUse::Enc => {
                if !EC_ENCRYPTION_ALGORITHMS.contains(&model.alg.as_str()) {
                    diags.add_attribute_error(
                        "alg",
                        "Invalid 'alg' attribute for use: 'enc'",
                        format!(
                            "Expected a valid EC encryption algorithm, one of '{}', got '{}'",
                            algorithms::join(EC_ENCRYPTION_ALGORITHMS),
                            model.alg
                        ),
                    );
                    return None;
                }
            }
        }

        Some(curve)
    }

    fn generate(&self, model: &EcKeyModel, curve: EcCurve, diags: &mut Diagnostics) -> Option<String> {
        let key = match keygen::ec(curve) {
            Ok(key) => key,
            Err(e) => {
                diags.add_error("EC Key Generation Failed", e.to_string());
                return None;
            }
        };
        match Jwk::from_material(&key, model.metadata()).and_then(|jwk| jwk.to_json()) {
            Ok(json) => Some(json),
            Err(e) => {
                diags.add_error("Failed to create EC key", e.to_string());
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl Resource for EcKeyResource {
    fn type_name(&self) -> &'static str {
        "jwk_ec_key"
    }

    fn schema(&self) -> Schema {
        Schema::new("An elliptic curve private key in JWK format.")
            .attribute(
                "kid",
                Attribute::string().required().description("Key ID, written to `kid`."),
            )
            .attribute(
                "use",
                Attribute::string().required().description("Intended use, `sig` or `enc`."),
            )
            .attribute(
                "crv",
                Attribute::string()
                    .required()
                    .requires_replace()
                    .description("Curve: P-256, P-384 or P-521."),
            )
            .attribute(
                "alg",
                Attribute::string().required().description(
                    "ES256/ES384/ES512 for signing, or an ECDH-ES variant for encryption.",
                ),
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
        if let Some(model) = decode::<EcKeyModel>(config, diags) {
            self.check(&model, diags);
        }
    }

    async fn create(&self, plan: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut model: EcKeyModel = decode(plan, diags)?;
        let curve = self.check(&model, diags)?;
        if diags.has_error() {
            return None;
        }

        info!("Creating {} key '{}'", curve, model.kid);
        model.json = Some(self.generate(&model, curve, diags)?);
        encode(&model, diags)
    }

    async fn read(&self, state: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let model: EcKeyModel = decode(state, diags)?;
        check_stored_jwk(model.json.as_deref(), diags)?;
        Some(state.clone())
    }

    async fn update(&self, prior: &Value, plan: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let prior: EcKeyModel = decode(prior, diags)?;
        let mut model: EcKeyModel = decode(plan, diags)?;
        let curve = self.check(&model, diags)?;
        if diags.has_error() {
            return None;
        }

        model.json = if prior.crv == model.crv {
            debug!("Keeping EC key material for '{}'", model.kid);
            Some(rewrite_metadata(prior.json.as_deref(), model.metadata(), diags)?)
        } else {
            info!("Replacing EC key '{}': {} -> {}", model.kid, prior.crv, model.crv);
            Some(self.generate(&model, curve, diags)?)
        };
        encode(&model, diags)
    }

    async fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Value> {
        let jwk = parse_import(id, diags)?;
        let (kid, key_use) = import_identity(&jwk, diags)?;
        check_import_key(&jwk, "EC", diags)?;

        info!("Imported EC key '{}'", kid);
        encode(
            &EcKeyModel {
                kid,
                key_use,
                crv: jwk.crv.clone().unwrap_or_default(),
                alg: jwk.alg.clone().unwrap_or_default(),
                json: Some(id.trim().to_string()),
            },
            diags,
        )
    }
}
