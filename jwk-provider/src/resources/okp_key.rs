//! `jwk_okp_keypair` resource

use super::{
    check_import_key, check_stored_jwk, decode, encode, import_identity, parse_import,
    rewrite_metadata, validate_use, Resource,
};
use crate::algorithms::{
    self, KeyUse, OkpCurve, OKP_ENCRYPTION_ALGORITHMS, OKP_SIGNATURE_ALGORITHMS,
};
use crate::diagnostics::Diagnostics;
use crate::jwk::{Jwk, KeyMetadata};
use crate::keygen;
use crate::schema::{Attribute, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Attributes of an octet key pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkpKeyModel {
    pub kid: String,
    #[serde(rename = "use")]
    pub key_use: String,
    /// Curve name, which doubles as the algorithm
    pub alg: String,
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
}

impl OkpKeyModel {
    fn metadata(&self) -> KeyMetadata {
        KeyMetadata::new(&self.kid, &self.key_use, Some(&self.alg))
    }
}

/// Resource managing an Ed25519 or X25519 key pair
#[derive(Debug, Default)]
pub struct OkpKeyResource;

impl OkpKeyResource {
    pub fn new() -> Self {
        Self
    }

    fn check(&self, model: &OkpKeyModel, diags: &mut Diagnostics) -> Option<OkpCurve> {
        let key_use = validate_use(&model.key_use, diags)?;

        let allowed = algorithms::okp_algorithms(key_use);
        if !allowed.contains(&model.alg.as_str()) {
            let summary = match key_use {
                KeyUse::Sig => "Invalid 'alg' attribute for signature",
                KeyUse::Enc => "Invalid algorithm for encryption",
            };
            diags.add_attribute_error(
                "alg",
                summary,
                format!(
                    "Expected '{}' or '{}', got '{}'",
                    allowed[0], allowed[1], model.alg
                ),
            );
            return None;
        }

        model.alg.parse().ok()
    }

    /// Returns the private and public JWK JSON of a fresh key pair
    fn generate(
        &self,
        model: &OkpKeyModel,
        curve: OkpCurve,
        diags: &mut Diagnostics,
    ) -> Option<(String, String)> {
        let key = match keygen::okp(curve) {
            Ok(key) => key,
            Err(e) => {
                diags.add_error("OKP Key Generation Failed", e.to_string());
                return None;
            }
        };

        let private = Jwk::from_material(&key, model.metadata()).and_then(|jwk| jwk.to_json());
        let public = key
            .public()
            .and_then(|public| Jwk::from_material(&public, model.metadata()))
            .and_then(|jwk| jwk.to_json());
        match (private, public) {
            (Ok(private), Ok(public)) => Some((private, public)),
            (Err(e), _) => {
                diags.add_error("Failed to create OKP private key", e.to_string());
                None
            }
            (_, Err(e)) => {
                diags.add_error("Failed to create OKP public key", e.to_string());
                None
            }
        }
    }
}

fn is_okp_algorithm(alg: &str) -> bool {
    OKP_SIGNATURE_ALGORITHMS.contains(&alg) || OKP_ENCRYPTION_ALGORITHMS.contains(&alg)
}

#[async_trait::async_trait]
impl Resource for OkpKeyResource {
    fn type_name(&self) -> &'static str {
        "jwk_okp_keypair"
    }

    fn schema(&self) -> Schema {
        Schema::new("An octet key pair (Ed25519 or X25519) in JWK format.")
            .attribute(
                "kid",
                Attribute::string().required().description(
                    "The Key ID (KID) is a unique identifier for the key. It is used to distinguish different keys in a key set.",
                ),
            )
            .attribute(
                "use",
                Attribute::string()
                    .required()
                    .description("Specifies the intended use of the key, `sig` or `enc`."),
            )
            .attribute(
                "alg",
                Attribute::string()
                    .required()
                    .requires_replace()
                    .description("Ed25519/Ed448 for signing, X25519/X448 for key agreement."),
            )
            .attribute(
                "private_key",
                Attribute::string()
                    .computed()
                    .sensitive()
                    .description("The private key as JWK JSON."),
            )
            .attribute(
                "public_key",
                Attribute::string()
                    .computed()
                    .description("The public key as JWK JSON."),
            )
    }

    async fn validate_config(&self, config: &Value, diags: &mut Diagnostics) {
        if let Some(model) = decode::<OkpKeyModel>(config, diags) {
            self.check(&model, diags);
        }
    }

    async fn create(&self, plan: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut model: OkpKeyModel = decode(plan, diags)?;
        let curve = self.check(&model, diags)?;
        if diags.has_error() {
            return None;
        }

        info!("Creating {} key pair '{}'", curve, model.kid);
        let (private, public) = self.generate(&model, curve, diags)?;
        model.private_key = Some(private);
        model.public_key = Some(public);
        encode(&model, diags)
    }

    async fn read(&self, state: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let model: OkpKeyModel = decode(state, diags)?;
        check_stored_jwk(model.public_key.as_deref(), diags)?;
        if model.private_key.is_some() {
            check_stored_jwk(model.private_key.as_deref(), diags)?;
        }
        Some(state.clone())
    }

    async fn update(&self, prior: &Value, plan: &Value, diags: &mut Diagnostics) -> Option<Value> {
        let prior: OkpKeyModel = decode(prior, diags)?;
        let mut model: OkpKeyModel = decode(plan, diags)?;
        let curve = self.check(&model, diags)?;
        if diags.has_error() {
            return None;
        }

        // Imported state may carry a JOSE `alg` such as EdDSA, so compare curves
        let stored_curve = prior
            .public_key
            .as_deref()
            .and_then(|json| Jwk::from_json(json).ok())
            .and_then(|jwk| jwk.crv)
            .unwrap_or_else(|| prior.alg.clone());

        if stored_curve == model.alg {
            debug!("Keeping {} key material for '{}'", curve, model.kid);
            model.public_key = Some(rewrite_metadata(
                prior.public_key.as_deref(),
                model.metadata(),
                diags,
            )?);
            model.private_key = match prior.private_key.as_deref() {
                Some(private) => Some(rewrite_metadata(Some(private), model.metadata(), diags)?),
                None => None,
            };
        } else {
            info!("Replacing key pair '{}': {} -> {}", model.kid, stored_curve, model.alg);
            let (private, public) = self.generate(&model, curve, diags)?;
            model.private_key = Some(private);
            model.public_key = Some(public);
        }
        encode(&model, diags)
    }

    async fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Value> {
        let jwk = parse_import(id, diags)?;
        let (kid, key_use) = import_identity(&jwk, diags)?;
        check_import_key(&jwk, "OKP", diags)?;

        let alg = match jwk.alg.as_deref() {
            Some(alg) if is_okp_algorithm(alg) => alg.to_string(),
            _ => jwk.crv.clone().unwrap_or_default(),
        };

        let public = match jwk.public().and_then(|public| public.to_json()) {
            Ok(public) => public,
            Err(e) => {
                diags.add_error("Invalid Key Material", e.to_string());
                return None;
            }
        };

        info!("Imported {} key pair '{}'", alg, kid);
        encode(
            &OkpKeyModel {
                kid,
                key_use,
                alg,
                private_key: jwk.is_private().then(|| id.trim().to_string()),
                public_key: Some(public),
            },
            diags,
        )
    }
}
