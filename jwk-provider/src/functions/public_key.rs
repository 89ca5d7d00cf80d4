//! `public_key` function

use super::{check_arity, Function};
use crate::error::{Error, Result};
use crate::jwk::Jwk;
use crate::schema::{AttributeType, FunctionDefinition, Parameter};
use tracing::debug;

/// Derives the public JWK from a private JWK
#[derive(Debug, Default)]
pub struct PublicKeyFunction;

impl PublicKeyFunction {
    pub fn new() -> Self {
        Self
    }

    /// Returns the public JWK JSON, with `kid` replaced when one is given
    pub fn run(private_key: &str, kid: &str) -> Result<String> {
        let private = Jwk::from_json(private_key)
            .map_err(|e| Error::InvalidArguments(format!("Failed convert private key to JWK: {}", e)))?;

        let mut public = private.public()?;
        if !kid.is_empty() {
            public.kid = Some(kid.to_string());
        }
        debug!("Derived {} public key", public.kty);
        public.to_json()
    }
}

#[async_trait::async_trait]
impl Function for PublicKeyFunction {
    fn name(&self) -> &'static str {
        "public_key"
    }

    fn definition(&self) -> FunctionDefinition {
        FunctionDefinition {
            summary: "Extracts public key".to_string(),
            description: "Extracts the public key from a private key given as JWK JSON. Returns the public key as JWK JSON.".to_string(),
            parameters: vec![
                Parameter::string("private_key", "Private key as JWK JSON"),
                Parameter::string("kid", "Key ID for the public key; empty keeps the private key's ID"),
            ],
            return_type: AttributeType::String,
        }
    }

    async fn call(&self, arguments: &[String]) -> Result<String> {
        check_arity(self, arguments)?;
        Self::run(&arguments[0], &arguments[1])
    }
}
