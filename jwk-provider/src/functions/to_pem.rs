//! `to_pem` function

use super::{check_arity, Function};
use crate::error::{Error, Result};
use crate::jwk::Jwk;
use crate::schema::{AttributeType, FunctionDefinition, Parameter};

/// Converts a JWK into a PEM block
#[derive(Debug, Default)]
pub struct ToPemFunction;

impl ToPemFunction {
    pub fn new() -> Self {
        Self
    }

    pub fn run(jwk: &str) -> Result<String> {
        let jwk = Jwk::from_json(jwk)
            .map_err(|e| Error::InvalidArguments(format!("Failed convert Json to JWK: {}", e)))?;
        jwk.to_pem()
    }
}

#[async_trait::async_trait]
impl Function for ToPemFunction {
    fn name(&self) -> &'static str {
        "to_pem"
    }

    fn definition(&self) -> FunctionDefinition {
        FunctionDefinition {
            summary: "Converts JWK to PEM".to_string(),
            description: "Converts a JWK to PEM. Supports RSA, EC and Ed25519 keys, private or public.".to_string(),
            parameters: vec![Parameter::string("jwk", "Key as JWK JSON")],
            return_type: AttributeType::String,
        }
    }

    async fn call(&self, arguments: &[String]) -> Result<String> {
        check_arity(self, arguments)?;
        Self::run(&arguments[0])
    }
}
