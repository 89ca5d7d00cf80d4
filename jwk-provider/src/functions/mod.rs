//! Provider functions
//!
//! Functions are pure: every argument and the result are strings.

mod public_key;
mod to_pem;

pub use public_key::PublicKeyFunction;
pub use to_pem::ToPemFunction;

use crate::error::{Error, Result};
use crate::schema::FunctionDefinition;

/// Trait for handling calls to one provider function
#[async_trait::async_trait]
pub trait Function: Send + Sync {
    fn name(&self) -> &'static str;

    fn definition(&self) -> FunctionDefinition;

    async fn call(&self, arguments: &[String]) -> Result<String>;
}

/// Checks that a call passes exactly as many arguments as the function declares
pub(crate) fn check_arity(function: &dyn Function, arguments: &[String]) -> Result<()> {
    let expected = function.definition().parameters.len();
    if arguments.len() != expected {
        return Err(Error::InvalidArguments(format!(
            "{} expects {} argument(s), got {}",
            function.name(),
            expected,
            arguments.len()
        )));
    }
    Ok(())
}
