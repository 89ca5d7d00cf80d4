//! Provider-level configuration

use crate::schema::{Attribute, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings from the provider block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Reject key sets with duplicate `kid` values instead of warning
    pub strict_keysets: bool,
}

impl ProviderConfig {
    /// Decodes the provider block; `null` yields the defaults
    pub fn from_value(value: &Value) -> serde_json::Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone())
    }

    pub fn schema() -> Schema {
        Schema::new("Manage JSON Web Keys and key sets.").attribute(
            "strict_keysets",
            Attribute::bool().optional().description(
                "Treat duplicate `kid` values in a key set as an error rather than a warning.",
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_to_advisory_keysets() {
        assert_eq!(ProviderConfig::from_value(&Value::Null).unwrap(), ProviderConfig::default());
        assert_eq!(ProviderConfig::from_value(&json!({})).unwrap(), ProviderConfig::default());
        assert!(
            ProviderConfig::from_value(&json!({"strict_keysets": true}))
                .unwrap()
                .strict_keysets
        );
        assert!(ProviderConfig::from_value(&json!({"strict_keysets": "yes"})).is_err());
    }
}
