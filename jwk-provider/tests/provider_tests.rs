use assert_matches::assert_matches;
use jwk_provider::{Diagnostics, Error, JwkProvider, PROVIDER_TYPE_NAME};
use serde_json::json;

#[test]
fn test_registered_names() {
    let provider = JwkProvider::default();
    assert_eq!(provider.type_name(), PROVIDER_TYPE_NAME);
    assert_eq!(
        provider.resource_types(),
        vec!["jwk_ec_key", "jwk_keyset", "jwk_oct_key", "jwk_okp_keypair", "jwk_rsa_key"]
    );
    assert_eq!(provider.function_names(), vec!["public_key", "to_pem"]);
    assert_matches!(provider.resource("jwk_dsa_key").err(), Some(Error::UnknownResource(_)));
}

#[test]
fn test_schema() {
    let provider = JwkProvider::default();
    let schema = provider.schema();
    assert_eq!(schema.type_name, "jwk");
    assert_eq!(schema.resources.len(), 5);

    let rsa = &schema.resources["jwk_rsa_key"];
    let required: Vec<&str> = rsa.required_attributes().collect();
    assert!(required.contains(&"kid"));
    assert!(required.contains(&"use"));
    assert!(required.contains(&"size"));
    let sensitive: Vec<&str> = rsa.sensitive_attributes().collect();
    assert_eq!(sensitive, vec!["json"]);

    let okp = &schema.resources["jwk_okp_keypair"];
    let sensitive: Vec<&str> = okp.sensitive_attributes().collect();
    assert_eq!(sensitive, vec!["private_key"]);

    assert_eq!(schema.functions["public_key"].parameters.len(), 2);
    assert_eq!(schema.functions["to_pem"].parameters.len(), 1);
}

#[test]
fn test_configure() {
    let provider = JwkProvider::default();
    assert!(!provider.config().strict_keysets);

    let mut diags = Diagnostics::new();
    provider.configure(&json!({"strict_keysets": true}), &mut diags);
    assert!(provider.config().strict_keysets);

    provider.configure(&json!({"strict_keysets": "yes"}), &mut diags);
    assert!(diags.contains("Invalid provider configuration"));
    assert!(provider.config().strict_keysets);
}
