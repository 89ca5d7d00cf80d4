use jwk_provider::{Diagnostics, JwkProvider, Severity};
use serde_json::{json, Value};

fn key(kid: &str) -> String {
    format!(r#"{{"kty":"oct","kid":"{}","k":"AAAA"}}"#, kid)
}

#[tokio::test]
async fn test_keyset_preserves_order() {
    let provider = JwkProvider::default();
    let resource = provider.resource("jwk_keyset").unwrap();
    let mut diags = Diagnostics::new();

    let state = resource
        .create(&json!({"keys": [key("b"), key("a"), key("c")]}), &mut diags)
        .await
        .unwrap();
    let set: Value = serde_json::from_str(state["json"].as_str().unwrap()).unwrap();
    let kids: Vec<&str> = set["keys"]
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k["kid"].as_str().unwrap())
        .collect();
    assert_eq!(kids, vec!["b", "a", "c"]);
    assert!(diags.is_empty());
}

#[tokio::test]
async fn test_empty_keyset() {
    let provider = JwkProvider::default();
    let resource = provider.resource("jwk_keyset").unwrap();
    let mut diags = Diagnostics::new();

    let state = resource.create(&json!({"keys": []}), &mut diags).await.unwrap();
    assert_eq!(state["json"], r#"{"keys":[]}"#);
}

#[tokio::test]
async fn test_invalid_element_is_attributed() {
    let provider = JwkProvider::default();
    let resource = provider.resource("jwk_keyset").unwrap();
    let mut diags = Diagnostics::new();

    let state = resource
        .create(&json!({"keys": [key("a"), "{not json"]}), &mut diags)
        .await;
    assert!(state.is_none());
    let error = diags.errors().next().unwrap();
    assert_eq!(error.attribute.as_deref(), Some("keys[1]"));
}

#[tokio::test]
async fn test_duplicate_kids_warn_by_default() {
    let provider = JwkProvider::default();
    let resource = provider.resource("jwk_keyset").unwrap();
    let mut diags = Diagnostics::new();

    let state = resource
        .create(&json!({"keys": [key("a"), key("a")]}), &mut diags)
        .await;
    assert!(state.is_some());
    assert!(!diags.has_error());
    assert!(diags.has_warning());
    assert!(diags.contains("Duplicate key IDs in key set"));
}

#[tokio::test]
async fn test_duplicate_kids_fail_when_strict() {
    let provider = JwkProvider::default();
    let mut diags = Diagnostics::new();
    provider.configure(&json!({"strict_keysets": true}), &mut diags);
    assert!(diags.is_empty());

    let resource = provider.resource("jwk_keyset").unwrap();
    resource
        .validate_config(&json!({"keys": [key("a"), key("a")]}), &mut diags)
        .await;
    let error = diags.errors().next().unwrap();
    assert_eq!(error.severity, Severity::Error);
    assert_eq!(error.summary, "Duplicate key IDs in key set");
}

#[tokio::test]
async fn test_import_keyset() {
    let provider = JwkProvider::default();
    let resource = provider.resource("jwk_keyset").unwrap();
    let mut diags = Diagnostics::new();

    let id = r#"{"keys":[{"kty":"oct","kid":"a","k":"AAAA"},{"kty":"oct","kid":"b","k":"BBBB"}]}"#;
    let imported = resource.import_state(id, &mut diags).await.unwrap();
    assert_eq!(imported["keys"].as_array().unwrap().len(), 2);
    assert_eq!(imported["json"], id);

    let mut diags = Diagnostics::new();
    assert!(resource.import_state(r#"{"key":[]}"#, &mut diags).await.is_none());
    assert!(diags.contains("Invalid JWK Set JSON"));
}
