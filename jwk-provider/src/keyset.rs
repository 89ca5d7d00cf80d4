//! JWK Set assembly and parsing

use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::collections::BTreeSet;

/// Parses each key document and wraps them in a `{"keys":[...]}` envelope
///
/// Keys keep their input order, member order and number text.
pub fn create_keyset(keys: &[String]) -> Result<String> {
    let parsed = keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            serde_json::from_str::<Value>(key)
                .map_err(|e| Error::Keyset(format!("key at index {} is not valid JSON: {}", i, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(serde_json::to_string(&json!({ "keys": parsed }))?)
}

/// Extracts the members of a JWK Set document
pub fn parse_keyset(json: &str) -> Result<Vec<Value>> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| Error::Keyset(format!("failed to parse key set: {}", e)))?;

    match document.get("keys") {
        Some(Value::Array(keys)) => Ok(keys.clone()),
        Some(_) => Err(Error::Keyset("'keys' must be an array".to_string())),
        None => Err(Error::Keyset("missing 'keys' member".to_string())),
    }
}

/// Returns every `kid` that appears more than once, in first-seen order
pub fn duplicate_kids(keys: &[Value]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut duplicates = Vec::new();
    for kid in keys.iter().filter_map(|k| k.get("kid").and_then(Value::as_str)) {
        if !seen.insert(kid) && !duplicates.iter().any(|d: &String| d == kid) {
            duplicates.push(kid.to_string());
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn keyset_preserves_order_and_members() {
        let keys = vec![
            r#"{"kty":"oct","kid":"b","k":"AAAA"}"#.to_string(),
            r#"{ "kid": "a", "kty": "oct", "k": "BBBB" }"#.to_string(),
        ];
        let keyset = create_keyset(&keys).unwrap();
        assert_eq!(
            keyset,
            r#"{"keys":[{"kty":"oct","kid":"b","k":"AAAA"},{"kid":"a","kty":"oct","k":"BBBB"}]}"#
        );

        let parsed = parse_keyset(&keyset).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["kid"], "b");
    }

    #[test]
    fn keyset_keeps_number_text() {
        let keys = vec![r#"{"kid":"a","x5t#n":12345678901234567890123,"v":1.0}"#.to_string()];
        assert_eq!(
            create_keyset(&keys).unwrap(),
            r#"{"keys":[{"kid":"a","x5t#n":12345678901234567890123,"v":1.0}]}"#
        );
    }

    #[test]
    fn invalid_element_names_its_index() {
        let keys = vec!["{}".to_string(), "{not json".to_string()];
        let err = create_keyset(&keys).unwrap_err();
        assert_matches!(&err, Error::Keyset(msg) if msg.contains("index 1"));
    }

    #[test]
    fn empty_keyset() {
        assert_eq!(create_keyset(&[]).unwrap(), r#"{"keys":[]}"#);
        assert_matches!(parse_keyset(r#"{"keys":{}}"#), Err(Error::Keyset(_)));
        assert_matches!(parse_keyset("{}"), Err(Error::Keyset(_)));
    }

    #[test]
    fn duplicate_kids_reported_once() {
        let keys: Vec<Value> = vec![
            json!({"kid": "a"}),
            json!({"kid": "b"}),
            json!({"kid": "a"}),
            json!({"kid": "a"}),
            json!({"kty": "oct"}),
        ];
        assert_eq!(duplicate_kids(&keys), vec!["a".to_string()]);
    }
}
