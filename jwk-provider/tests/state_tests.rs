use jwk_provider::StateStore;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_missing_state_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let state = StateStore::load_from_path(&dir.path().join("state.json")).unwrap();
    assert_eq!(state.serial, 0);
    assert_eq!(state.list().count(), 0);
}

#[test]
fn test_state_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("state.json");

    let mut state = StateStore::new();
    state.upsert("jwk_oct_key", "hmac", json!({"kid": "hmac", "size": 256}));
    state.upsert("jwk_rsa_key", "signing", json!({"kid": "rsa"}));
    state.save_to_path(&path).unwrap();
    assert_eq!(state.serial, 1);

    let mut loaded = StateStore::load_from_path(&path).unwrap();
    assert_eq!(loaded.serial, 1);
    let addresses: Vec<String> = loaded.list().map(|r| r.address()).collect();
    assert_eq!(addresses, vec!["jwk_oct_key.hmac", "jwk_rsa_key.signing"]);
    assert_eq!(loaded.get("jwk_oct_key", "hmac").unwrap().attributes["size"], 256);

    let created_at = loaded.get("jwk_oct_key", "hmac").unwrap().created_at;
    loaded.upsert("jwk_oct_key", "hmac", json!({"kid": "hmac", "size": 512}));
    assert!(loaded.remove("jwk_rsa_key", "signing").is_some());
    loaded.save_to_path(&path).unwrap();

    let reloaded = StateStore::load_from_path(&path).unwrap();
    assert_eq!(reloaded.serial, 2);
    let recorded = reloaded.get("jwk_oct_key", "hmac").unwrap();
    assert_eq!(recorded.created_at, created_at);
    assert_eq!(recorded.attributes["size"], 512);
    assert!(reloaded.get("jwk_rsa_key", "signing").is_none());
}

#[test]
fn test_corrupt_state_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(StateStore::load_from_path(&path).is_err());
}
