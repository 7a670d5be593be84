//! Scenario: config hash is reproducible.
//!
//! # Invariants under test
//!
//! 1. Same inputs, same hash.
//! 2. Key order inside a document does not change the hash.
//! 3. A changed value changes the hash.
//! 4. An override layer equal to the base value does not change the hash.

use mshop_config::{load_layered_yaml, load_layered_yaml_from_strings};
use std::io::Write;

const BASE: &str = r#"
storefront:
  confirm_strategy: remote
  checkout_form: true
  overlay: true
payments:
  endpoint: http://127.0.0.1:8000/create-payment
  timeout_ms: 10000
"#;

const BASE_REORDERED: &str = r#"
payments:
  timeout_ms: 10000
  endpoint: http://127.0.0.1:8000/create-payment
storefront:
  overlay: true
  checkout_form: true
  confirm_strategy: remote
"#;

#[test]
fn identical_inputs_hash_identically() {
    let a = load_layered_yaml_from_strings(&[BASE]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.config_hash.len(), 64, "sha256 hex");
}

#[test]
fn key_order_does_not_matter() {
    let a = load_layered_yaml_from_strings(&[BASE]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_REORDERED]).unwrap();
    assert_eq!(a.canonical_json, b.canonical_json);
    assert_eq!(a.config_hash, b.config_hash);
}

#[test]
fn changed_value_changes_hash() {
    let a = load_layered_yaml_from_strings(&[BASE]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE, "payments:\n  timeout_ms: 5000\n"]).unwrap();
    assert_ne!(a.config_hash, b.config_hash);
    assert_eq!(b.config_json["payments"]["timeout_ms"], 5000);
    assert_eq!(
        b.config_json["payments"]["endpoint"],
        "http://127.0.0.1:8000/create-payment",
        "override must keep sibling keys"
    );
}

#[test]
fn no_op_override_keeps_hash() {
    let a = load_layered_yaml_from_strings(&[BASE]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE, "storefront:\n  overlay: true\n", ""]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
}

#[test]
fn files_load_like_strings() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(BASE.as_bytes()).unwrap();
    let path = f.path().to_str().unwrap().to_string();

    let from_file = load_layered_yaml(&[&path]).unwrap();
    let from_str = load_layered_yaml_from_strings(&[BASE]).unwrap();
    assert_eq!(from_file.config_hash, from_str.config_hash);

    let err = load_layered_yaml(&["/definitely/not/here.yaml"]).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read yaml path"));
}
