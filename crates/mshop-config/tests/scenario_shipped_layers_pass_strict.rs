//! Scenario: the shipped config layers pass the strict unused-key check.
//!
//! # Invariants under test
//!
//! 1. `base.yaml` + `variants/remote.yaml` is clean in REMOTE mode.
//! 2. `base.yaml` + `variants/deep_link.yaml` is clean in DEEP_LINK mode.
//! 3. Each pair resolves to the mode its variant names.

use std::path::PathBuf;

use mshop_config::{load_layered_yaml, report_unused_keys, ConfirmMode, StorefrontSettings, UnusedKeyPolicy};

fn shipped(rel: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../config")
        .join(rel)
        .to_string_lossy()
        .into_owned()
}

fn check(variant: &str, expected: ConfirmMode) {
    let base = shipped("defaults/base.yaml");
    let variant = shipped(variant);
    let loaded = load_layered_yaml(&[base.as_str(), variant.as_str()]).unwrap();

    let settings = StorefrontSettings::from_config_json(&loaded.config_json).unwrap();
    assert_eq!(settings.confirm_mode, expected);

    let report = report_unused_keys(settings.confirm_mode, &loaded.config_json, UnusedKeyPolicy::Fail)
        .expect("shipped layers must not carry unused keys");
    assert!(report.is_clean());
}

#[test]
fn remote_pair_is_clean() {
    check("variants/remote.yaml", ConfirmMode::Remote);
}

#[test]
fn deep_link_pair_is_clean() {
    check("variants/deep_link.yaml", ConfirmMode::DeepLink);
}
