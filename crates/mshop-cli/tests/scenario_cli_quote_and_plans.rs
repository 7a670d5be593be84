use assert_cmd::Command;
use predicates::prelude::*;

/// `mshop quote` prints the clamped amount, tiered price and bonus total.
#[test]
fn quote_prices_1500_tokens() {
    Command::cargo_bin("mshop")
        .unwrap()
        .args(["quote", "1500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("amount=1500 price=1350₽ total=1650"));
}

#[test]
fn quote_clamps_out_of_range_and_garbage() {
    Command::cargo_bin("mshop")
        .unwrap()
        .args(["quote", "-40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("amount=100 price=100₽ total=110"));

    Command::cargo_bin("mshop")
        .unwrap()
        .args(["quote", "много"])
        .assert()
        .success()
        .stdout(predicate::str::contains("amount=100"));
}

#[test]
fn plans_lists_catalog_and_presets() {
    Command::cargo_bin("mshop")
        .unwrap()
        .arg("plans")
        .assert()
        .success()
        .stdout(predicate::str::contains("optimal"))
        .stdout(predicate::str::contains("890₽"))
        .stdout(predicate::str::contains("1490₽"))
        .stdout(predicate::str::contains("token_presets=100,500,1000,2000,5000"));
}

#[test]
fn config_hash_prints_hash_and_canonical_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("base.yaml");
    std::fs::write(&path, "storefront:\n  overlay: true\n").unwrap();

    Command::cargo_bin("mshop")
        .unwrap()
        .arg("config-hash")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_match("config_hash=[0-9a-f]{64}").unwrap())
        .stdout(predicate::str::contains(r#"{"storefront":{"overlay":true}}"#));
}

/// The shipped layers load and the deep-link variant overrides the base.
#[test]
fn shipped_config_layers_hash() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");
    let base = repo_root.join("config/defaults/base.yaml");
    let variant = repo_root.join("config/variants/deep_link.yaml");

    Command::cargo_bin("mshop")
        .unwrap()
        .arg("config-hash")
        .arg(&base)
        .arg(&variant)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""confirm_strategy":"deep_link""#))
        .stdout(predicate::str::contains(r#""bot_username":"BananaGenerationBot""#));
}
