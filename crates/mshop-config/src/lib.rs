//! mshop-config
//!
//! Layered YAML configuration for the storefront.
//!
//! - Documents merge in order; later layers override earlier ones key by key.
//! - The merged tree is hashed (SHA-256 over canonical JSON) so a session can
//!   log exactly which configuration it ran with.
//! - [`report_unused_keys`] lists leaves the selected confirmation mode never
//!   reads, so a typo in an override does not silently do nothing.
//! - [`StorefrontSettings`] is the typed view the binary consumes.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;

mod settings;

pub use settings::{
    ConfirmMode, PaymentsSettings, StorefrontSettings, DEFAULT_BACKOFF_MS, DEFAULT_TIMEOUT_MS,
    MAX_RETRIES, TIMEOUT_MS_RANGE,
};

/// Leaf strings starting with one of these abort the load. Payment provider
/// credentials belong in the environment, not in YAML.
const SECRET_PREFIXES: &[&str] = &[
    "sk-",
    "sk_live",
    "sk_test",
    "live_",
    "-----BEGIN",
    "ghp_",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    pub mode: String,
    /// Consumed JSON-pointer prefixes used for this analysis (sorted, unique)
    pub consumed_prefixes: Vec<String>,
    /// Unused leaf pointers (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// JSON-pointer prefixes read for each confirmation mode.
///
/// Keep this in step with [`StorefrontSettings::from_config_json`]: list only
/// what that mode actually reads.
pub fn consumed_pointers_for_mode(mode: ConfirmMode) -> &'static [&'static str] {
    match mode {
        ConfirmMode::Remote => &[
            "/storefront/confirm_strategy",
            "/storefront/checkout_form",
            "/storefront/overlay",
            "/payments/endpoint",
            "/payments/timeout_ms",
            "/payments/retry/max_retries",
            "/payments/retry/backoff_ms",
        ],
        ConfirmMode::DeepLink => &[
            "/storefront/confirm_strategy",
            "/storefront/checkout_form",
            "/storefront/overlay",
            "/storefront/bot_username",
        ],
    }
}

/// Leaves of `config_json` the given mode never reads.
///
/// With `UnusedKeyPolicy::Fail` any unused leaf is an error; `Warn` always
/// returns the report.
pub fn report_unused_keys(
    mode: ConfirmMode,
    config_json: &Value,
    policy: UnusedKeyPolicy,
) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<&str> = consumed_pointers_for_mode(mode).iter().copied().collect();

    let unused: BTreeSet<String> = leaves(config_json)
        .into_iter()
        .map(|(ptr, _)| ptr)
        .filter(|ptr| !consumed.iter().any(|c| covers(c, ptr)))
        .collect();

    let report = UnusedKeyReport {
        mode: mode.as_str().to_string(),
        consumed_prefixes: consumed.into_iter().map(str::to_string).collect(),
        unused_leaf_pointers: unused.into_iter().collect(),
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        let first: Vec<&String> = report.unused_leaf_pointers.iter().take(12).collect();
        bail!(
            "CONFIG_UNUSED_KEYS (mode={}): {} unused config leaf key(s). First few: {first:?}",
            report.mode,
            report.unused_leaf_pointers.len(),
        );
    }

    Ok(report)
}

/// `/payments` covers `/payments` and `/payments/endpoint`, not `/payments_old`.
fn covers(consumed: &str, leaf: &str) -> bool {
    match leaf.strip_prefix(consumed) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Every scalar in `v` with its JSON pointer. Empty containers have none.
fn leaves(v: &Value) -> Vec<(String, &Value)> {
    fn walk<'a>(v: &'a Value, at: String, out: &mut Vec<(String, &'a Value)>) {
        match v {
            Value::Object(map) => {
                for (key, child) in map {
                    let token = key.replace('~', "~0").replace('/', "~1");
                    walk(child, format!("{at}/{token}"), out);
                }
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    walk(child, format!("{at}/{i}"), out);
                }
            }
            leaf => out.push((at, leaf)),
        }
    }

    let mut out = Vec::new();
    walk(v, String::new(), &mut out);
    out
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Merged config tree plus its fingerprint.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Hex SHA-256 of `canonical_json`.
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

/// Read and merge YAML files in order (later files win).
pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let docs = paths
        .iter()
        .map(|p| fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}")))
        .collect::<Result<Vec<String>>>()?;

    let doc_refs: Vec<&str> = docs.iter().map(String::as_str).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Default::default());
    for (i, raw) in yaml_docs.iter().enumerate() {
        let layer: Value = serde_yaml::from_str::<serde_yaml::Value>(raw)
            .with_context(|| format!("invalid yaml in layer {i}"))
            .and_then(|y| serde_json::to_value(y).context("yaml->json conversion failed"))?;
        // An empty document is a no-op layer.
        if !layer.is_null() {
            overlay(&mut merged, layer);
        }
    }

    enforce_no_secret_literals(&merged)?;

    // serde_json's default map is key-ordered, so compact output is canonical.
    let canonical_json = serde_json::to_string(&merged).context("canonical json serialize failed")?;
    let config_hash = hex::encode(Sha256::digest(canonical_json.as_bytes()));

    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Merge `layer` into `base`: objects merge key by key, anything else replaces.
fn overlay(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base_map), Value::Object(layer_map)) => {
            for (key, value) in layer_map {
                match base_map.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn enforce_no_secret_literals(v: &Value) -> Result<()> {
    for (ptr, leaf) in leaves(v) {
        if leaf.as_str().is_some_and(looks_like_secret) {
            bail!("CONFIG_SECRET_DETECTED leaf={ptr} value=REDACTED");
        }
    }
    Ok(())
}

fn looks_like_secret(s: &str) -> bool {
    let t = s.trim();
    t.len() >= 8 && SECRET_PREFIXES.iter().any(|p| t.starts_with(p))
}
