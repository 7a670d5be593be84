//! Typed view over the merged config tree.
//!
//! Keys are read by JSON pointer. Missing optional keys take the defaults
//! below; present keys of the wrong type are errors, not defaults.

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;
use std::ops::RangeInclusive;
use std::str::FromStr;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const TIMEOUT_MS_RANGE: RangeInclusive<u64> = 100..=60_000;
pub const MAX_RETRIES: u32 = 5;
pub const DEFAULT_BACKOFF_MS: u64 = 250;

/// How the pending order is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmMode {
    /// POST to the payment endpoint and redirect to the returned URL.
    Remote,
    /// Hand the order to the bot through a start link.
    DeepLink,
}

impl ConfirmMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmMode::Remote => "REMOTE",
            ConfirmMode::DeepLink => "DEEP_LINK",
        }
    }
}

impl FromStr for ConfirmMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(ConfirmMode::Remote),
            "deep_link" => Ok(ConfirmMode::DeepLink),
            other => Err(anyhow!(
                "storefront.confirm_strategy must be 'remote' or 'deep_link' (got '{other}')"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentsSettings {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub backoff_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontSettings {
    pub confirm_mode: ConfirmMode,
    pub checkout_form: bool,
    pub overlay: bool,
    /// Without the leading `@`. Present whenever `confirm_mode` is `DeepLink`.
    pub bot_username: Option<String>,
    /// Present whenever `confirm_mode` is `Remote`.
    pub payments: Option<PaymentsSettings>,
}

impl StorefrontSettings {
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let confirm_mode = match cfg.pointer("/storefront/confirm_strategy") {
            None | Some(Value::Null) => ConfirmMode::Remote,
            Some(Value::String(s)) => s.parse()?,
            Some(other) => bail!("storefront.confirm_strategy must be a string (got {other})"),
        };

        let checkout_form = read_bool(cfg, "/storefront/checkout_form", true)?;
        let overlay = read_bool(cfg, "/storefront/overlay", true)?;

        let bot_username = match cfg.pointer("/storefront/bot_username") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => {
                Some(s.trim().trim_start_matches('@').to_string()).filter(|s| !s.is_empty())
            }
            Some(other) => bail!("storefront.bot_username must be a string (got {other})"),
        };

        let payments = match confirm_mode {
            ConfirmMode::Remote => Some(read_payments(cfg)?),
            ConfirmMode::DeepLink => {
                if bot_username.is_none() {
                    bail!("storefront.bot_username is required when confirm_strategy = deep_link");
                }
                None
            }
        };

        Ok(Self {
            confirm_mode,
            checkout_form,
            overlay,
            bot_username,
            payments,
        })
    }
}

fn read_payments(cfg: &Value) -> Result<PaymentsSettings> {
    let endpoint = match cfg.pointer("/payments/endpoint") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            bail!("config missing payments.endpoint (required when confirm_strategy = remote)")
        }
        Some(other) => bail!("payments.endpoint must be a string (got {other})"),
    };

    let timeout_ms = read_u64(cfg, "/payments/timeout_ms", DEFAULT_TIMEOUT_MS)?;
    if !TIMEOUT_MS_RANGE.contains(&timeout_ms) {
        bail!(
            "payments.timeout_ms out of bounds ({}..={}): {timeout_ms}",
            TIMEOUT_MS_RANGE.start(),
            TIMEOUT_MS_RANGE.end()
        );
    }

    let max_retries = read_u64(cfg, "/payments/retry/max_retries", 0)?;
    if max_retries > u64::from(MAX_RETRIES) {
        bail!("payments.retry.max_retries out of bounds (0..={MAX_RETRIES}): {max_retries}");
    }

    let backoff_ms = read_u64(cfg, "/payments/retry/backoff_ms", DEFAULT_BACKOFF_MS)?;

    Ok(PaymentsSettings {
        endpoint,
        timeout_ms,
        // Bounded by MAX_RETRIES above.
        max_retries: max_retries as u32,
        backoff_ms,
    })
}

fn read_bool(cfg: &Value, ptr: &str, default: bool) -> Result<bool> {
    match cfg.pointer(ptr) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => bail!("{} must be a boolean (got {other})", dotted(ptr)),
    }
}

/// Accepts a non-negative integer or a string holding one.
fn read_u64(cfg: &Value, ptr: &str, default: u64) -> Result<u64> {
    match cfg.pointer(ptr) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| anyhow!("{} must be a non-negative integer (got {n})", dotted(ptr))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{} must be a non-negative integer (got '{s}')", dotted(ptr))),
        Some(other) => bail!("{} must be a non-negative integer (got {other})", dotted(ptr)),
    }
}

/// `/payments/retry/max_retries` -> `payments.retry.max_retries`
fn dotted(ptr: &str) -> String {
    ptr.trim_start_matches('/').replace('/', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn remote_defaults() {
        let s = StorefrontSettings::from_config_json(&json!({
            "payments": {"endpoint": "http://127.0.0.1:8000/create-payment"}
        }))
        .unwrap();
        assert_eq!(s.confirm_mode, ConfirmMode::Remote);
        assert!(s.checkout_form);
        assert!(s.overlay);
        let p = s.payments.unwrap();
        assert_eq!(p.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(p.max_retries, 0);
        assert_eq!(p.backoff_ms, DEFAULT_BACKOFF_MS);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let s = StorefrontSettings::from_config_json(&json!({
            "payments": {"endpoint": "http://x", "timeout_ms": "2500", "retry": {"max_retries": "2"}}
        }))
        .unwrap();
        let p = s.payments.unwrap();
        assert_eq!(p.timeout_ms, 2500);
        assert_eq!(p.max_retries, 2);
    }

    #[test]
    fn wrong_type_is_an_error_not_a_default() {
        let err = StorefrontSettings::from_config_json(&json!({
            "storefront": {"overlay": "yes"},
            "payments": {"endpoint": "http://x"}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("storefront.overlay"));
    }

    #[test]
    fn endpoint_of_wrong_type_is_a_type_error() {
        let err = StorefrontSettings::from_config_json(&json!({
            "payments": {"endpoint": 8000}
        }))
        .unwrap_err()
        .to_string();
        assert!(err.contains("payments.endpoint must be a string"), "{err}");
        assert!(!err.contains("missing"), "{err}");

        let err = StorefrontSettings::from_config_json(&json!({
            "payments": {"endpoint": "  "}
        }))
        .unwrap_err()
        .to_string();
        assert!(err.contains("missing payments.endpoint"), "{err}");
    }

    #[test]
    fn deep_link_strips_at_and_skips_payments() {
        let s = StorefrontSettings::from_config_json(&json!({
            "storefront": {"confirm_strategy": "deep_link", "bot_username": "@ShopBot"}
        }))
        .unwrap();
        assert_eq!(s.bot_username.as_deref(), Some("ShopBot"));
        assert!(s.payments.is_none());
    }
}
