use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use mshop_checkout::{
    CheckoutForm, FlowConfig, FlowEvent, PlatformUser, Screen, Storefront, Tab,
};
use mshop_config::{
    load_layered_yaml, report_unused_keys, ConfirmMode, PaymentsSettings, StorefrontSettings,
    UnusedKeyPolicy,
};
use mshop_payments::{GatewaySettings, HttpPaymentGateway, RetryPolicy};
use mshop_pricing::Plan;
use tracing::{info, warn};

use crate::terminal::{TerminalHost, TerminalPresenter};

pub const ENV_CONFIG: &str = "MSHOP_CONFIG";

pub struct CheckoutArgs {
    pub config_paths: Vec<String>,
    pub plan: Option<Plan>,
    pub tokens: Option<String>,
    pub email: String,
    pub method: String,
    pub currency: String,
    pub user_id: Option<i64>,
    pub strict_config: bool,
}

pub async fn run(args: CheckoutArgs) -> Result<()> {
    let paths = resolve_config_paths(args.config_paths)?;
    let path_refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    let loaded = load_layered_yaml(&path_refs)?;
    info!(config_hash = %loaded.config_hash, "config loaded");

    let settings = StorefrontSettings::from_config_json(&loaded.config_json)
        .context("invalid storefront config")?;

    let policy = if args.strict_config {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = report_unused_keys(settings.confirm_mode, &loaded.config_json, policy)?;
    for pointer in &report.unused_leaf_pointers {
        warn!(mode = %report.mode, pointer = %pointer, "unused config key");
    }

    let user = args.user_id.map(|id| PlatformUser {
        id,
        ..Default::default()
    });

    let mut storefront = Storefront::new(
        flow_config(&settings)?,
        TerminalHost::new(user),
        TerminalPresenter,
    );
    if let Some(payments) = &settings.payments {
        let gateway = HttpPaymentGateway::new(gateway_settings(payments))?;
        storefront = storefront.with_gateway(Arc::new(gateway));
    }
    storefront.boot();

    let (tab, pick, buy) = match (args.plan, args.tokens) {
        (Some(plan), _) => (
            Tab::Subscriptions,
            FlowEvent::SelectPlan(plan),
            FlowEvent::BuySubscription,
        ),
        (None, Some(raw)) => (Tab::Tokens, FlowEvent::TokenInput(raw), FlowEvent::BuyTokens),
        (None, None) => bail!("either --plan or --tokens is required"),
    };

    storefront.dispatch(FlowEvent::SelectTab(tab)).await?;
    storefront.dispatch(pick).await?;
    storefront.dispatch(buy).await?;
    if storefront.flow().screen() != Screen::CheckoutForm {
        bail!("checkout form is disabled in this configuration");
    }

    storefront
        .dispatch(FlowEvent::SubmitForm(CheckoutForm {
            email: args.email,
            method: args.method,
            currency: args.currency,
        }))
        .await?;
    storefront.dispatch(FlowEvent::ConfirmPayment).await?;

    match storefront.flow().screen() {
        Screen::ExternalRedirect => Ok(()),
        other => bail!("checkout did not complete (screen={other:?})"),
    }
}

fn resolve_config_paths(from_args: Vec<String>) -> Result<Vec<String>> {
    if !from_args.is_empty() {
        return Ok(from_args);
    }
    let raw = std::env::var(ENV_CONFIG)
        .with_context(|| format!("no --config given and {ENV_CONFIG} is not set"))?;
    let paths: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    if paths.is_empty() {
        bail!("{ENV_CONFIG} is set but lists no paths");
    }
    Ok(paths)
}

fn flow_config(settings: &StorefrontSettings) -> Result<FlowConfig> {
    let base = match settings.confirm_mode {
        ConfirmMode::Remote => FlowConfig::remote(),
        ConfirmMode::DeepLink => {
            let bot = settings
                .bot_username
                .as_deref()
                .context("storefront.bot_username is required for deep_link")?;
            FlowConfig::deep_link(bot)
        }
    };
    Ok(base
        .with_checkout_form(settings.checkout_form)
        .with_overlay(settings.overlay))
}

fn gateway_settings(p: &PaymentsSettings) -> GatewaySettings {
    GatewaySettings::new(p.endpoint.clone())
        .with_timeout(Duration::from_millis(p.timeout_ms))
        .with_retry(RetryPolicy {
            max_retries: p.max_retries,
            backoff: Duration::from_millis(p.backoff_ms),
        })
}
