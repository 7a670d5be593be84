//! mshop-payments
//!
//! Transport for the remote-checkout confirmation strategy.
//!
//! This crate owns the gateway abstraction and the concrete HTTP gateway.
//! It knows nothing about screens or orders; the checkout flow builds a
//! [`PaymentRequest`] and hands it over.

mod error;
mod http;
mod retry;

pub use error::PaymentError;
pub use http::{HttpPaymentGateway, IDEMPOTENCE_KEY_HEADER};
pub use retry::{
    GatewaySettings, RetryPolicy, DEFAULT_TIMEOUT, MAX_RETRIES_CAP, MAX_TIMEOUT, MIN_TIMEOUT,
};

use serde::{Deserialize, Serialize};

/// Body of `POST <endpoint>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Whole roubles.
    pub amount: u64,
    pub email: String,
    pub description: String,
    /// Platform user id. Sent as `telegram_id` on the wire.
    #[serde(rename = "telegram_id")]
    pub user_id: i64,
}

/// Successful payment creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRedirect {
    /// Where the browser must navigate next.
    pub url: String,
    pub payment_id: Option<String>,
}

/// Payment-creation endpoint contract.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn create_payment(&self, req: &PaymentRequest) -> Result<PaymentRedirect, PaymentError>;
}

/// Mask an e-mail for logs: `alice@b.com` -> `a***@b.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        None if email.is_empty() => String::new(),
        None => "***".to_string(),
    }
}
