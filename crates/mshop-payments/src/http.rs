//! HTTP payment gateway.
//!
//! One activation = one idempotency key. Every attempt (first try and each
//! retry) carries the same key so the endpoint can deduplicate.
//!
//! Each attempt is bounded by `settings.timeout`, covering connect, send and
//! full body read. Expiry surfaces as [`PaymentError::Timeout`].

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    mask_email, GatewaySettings, PaymentError, PaymentGateway, PaymentRedirect, PaymentRequest,
};

pub const IDEMPOTENCE_KEY_HEADER: &str = "Idempotence-Key";

#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    http: reqwest::Client,
    endpoint: reqwest::Url,
    settings: GatewaySettings,
}

impl HttpPaymentGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, PaymentError> {
        settings.validate()?;

        let endpoint = reqwest::Url::parse(settings.endpoint.trim()).map_err(|e| {
            PaymentError::Config(format!("invalid payments.endpoint '{}': {e}", settings.endpoint))
        })?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| PaymentError::Config(format!("http client init failed: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            settings,
        })
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    async fn attempt(
        &self,
        req: &PaymentRequest,
        key: &str,
    ) -> Result<PaymentRedirect, PaymentError> {
        let exchange = async {
            let resp = self
                .http
                .post(self.endpoint.clone())
                .header(IDEMPOTENCE_KEY_HEADER, key)
                .json(req)
                .send()
                .await
                .map_err(|e| PaymentError::Transport(e.to_string()))?;

            let status = resp.status();
            let body = resp
                .bytes()
                .await
                .map_err(|e| PaymentError::Transport(format!("body read failed: {e}")))?;

            Ok::<_, PaymentError>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.settings.timeout, exchange)
            .await
            .map_err(|_| PaymentError::Timeout(self.settings.timeout))??;

        decode_response(status, &body)
    }
}

#[async_trait::async_trait]
impl PaymentGateway for HttpPaymentGateway {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn create_payment(&self, req: &PaymentRequest) -> Result<PaymentRedirect, PaymentError> {
        let key = uuid::Uuid::new_v4().to_string();
        let attempts = self.settings.retry.total_attempts();

        info!(
            amount = req.amount,
            email = %mask_email(&req.email),
            user_id = req.user_id,
            key = %key,
            "creating payment"
        );

        let mut attempt = 1;
        loop {
            match self.attempt(req, &key).await {
                Ok(redirect) => {
                    info!(
                        attempt,
                        payment_id = redirect.payment_id.as_deref().unwrap_or("-"),
                        "payment created"
                    );
                    return Ok(redirect);
                }
                Err(err) if err.is_retryable() && attempt < attempts => {
                    warn!(attempt, attempts, error = %err, "payment attempt failed; retrying");
                    if !self.settings.retry.backoff.is_zero() {
                        tokio::time::sleep(self.settings.retry.backoff).await;
                    }
                    attempt += 1;
                }
                Err(err) => {
                    warn!(attempt, error = %err, "payment creation failed");
                    return Err(err);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Wire decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SuccessBody {
    payment_url: Option<String>,
    payment_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

fn decode_response(status: reqwest::StatusCode, body: &[u8]) -> Result<PaymentRedirect, PaymentError> {
    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .map(|d| match d {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        return Err(PaymentError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let parsed: SuccessBody = serde_json::from_slice(body)
        .map_err(|e| PaymentError::Protocol(format!("malformed response body: {e}")))?;

    let url = parsed
        .payment_url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| PaymentError::Protocol("response missing payment_url".into()))?;

    reqwest::Url::parse(&url)
        .map_err(|e| PaymentError::Protocol(format!("payment_url is not a url: {e}")))?;

    debug!(url = %url, "payment redirect decoded");

    Ok(PaymentRedirect {
        url,
        payment_id: parsed.payment_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn error_detail_string_is_surfaced() {
        let err = decode_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"detail":"insufficient config"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PaymentError::Api {
                status: 500,
                message: "insufficient config".into()
            }
        );
    }

    #[test]
    fn error_without_detail_falls_back_to_status() {
        let err = decode_response(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>").unwrap_err();
        assert_eq!(
            err,
            PaymentError::Api {
                status: 502,
                message: "HTTP 502".into()
            }
        );
    }

    #[test]
    fn structured_detail_is_stringified() {
        let err = decode_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#,
        )
        .unwrap_err();
        match err {
            PaymentError::Api { status, message } => {
                assert_eq!(status, 422);
                assert!(message.contains("field required"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn success_without_url_is_protocol_error() {
        let err = decode_response(StatusCode::OK, br#"{"payment_id":"p1"}"#).unwrap_err();
        assert!(matches!(err, PaymentError::Protocol(_)));

        let err = decode_response(StatusCode::OK, b"not json").unwrap_err();
        assert!(matches!(err, PaymentError::Protocol(_)));
    }

    #[test]
    fn success_with_url_decodes() {
        let ok = decode_response(
            StatusCode::OK,
            br#"{"payment_url":"https://pay.example/x","payment_id":"p1"}"#,
        )
        .unwrap();
        assert_eq!(ok.url, "https://pay.example/x");
        assert_eq!(ok.payment_id.as_deref(), Some("p1"));
    }

    #[test]
    fn invalid_endpoint_is_config_error() {
        let err = HttpPaymentGateway::new(GatewaySettings::new("not a url")).unwrap_err();
        assert!(matches!(err, PaymentError::Config(_)));
    }
}
