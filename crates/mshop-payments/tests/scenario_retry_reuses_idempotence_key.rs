//! Scenario: retries of one activation reuse its idempotency key.
//!
//! # Invariants under test
//!
//! 1. Every attempt of one `create_payment` call (first try + retries) carries
//!    the same `Idempotence-Key`.
//! 2. A second `create_payment` call gets a fresh key.

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::time::Duration;

use httpmock::prelude::*;
use mshop_payments::*;
use serde_json::json;

/// Keys seen by the mock, in arrival order. Only this test binary writes here.
static SEEN_KEYS: Mutex<Vec<String>> = Mutex::new(Vec::new());

fn record_key(req: &HttpMockRequest) -> bool {
    let key = req
        .headers
        .as_ref()
        .and_then(|hs| {
            hs.iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(IDEMPOTENCE_KEY_HEADER))
                .map(|(_, value)| value.clone())
        })
        .unwrap_or_default();
    SEEN_KEYS.lock().unwrap().push(key);
    true
}

fn distinct_keys() -> BTreeSet<String> {
    SEEN_KEYS.lock().unwrap().iter().cloned().collect()
}

#[tokio::test]
async fn retries_share_one_key_and_next_activation_gets_new_one() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/create-payment").matches(record_key);
            then.status(503).json_body(json!({"detail": "busy"}));
        })
        .await;

    let gateway = HttpPaymentGateway::new(
        GatewaySettings::new(server.url("/create-payment")).with_retry(RetryPolicy {
            max_retries: 2,
            backoff: Duration::from_millis(10),
        }),
    )
    .expect("gateway settings must be valid");

    let req = PaymentRequest {
        amount: 390,
        email: "a@b.com".into(),
        description: "Подписка Старт".into(),
        user_id: 42,
    };

    let err = gateway.create_payment(&req).await.unwrap_err();
    assert!(matches!(err, PaymentError::Api { status: 503, .. }));
    assert_eq!(mock.hits_async().await, 3, "1 attempt + 2 retries");

    let first = distinct_keys();
    assert_eq!(first.len(), 1, "all attempts must carry one key: {first:?}");
    let first_key = first.iter().next().cloned().unwrap();
    assert!(!first_key.is_empty(), "key header must be present");

    gateway.create_payment(&req).await.unwrap_err();
    assert_eq!(mock.hits_async().await, 6);

    let all = distinct_keys();
    assert_eq!(all.len(), 2, "second activation must use a new key: {all:?}");
    assert!(all.contains(&first_key));
}
