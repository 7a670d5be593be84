use std::collections::VecDeque;
use std::sync::Mutex;

use mshop_payments::{PaymentError, PaymentGateway, PaymentRedirect, PaymentRequest};

/// Minimal fake gateway used ONLY for tests.
///
/// Pops one scripted outcome per call. An exhausted script answers with a
/// transport error so a missing expectation shows up as a failed payment.
#[derive(Default)]
pub struct FakeGateway {
    script: Mutex<VecDeque<Result<PaymentRedirect, PaymentError>>>,
    requests: Mutex<Vec<PaymentRequest>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(self, outcome: Result<PaymentRedirect, PaymentError>) -> Self {
        self.lock_script().push_back(outcome);
        self
    }

    /// Gateway that always returns this URL once.
    pub fn redirecting_to(url: &str) -> Self {
        Self::new().with_outcome(Ok(PaymentRedirect {
            url: url.to_string(),
            payment_id: None,
        }))
    }

    pub fn requests(&self) -> Vec<PaymentRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<PaymentRedirect, PaymentError>>> {
        self.script
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl PaymentGateway for FakeGateway {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn create_payment(&self, req: &PaymentRequest) -> Result<PaymentRedirect, PaymentError> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(req.clone());
        }
        self.lock_script()
            .pop_front()
            .unwrap_or_else(|| Err(PaymentError::Transport("fake gateway script exhausted".into())))
    }
}
