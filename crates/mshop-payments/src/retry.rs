use std::time::Duration;

use crate::PaymentError;

pub const MIN_TIMEOUT: Duration = Duration::from_millis(100);
pub const MAX_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_RETRIES_CAP: u32 = 5;

/// Bounded retry for one payment activation.
///
/// `max_retries = 0` means a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Fixed pause between attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    pub fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Everything the HTTP gateway needs to reach the payment-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    pub endpoint: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl GatewaySettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::none(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.endpoint.trim().is_empty() {
            return Err(PaymentError::Config("payments.endpoint is empty".into()));
        }
        if self.timeout < MIN_TIMEOUT || self.timeout > MAX_TIMEOUT {
            return Err(PaymentError::Config(format!(
                "payments.timeout_ms must be within {}..={} (got {})",
                MIN_TIMEOUT.as_millis(),
                MAX_TIMEOUT.as_millis(),
                self.timeout.as_millis()
            )));
        }
        if self.retry.max_retries > MAX_RETRIES_CAP {
            return Err(PaymentError::Config(format!(
                "payments.retry.max_retries must be <= {MAX_RETRIES_CAP} (got {})",
                self.retry.max_retries
            )));
        }
        Ok(())
    }
}
