use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// PaymentError
// ---------------------------------------------------------------------------

/// Errors a [`PaymentGateway`](crate::PaymentGateway) may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// No platform user id is available; the request was never sent.
    MissingIdentity,
    /// Network or connection failure before a response arrived.
    Transport(String),
    /// No complete response within the configured timeout.
    Timeout(Duration),
    /// Endpoint answered with a non-2xx status.
    Api { status: u16, message: String },
    /// 2xx response that does not honour the contract (bad JSON, missing `payment_url`).
    Protocol(String),
    /// Gateway settings are unusable (bad endpoint URL, out-of-range timeout, ...).
    Config(String),
}

impl PaymentError {
    /// Transport failures, timeouts and 5xx answers may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            PaymentError::Transport(_) | PaymentError::Timeout(_) => true,
            PaymentError::Api { status, .. } => *status >= 500,
            PaymentError::MissingIdentity
            | PaymentError::Protocol(_)
            | PaymentError::Config(_) => false,
        }
    }

    /// Text shown to the user in the alert dialog.
    ///
    /// Carries the endpoint's own message whenever one was returned.
    pub fn user_message(&self) -> String {
        match self {
            PaymentError::MissingIdentity => {
                "Не удалось определить пользователя. Откройте магазин из бота.".to_string()
            }
            PaymentError::Transport(msg) => format!("Сервер оплаты недоступен: {msg}"),
            PaymentError::Timeout(d) => format!(
                "Сервер оплаты не ответил за {} с. Попробуйте ещё раз.",
                d.as_secs_f64()
            ),
            PaymentError::Api { message, .. } => format!("Ошибка оплаты: {message}"),
            PaymentError::Protocol(msg) => format!("Некорректный ответ сервера оплаты: {msg}"),
            PaymentError::Config(msg) => format!("Оплата не настроена: {msg}"),
        }
    }
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentError::MissingIdentity => write!(f, "missing platform user id"),
            PaymentError::Transport(msg) => write!(f, "transport error: {msg}"),
            PaymentError::Timeout(d) => write!(f, "payment endpoint timed out after {d:?}"),
            PaymentError::Api { status, message } => {
                write!(f, "payment api error status={status}: {message}")
            }
            PaymentError::Protocol(msg) => write!(f, "protocol error: {msg}"),
            PaymentError::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for PaymentError {}
