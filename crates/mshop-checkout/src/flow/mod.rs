//! Checkout flow controller.
//!
//! A pure state machine over four screens. Every UI action is applied via
//! [`CheckoutFlow::apply`], which mutates the flow and returns the list of
//! [`Effect`]s the rendering side must perform. No I/O happens here, which
//! keeps the whole flow testable without a UI or a network.
//!
//! # State diagram
//!
//! ```text
//!              Buy*                      SubmitForm
//!   Selection ───────► CheckoutForm ───────────────► Pending
//!       ▲  ▲  ResumeCheckout │  ▲                      │  │
//!       │  └─────────────────┘  └────── GoBack ────────┘  │ ConfirmPayment
//!       │  CloseForm / OverlayDismiss / Abandon            ▼
//!       └──────────────────── Abandon ─────────── ExternalRedirect (term.)
//! ```

mod effects;
mod state_machine;

pub use effects::{Effect, Haptic, Screen, Tab};
pub use state_machine::{CheckoutFlow, FlowError, FlowEvent, TransitionError};

/// Alert shown when the checkout form feature is switched off.
pub const PLACEHOLDER_ALERT: &str = "Функция оплаты в разработке!";

/// Final-confirmation behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmStrategy {
    /// Open `https://t.me/<bot>?start=<payload>` and close the mini app.
    DeepLink { bot_username: String },
    /// Create a payment through the configured gateway and navigate to its URL.
    RemoteCheckout,
}

/// Feature switches for one storefront variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    pub strategy: ConfirmStrategy,
    /// `false`: buy actions show [`PLACEHOLDER_ALERT`] instead of a form.
    pub checkout_form: bool,
    /// Form opens as an overlay and freezes background scroll.
    pub overlay: bool,
}

impl FlowConfig {
    pub fn remote() -> Self {
        Self {
            strategy: ConfirmStrategy::RemoteCheckout,
            checkout_form: true,
            overlay: true,
        }
    }

    pub fn deep_link(bot_username: impl Into<String>) -> Self {
        Self {
            strategy: ConfirmStrategy::DeepLink {
                bot_username: bot_username.into(),
            },
            checkout_form: true,
            overlay: true,
        }
    }

    pub fn with_checkout_form(mut self, enabled: bool) -> Self {
        self.checkout_form = enabled;
        self
    }

    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }
}
