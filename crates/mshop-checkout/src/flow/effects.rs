use mshop_payments::PaymentRequest;
use mshop_pricing::Plan;

use crate::view::{CalculatorView, FormView, PendingSummary};

/// Observable screens, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Selection,
    CheckoutForm,
    Pending,
    ExternalRedirect,
}

/// Tabs of the selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Subscriptions,
    Tokens,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Haptic {
    Light,
    Medium,
    SelectionChanged,
}

/// Side effects requested by a transition.
///
/// The state machine never performs these itself; the driver applies them in
/// order against the host bridge and presenter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ShowScreen(Screen),
    RenderTab(Tab),
    RenderActivePlan(Plan),
    RenderCalculator(CalculatorView),
    RenderForm(FormView),
    RenderSummary(PendingSummary),
    SetPayEnabled(bool),
    Haptic(Haptic),
    Alert(String),
    /// Freeze background scroll at its current offset.
    LockScroll,
    /// Restore the offset saved by the matching `LockScroll`.
    UnlockScroll,
    /// Send this request to the payment gateway and feed the outcome back as
    /// [`FlowEvent::PaymentCompleted`](super::FlowEvent::PaymentCompleted).
    SubmitPayment(PaymentRequest),
    OpenDeepLink(String),
    CloseApp,
    Navigate(String),
}
