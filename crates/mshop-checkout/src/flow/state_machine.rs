use mshop_payments::{PaymentError, PaymentRedirect, PaymentRequest};
use mshop_pricing::{compute_pricing, compute_pricing_from_input, Plan, TokenQuote};
use tracing::debug;

use super::effects::{Effect, Haptic, Screen, Tab};
use super::{ConfirmStrategy, FlowConfig, PLACEHOLDER_ALERT};
use crate::deeplink;
use crate::order::{CheckoutForm, Order, OrderSlot};
use crate::view::{CalculatorView, FormView, PendingSummary};

const DEFAULT_PLAN: Plan = Plan::Optimal;
const DEFAULT_TOKEN_REQUEST: f64 = 500.0;

// ---------------------------------------------------------------------------
// FlowEvent
// ---------------------------------------------------------------------------

/// User actions and async completions that drive the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    SelectTab(Tab),
    SelectPlan(Plan),
    /// Slider / stepper value.
    SetTokenAmount(f64),
    /// Raw text typed into the amount field.
    TokenInput(String),
    SelectPreset(u32),
    /// Buy the active plan.
    BuySubscription,
    /// Buy the current calculator quote.
    BuyTokens,
    /// Reopen the form for the order still held in the slot.
    ResumeCheckout,
    CloseForm,
    OverlayDismiss,
    SubmitForm(CheckoutForm),
    GoBack,
    /// Leave the flow and discard the order.
    Abandon,
    ConfirmPayment,
    PaymentCompleted(Result<PaymentRedirect, PaymentError>),
}

impl FlowEvent {
    /// Stable name for logs and errors (never includes user data).
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::SelectTab(_) => "SelectTab",
            FlowEvent::SelectPlan(_) => "SelectPlan",
            FlowEvent::SetTokenAmount(_) => "SetTokenAmount",
            FlowEvent::TokenInput(_) => "TokenInput",
            FlowEvent::SelectPreset(_) => "SelectPreset",
            FlowEvent::BuySubscription => "BuySubscription",
            FlowEvent::BuyTokens => "BuyTokens",
            FlowEvent::ResumeCheckout => "ResumeCheckout",
            FlowEvent::CloseForm => "CloseForm",
            FlowEvent::OverlayDismiss => "OverlayDismiss",
            FlowEvent::SubmitForm(_) => "SubmitForm",
            FlowEvent::GoBack => "GoBack",
            FlowEvent::Abandon => "Abandon",
            FlowEvent::ConfirmPayment => "ConfirmPayment",
            FlowEvent::PaymentCompleted(_) => "PaymentCompleted",
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Returned when an event cannot legally be applied on the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    pub from: Screen,
    pub event: &'static str,
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "illegal checkout transition: {:?} + {}", self.from, self.event)
    }
}

impl std::error::Error for TransitionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    Transition(TransitionError),
    /// Pay control activated while a payment request is outstanding.
    PaymentInFlight,
    /// A payment outcome arrived with no request outstanding.
    NoPaymentInFlight,
}

impl std::fmt::Display for FlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowError::Transition(e) => e.fmt(f),
            FlowError::PaymentInFlight => write!(f, "payment already in flight"),
            FlowError::NoPaymentInFlight => write!(f, "no payment in flight"),
        }
    }
}

impl std::error::Error for FlowError {}

impl From<TransitionError> for FlowError {
    fn from(e: TransitionError) -> Self {
        FlowError::Transition(e)
    }
}

// ---------------------------------------------------------------------------
// CheckoutFlow
// ---------------------------------------------------------------------------

/// Owns the current screen, the selection state and the single order slot.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    config: FlowConfig,
    user_id: Option<i64>,
    screen: Screen,
    tab: Tab,
    active_plan: Plan,
    token_quote: TokenQuote,
    orders: OrderSlot,
    scroll_locked: bool,
    payment_in_flight: bool,
}

impl CheckoutFlow {
    /// `user_id` is the platform identity; required only by remote checkout.
    pub fn new(config: FlowConfig, user_id: Option<i64>) -> Self {
        Self {
            config,
            user_id,
            screen: Screen::Selection,
            tab: Tab::Subscriptions,
            active_plan: DEFAULT_PLAN,
            token_quote: compute_pricing(DEFAULT_TOKEN_REQUEST),
            orders: OrderSlot::new(),
            scroll_locked: false,
            payment_in_flight: false,
        }
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn active_plan(&self) -> Plan {
        self.active_plan
    }

    pub fn token_quote(&self) -> TokenQuote {
        self.token_quote
    }

    pub fn order(&self) -> Option<&Order> {
        self.orders.current()
    }

    pub fn is_payment_in_flight(&self) -> bool {
        self.payment_in_flight
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Effects that paint the initial selection screen.
    pub fn initial_effects(&self) -> Vec<Effect> {
        vec![
            Effect::ShowScreen(Screen::Selection),
            Effect::RenderTab(self.tab),
            Effect::RenderActivePlan(self.active_plan),
            Effect::RenderCalculator(CalculatorView::from(self.token_quote)),
            Effect::SetPayEnabled(true),
        ]
    }

    /// Apply one event.
    ///
    /// # Errors
    /// [`FlowError::Transition`] for events that make no sense on the current
    /// screen; the flow is left unchanged. Payment guard violations return
    /// [`FlowError::PaymentInFlight`] / [`FlowError::NoPaymentInFlight`].
    pub fn apply(&mut self, event: FlowEvent) -> Result<Vec<Effect>, FlowError> {
        use FlowEvent::*;

        let name = event.name();
        let from = self.screen;

        let effects = match (from, event) {
            // ------------------------------------------------------------------
            // Selection: tab strip, plan cards, token calculator.
            // ------------------------------------------------------------------
            (Screen::Selection, SelectTab(tab)) => {
                self.tab = tab;
                vec![Effect::Haptic(Haptic::SelectionChanged), Effect::RenderTab(tab)]
            }
            (Screen::Selection, SelectPlan(plan)) => {
                self.active_plan = plan;
                vec![
                    Effect::Haptic(Haptic::SelectionChanged),
                    Effect::RenderActivePlan(plan),
                ]
            }
            (Screen::Selection, SetTokenAmount(requested)) => self.requote(compute_pricing(requested)),
            (Screen::Selection, TokenInput(raw)) => self.requote(compute_pricing_from_input(&raw)),
            (Screen::Selection, SelectPreset(amount)) => {
                self.token_quote = compute_pricing(f64::from(amount));
                vec![
                    Effect::Haptic(Haptic::SelectionChanged),
                    Effect::RenderCalculator(CalculatorView::from(self.token_quote)),
                ]
            }
            (Screen::Selection, BuySubscription) => self.buy(Order::subscription(self.active_plan)),
            (Screen::Selection, BuyTokens) => self.buy(Order::tokens(f64::from(self.token_quote.amount))),
            (Screen::Selection, ResumeCheckout) => {
                if self.orders.is_empty() {
                    Vec::new()
                } else {
                    let mut fx = vec![Effect::Haptic(Haptic::Medium)];
                    fx.extend(self.open_form());
                    fx
                }
            }

            // ------------------------------------------------------------------
            // CheckoutForm: every exit releases the scroll lock.
            // ------------------------------------------------------------------
            (Screen::CheckoutForm, CloseForm | OverlayDismiss) => {
                let mut fx = self.release_scroll();
                self.screen = Screen::Selection;
                fx.push(Effect::ShowScreen(Screen::Selection));
                fx
            }
            (Screen::CheckoutForm, SubmitForm(form)) => {
                let Some(order) = self.orders.current_mut() else {
                    return Ok(Vec::new());
                };
                order.set_details(form.into());
                let summary = PendingSummary::from(&*order);

                let mut fx = vec![Effect::Haptic(Haptic::Light)];
                fx.extend(self.release_scroll());
                self.screen = Screen::Pending;
                fx.push(Effect::RenderSummary(summary));
                fx.push(Effect::ShowScreen(Screen::Pending));
                fx.push(Effect::SetPayEnabled(true));
                fx
            }
            (Screen::CheckoutForm, Abandon) => self.abandon(),

            // ------------------------------------------------------------------
            // Pending: back, abandon, confirm, async completion.
            // ------------------------------------------------------------------
            (Screen::Pending, GoBack | Abandon | ConfirmPayment) if self.payment_in_flight => {
                return Err(FlowError::PaymentInFlight);
            }
            (Screen::Pending, GoBack) => {
                let mut fx = vec![Effect::Haptic(Haptic::Light)];
                fx.extend(self.open_form());
                fx
            }
            (Screen::Pending, Abandon) => self.abandon(),
            (Screen::Pending, ConfirmPayment) => self.confirm(),
            (Screen::Pending, PaymentCompleted(outcome)) => self.complete_payment(outcome)?,
            (_, PaymentCompleted(_)) => return Err(FlowError::NoPaymentInFlight),

            (from, _) => return Err(TransitionError { from, event: name }.into()),
        };

        if from != self.screen {
            debug!(from = ?from, to = ?self.screen, event = name, "checkout transition");
        }

        Ok(effects)
    }

    fn requote(&mut self, quote: TokenQuote) -> Vec<Effect> {
        let changed = quote.amount != self.token_quote.amount;
        self.token_quote = quote;

        let mut fx = Vec::with_capacity(2);
        if changed {
            fx.push(Effect::Haptic(Haptic::SelectionChanged));
        }
        fx.push(Effect::RenderCalculator(CalculatorView::from(quote)));
        fx
    }

    fn buy(&mut self, order: Order) -> Vec<Effect> {
        if !self.config.checkout_form {
            return vec![
                Effect::Haptic(Haptic::Medium),
                Effect::Alert(PLACEHOLDER_ALERT.to_string()),
            ];
        }

        self.orders.replace(order);
        let mut fx = vec![Effect::Haptic(Haptic::Medium)];
        fx.extend(self.open_form());
        fx
    }

    fn open_form(&mut self) -> Vec<Effect> {
        let mut fx = Vec::with_capacity(3);
        if self.config.overlay && !self.scroll_locked {
            self.scroll_locked = true;
            fx.push(Effect::LockScroll);
        }
        if let Some(order) = self.orders.current() {
            fx.push(Effect::RenderForm(FormView::from(order)));
        }
        self.screen = Screen::CheckoutForm;
        fx.push(Effect::ShowScreen(Screen::CheckoutForm));
        fx
    }

    fn release_scroll(&mut self) -> Vec<Effect> {
        if self.scroll_locked {
            self.scroll_locked = false;
            vec![Effect::UnlockScroll]
        } else {
            Vec::new()
        }
    }

    fn abandon(&mut self) -> Vec<Effect> {
        self.orders.clear();
        let mut fx = self.release_scroll();
        self.screen = Screen::Selection;
        fx.push(Effect::ShowScreen(Screen::Selection));
        fx
    }

    fn confirm(&mut self) -> Vec<Effect> {
        let Some(order) = self.orders.current() else {
            return Vec::new();
        };

        match &self.config.strategy {
            ConfirmStrategy::DeepLink { bot_username } => {
                let link = deeplink::deep_link(bot_username, order);
                self.screen = Screen::ExternalRedirect;
                vec![
                    Effect::Haptic(Haptic::Light),
                    Effect::OpenDeepLink(link),
                    Effect::CloseApp,
                    Effect::ShowScreen(Screen::ExternalRedirect),
                ]
            }
            ConfirmStrategy::RemoteCheckout => {
                let Some(user_id) = self.user_id else {
                    return vec![
                        Effect::Haptic(Haptic::Light),
                        Effect::Alert(PaymentError::MissingIdentity.user_message()),
                        Effect::SetPayEnabled(true),
                    ];
                };

                let req = PaymentRequest {
                    amount: order.price().amount(),
                    email: order
                        .details()
                        .map(|d| d.contact_email.clone())
                        .unwrap_or_default(),
                    description: order.description(),
                    user_id,
                };
                self.payment_in_flight = true;
                vec![
                    Effect::Haptic(Haptic::Light),
                    Effect::SetPayEnabled(false),
                    Effect::SubmitPayment(req),
                ]
            }
        }
    }

    fn complete_payment(
        &mut self,
        outcome: Result<PaymentRedirect, PaymentError>,
    ) -> Result<Vec<Effect>, FlowError> {
        if !self.payment_in_flight {
            return Err(FlowError::NoPaymentInFlight);
        }
        self.payment_in_flight = false;

        Ok(match outcome {
            Ok(redirect) => {
                self.screen = Screen::ExternalRedirect;
                vec![
                    Effect::Navigate(redirect.url),
                    Effect::ShowScreen(Screen::ExternalRedirect),
                ]
            }
            Err(err) => vec![Effect::Alert(err.user_message()), Effect::SetPayEnabled(true)],
        })
    }
}
