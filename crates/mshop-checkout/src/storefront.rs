//! Storefront driver: runs the pure [`CheckoutFlow`] against a host bridge,
//! a presenter and (for remote checkout) a payment gateway.
//!
//! Events are handled to completion one at a time. The only suspension point
//! is the gateway call issued for [`Effect::SubmitPayment`]; its outcome is
//! fed straight back into the flow before `dispatch` returns.

use std::collections::VecDeque;
use std::sync::Arc;

use mshop_payments::{mask_email, PaymentError, PaymentGateway};
use tracing::{debug, info, warn};

use crate::flow::{CheckoutFlow, Effect, FlowConfig, FlowError, FlowEvent};
use crate::host::{HostBridge, Presenter};
use crate::profile::ProfileView;
use crate::scroll::ScrollLock;

pub struct Storefront<H, P> {
    flow: CheckoutFlow,
    host: H,
    presenter: P,
    gateway: Option<Arc<dyn PaymentGateway>>,
    scroll: ScrollLock,
}

impl<H: HostBridge, P: Presenter> Storefront<H, P> {
    /// The platform user id is read once from the host here.
    pub fn new(config: FlowConfig, host: H, presenter: P) -> Self {
        let user_id = host.user().map(|u| u.id);
        Self {
            flow: CheckoutFlow::new(config, user_id),
            host,
            presenter,
            gateway: None,
            scroll: ScrollLock::new(),
        }
    }

    pub fn with_gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn flow(&self) -> &CheckoutFlow {
        &self.flow
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Paint the profile header and the initial selection screen.
    pub fn boot(&mut self) {
        let user = self.host.user();
        let profile = ProfileView::from_user(user.as_ref());
        self.presenter.render_profile(&profile);

        for effect in self.flow.initial_effects() {
            self.perform(effect);
        }
    }

    /// Apply one UI event and run all resulting effects.
    ///
    /// Confirm, back and abandon while a payment request is outstanding are
    /// swallowed: nothing is rendered and `Ok(())` is returned.
    ///
    /// # Errors
    /// Propagates any other [`FlowError`]; nothing is rendered in that case.
    pub async fn dispatch(&mut self, event: FlowEvent) -> Result<(), FlowError> {
        let name = event.name();
        let effects = match self.flow.apply(event) {
            Ok(fx) => fx,
            Err(FlowError::PaymentInFlight) => {
                debug!(event = name, "ignored: payment in flight");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::SubmitPayment(req) => {
                    info!(
                        amount = req.amount,
                        email = %mask_email(&req.email),
                        "submitting payment"
                    );
                    let outcome = match &self.gateway {
                        Some(gateway) => gateway.create_payment(&req).await,
                        None => Err(PaymentError::Config(
                            "no payment gateway configured".to_string(),
                        )),
                    };
                    queue.extend(self.flow.apply(FlowEvent::PaymentCompleted(outcome))?);
                }
                other => self.perform(other),
            }
        }

        Ok(())
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::ShowScreen(screen) => self.presenter.show_screen(screen),
            Effect::RenderTab(tab) => self.presenter.render_tab(tab),
            Effect::RenderActivePlan(plan) => self.presenter.render_active_plan(plan),
            Effect::RenderCalculator(view) => self.presenter.render_calculator(&view),
            Effect::RenderForm(view) => self.presenter.render_form(&view),
            Effect::RenderSummary(summary) => self.presenter.render_summary(&summary),
            Effect::SetPayEnabled(enabled) => self.presenter.set_pay_enabled(enabled),
            Effect::Haptic(kind) => self.host.haptic(kind),
            Effect::Alert(message) => {
                warn!(message = %message, "alert");
                self.host.alert(&message);
            }
            Effect::LockScroll => {
                let offset = self.host.scroll_offset();
                if self.scroll.lock(offset) {
                    self.host.freeze_scroll(offset);
                }
            }
            Effect::UnlockScroll => {
                if let Some(offset) = self.scroll.release() {
                    self.host.restore_scroll(offset);
                }
            }
            Effect::OpenDeepLink(url) => {
                info!(url = %url, "opening deep link");
                self.host.open_deep_link(&url);
            }
            Effect::CloseApp => self.host.close_app(),
            Effect::Navigate(url) => {
                info!(url = %url, "redirecting to payment page");
                self.host.navigate(&url);
            }
            // Handled in `dispatch`; never reaches here.
            Effect::SubmitPayment(_) => {}
        }
    }
}
