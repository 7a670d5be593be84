//! Scenario: paths that must NOT reach the payment endpoint.
//!
//! # Invariants under test
//!
//! 1. Remote checkout without a platform user alerts and sends nothing.
//! 2. With the checkout form switched off, buy actions only show the
//!    placeholder alert and create no order.
//! 3. Replacing a token order with a subscription leaves no token fields or
//!    form values behind.
//! 4. Outside the messaging client the profile shows the placeholder identity.

use std::sync::Arc;

use mshop_checkout::{FlowConfig, FlowEvent, Haptic, Screen, PLACEHOLDER_ALERT};
use mshop_payments::PaymentError;
use mshop_pricing::Plan;
use mshop_testkit::{sample_form, sample_user, storefront, FakeGateway};

#[tokio::test]
async fn missing_identity_sends_no_request() {
    let gateway = Arc::new(FakeGateway::redirecting_to("https://pay.example/x"));
    let mut sf = storefront(FlowConfig::remote(), None).with_gateway(gateway.clone());

    sf.dispatch(FlowEvent::BuySubscription).await.unwrap();
    sf.dispatch(FlowEvent::SubmitForm(sample_form())).await.unwrap();
    sf.dispatch(FlowEvent::ConfirmPayment).await.unwrap();

    assert_eq!(gateway.call_count(), 0);
    assert_eq!(
        sf.host().alerts(),
        vec![PaymentError::MissingIdentity.user_message().as_str()]
    );
    assert_eq!(sf.presenter().pay_enabled, Some(true));
    assert_eq!(sf.flow().screen(), Screen::Pending);
}

#[tokio::test]
async fn disabled_form_shows_placeholder_only() {
    let mut sf = storefront(
        FlowConfig::remote().with_checkout_form(false),
        Some(sample_user(3)),
    );

    sf.dispatch(FlowEvent::BuySubscription).await.unwrap();
    sf.dispatch(FlowEvent::BuyTokens).await.unwrap();

    assert_eq!(sf.host().alerts(), vec![PLACEHOLDER_ALERT, PLACEHOLDER_ALERT]);
    assert_eq!(sf.flow().screen(), Screen::Selection);
    assert!(sf.flow().order().is_none());
    assert!(sf.host().scroll_calls().is_empty());
    assert!(sf.host().haptics().contains(&Haptic::Medium));
}

#[tokio::test]
async fn switching_order_kind_leaves_no_bleed_through() {
    let mut sf = storefront(FlowConfig::remote(), Some(sample_user(3)));

    sf.dispatch(FlowEvent::SetTokenAmount(1500.0)).await.unwrap();
    sf.dispatch(FlowEvent::BuyTokens).await.unwrap();
    sf.dispatch(FlowEvent::SubmitForm(sample_form())).await.unwrap();
    // Back out to selection without abandoning: the token order stays resident.
    sf.dispatch(FlowEvent::GoBack).await.unwrap();
    sf.dispatch(FlowEvent::CloseForm).await.unwrap();
    assert_eq!(sf.flow().order().and_then(|o| o.token_amount()), Some(1500));

    sf.dispatch(FlowEvent::SelectPlan(Plan::Pro)).await.unwrap();
    sf.dispatch(FlowEvent::BuySubscription).await.unwrap();

    let order = sf.flow().order().expect("subscription order");
    assert_eq!(order.plan(), Some(Plan::Pro));
    assert_eq!(order.token_amount(), None);
    assert!(order.details().is_none());

    let form = sf.presenter().form.clone().expect("form rendered");
    assert_eq!(form.order_label, "Тариф: Про");
    assert_eq!(form.price, "1490₽");
    assert_eq!(form.email, "");
}

#[tokio::test]
async fn browser_profile_uses_placeholder() {
    let sf = storefront(FlowConfig::remote(), None);
    let profile = sf.presenter().profile.clone().expect("profile rendered");
    assert_eq!(profile.display_name, "Savely");
    assert_eq!(profile.handle, "@savelyko");

    let sf = storefront(FlowConfig::remote(), Some(sample_user(8)));
    let profile = sf.presenter().profile.clone().expect("profile rendered");
    assert_eq!(profile.display_name, "Ivan Petrov");
    assert_eq!(profile.handle, "@ivanp");
}

#[tokio::test]
async fn boot_renders_default_selection() {
    let sf = storefront(FlowConfig::remote(), None);
    let p = sf.presenter();
    assert_eq!(p.current_screen(), Some(Screen::Selection));
    assert_eq!(p.active_plan, Some(Plan::Optimal));
    let calc = p.calculator.clone().expect("calculator rendered");
    assert_eq!(calc.amount, 500);
    assert_eq!(calc.price, "500₽");
    assert_eq!(calc.total_label, "Всего 550 токенов");
}
