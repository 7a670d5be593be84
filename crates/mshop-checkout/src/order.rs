//! Order descriptor and its single-slot holder.
//!
//! An [`Order`] is page-lifetime only. The item is an enum, so a token order
//! can never carry a plan and vice versa; replacing the slot replaces every
//! field at once.

use mshop_pricing::{compute_pricing, Plan, Price, TokenQuote};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    Subscription,
    TokenPackage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderItem {
    Subscription { plan: Plan },
    Tokens { quote: TokenQuote },
}

/// Values copied from the checkout form on submit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckoutDetails {
    pub contact_email: String,
    pub payment_method: String,
    pub settlement_currency: String,
}

/// Raw form controls as read at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckoutForm {
    pub email: String,
    pub method: String,
    pub currency: String,
}

impl From<CheckoutForm> for CheckoutDetails {
    fn from(form: CheckoutForm) -> Self {
        Self {
            contact_email: form.email.trim().to_string(),
            payment_method: form.method.trim().to_string(),
            settlement_currency: form.currency.trim().to_string(),
        }
    }
}

/// The user's current purchase intent.
///
/// Construct only through [`Order::subscription`] / [`Order::tokens`]: the
/// price is always derived, never supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    item: OrderItem,
    price: Price,
    details: Option<CheckoutDetails>,
}

impl Order {
    pub fn subscription(plan: Plan) -> Self {
        Self {
            item: OrderItem::Subscription { plan },
            price: plan.price(),
            details: None,
        }
    }

    /// Token order from any requested quantity; clamping happens here.
    pub fn tokens(requested: f64) -> Self {
        Self::from_quote(compute_pricing(requested))
    }

    fn from_quote(quote: TokenQuote) -> Self {
        Self {
            item: OrderItem::Tokens { quote },
            price: quote.price,
            details: None,
        }
    }

    pub fn item(&self) -> &OrderItem {
        &self.item
    }

    pub fn kind(&self) -> OrderKind {
        match self.item {
            OrderItem::Subscription { .. } => OrderKind::Subscription,
            OrderItem::Tokens { .. } => OrderKind::TokenPackage,
        }
    }

    pub fn plan(&self) -> Option<Plan> {
        match self.item {
            OrderItem::Subscription { plan } => Some(plan),
            OrderItem::Tokens { .. } => None,
        }
    }

    pub fn token_amount(&self) -> Option<u32> {
        match self.item {
            OrderItem::Tokens { quote } => Some(quote.amount),
            OrderItem::Subscription { .. } => None,
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn details(&self) -> Option<&CheckoutDetails> {
        self.details.as_ref()
    }

    pub fn set_details(&mut self, details: CheckoutDetails) {
        self.details = Some(details);
    }

    /// Localized line used on the pending screen.
    pub fn item_label(&self) -> String {
        match self.item {
            OrderItem::Subscription { plan } => format!("Тариф: {}", plan.display_name()),
            OrderItem::Tokens { quote } => {
                format!("Токены: {} (+{} бонус)", quote.amount, quote.extra())
            }
        }
    }

    /// Payment description sent to the payment endpoint.
    pub fn description(&self) -> String {
        match self.item {
            OrderItem::Subscription { plan } => format!("Подписка {}", plan.display_name()),
            OrderItem::Tokens { quote } => format!("Пакет {} токенов", quote.bonus),
        }
    }
}

// ---------------------------------------------------------------------------
// OrderSlot
// ---------------------------------------------------------------------------

/// Holds at most one in-progress [`Order`].
#[derive(Debug, Clone, Default)]
pub struct OrderSlot {
    current: Option<Order>,
}

impl OrderSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `order`, discarding whatever was there. Returns the discarded order.
    pub fn replace(&mut self, order: Order) -> Option<Order> {
        self.current.replace(order)
    }

    pub fn current(&self) -> Option<&Order> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Order> {
        self.current.as_mut()
    }

    pub fn clear(&mut self) -> Option<Order> {
        self.current.take()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_order_clamps_and_prices() {
        let o = Order::tokens(20_000.0);
        assert_eq!(o.token_amount(), Some(5000));
        assert_eq!(o.price(), Price::roubles(4000));
        assert_eq!(o.plan(), None);
        assert_eq!(o.kind(), OrderKind::TokenPackage);
    }

    #[test]
    fn replacing_a_token_order_with_a_subscription_leaves_no_token_fields() {
        let mut slot = OrderSlot::new();
        let mut first = Order::tokens(1500.0);
        first.set_details(CheckoutDetails {
            contact_email: "a@b.com".into(),
            payment_method: "Card".into(),
            settlement_currency: "RUB".into(),
        });
        slot.replace(first);

        let prior = slot.replace(Order::subscription(Plan::Pro));
        assert_eq!(prior.and_then(|o| o.token_amount()), Some(1500));

        let cur = slot.current().unwrap();
        assert_eq!(cur.token_amount(), None);
        assert_eq!(cur.plan(), Some(Plan::Pro));
        assert!(cur.details().is_none());
    }

    #[test]
    fn form_values_are_trimmed() {
        let d: CheckoutDetails = CheckoutForm {
            email: " a@b.com ".into(),
            method: "Card".into(),
            currency: " RUB".into(),
        }
        .into();
        assert_eq!(d.contact_email, "a@b.com");
        assert_eq!(d.settlement_currency, "RUB");
    }

    #[test]
    fn labels_and_descriptions() {
        assert_eq!(Order::subscription(Plan::Optimal).item_label(), "Тариф: Оптимальный");
        assert_eq!(
            Order::subscription(Plan::Optimal).description(),
            "Подписка Оптимальный"
        );
        assert_eq!(Order::tokens(1500.0).item_label(), "Токены: 1500 (+150 бонус)");
        assert_eq!(Order::tokens(1500.0).description(), "Пакет 1650 токенов");
    }
}
