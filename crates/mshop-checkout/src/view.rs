//! Display models handed to the [`Presenter`](crate::Presenter).
//!
//! Plain strings only; no layout or styling decisions live here.

use mshop_pricing::TokenQuote;
use serde::Serialize;

use crate::order::Order;

/// Token calculator readout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatorView {
    pub amount: u32,
    /// e.g. `1350₽`
    pub price: String,
    /// e.g. `Всего 1650 токенов`
    pub total_label: String,
}

impl From<TokenQuote> for CalculatorView {
    fn from(q: TokenQuote) -> Self {
        Self {
            amount: q.amount,
            price: q.price.to_string(),
            total_label: format!("Всего {} токенов", q.bonus),
        }
    }
}

/// Checkout form contents. Blank fields on a fresh order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub order_label: String,
    pub price: String,
    pub email: String,
    pub method: String,
    pub currency: String,
}

impl From<&Order> for FormView {
    fn from(order: &Order) -> Self {
        let details = order.details().cloned().unwrap_or_default();
        Self {
            order_label: order.item_label(),
            price: order.price().to_string(),
            email: details.contact_email,
            method: details.payment_method,
            currency: details.settlement_currency,
        }
    }
}

/// Pending (confirmation) screen contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSummary {
    pub item_label: String,
    pub price: String,
    pub payment_method: String,
    pub settlement_currency: String,
    pub contact_email: String,
}

impl From<&Order> for PendingSummary {
    fn from(order: &Order) -> Self {
        let details = order.details().cloned().unwrap_or_default();
        Self {
            item_label: order.item_label(),
            price: order.price().to_string(),
            payment_method: details.payment_method,
            settlement_currency: details.settlement_currency,
            contact_email: details.contact_email,
        }
    }
}
