//! Bot-start payloads for the deep-link confirmation strategy.
//!
//! Formats:
//! - `buy_sub_<plan>`
//! - `buy_tokens_<amount>_<price>`
//!
//! The payload is appended as the `start` parameter of `https://t.me/<bot>`.

use crate::order::{Order, OrderItem};

const LINK_BASE: &str = "https://t.me/";

pub fn start_payload(order: &Order) -> String {
    match order.item() {
        OrderItem::Subscription { plan } => format!("buy_sub_{}", plan.slug()),
        OrderItem::Tokens { quote } => {
            format!("buy_tokens_{}_{}", quote.amount, quote.price.amount())
        }
    }
}

/// Link back into the hosting bot. A leading `@` on the username is ignored.
pub fn bot_link(bot_username: &str) -> String {
    format!("{LINK_BASE}{}", bot_username.trim().trim_start_matches('@'))
}

pub fn deep_link(bot_username: &str, order: &Order) -> String {
    format!("{}?start={}", bot_link(bot_username), start_payload(order))
}
