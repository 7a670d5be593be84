//! mshop-pricing
//!
//! Pure pricing surface for the storefront:
//! - Token package calculator (clamp + stepped unit rate + bonus)
//! - Fixed subscription plan catalog
//! - Rouble price value used by every display path
//!
//! Nothing in this crate performs I/O, logs, or allocates shared state.
//! Identical inputs always produce identical outputs, whichever UI path
//! (slider, stepper, preset button) produced the input.

mod money;
mod plans;
mod tokens;

pub use money::{Price, CURRENCY_SYMBOL};
pub use plans::{Plan, PlanParseError, ALL_PLANS};
pub use tokens::{
    compute_pricing, compute_pricing_from_input, rate_bp_for, TokenQuote, MAX_TOKENS, MIN_TOKENS,
    TOKEN_PRESETS,
};
