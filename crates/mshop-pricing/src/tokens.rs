//! Token package calculator.
//!
//! # Rules
//!
//! 1. The requested quantity is rounded half-up and clamped to
//!    [`MIN_TOKENS`]..=[`MAX_TOKENS`]. Out-of-range and non-numeric input is
//!    normalized, never rejected.
//! 2. The unit rate is a step function of the *clamped* amount:
//!
//! | amount            | rate |
//! |-------------------|------|
//! | `..=500`          | 1.00 |
//! | `501..=1000`      | 0.95 |
//! | `1001..=2000`     | 0.90 |
//! | `2001..`          | 0.80 |
//!
//! 3. `price = round_half_up(amount * rate)`, computed in basis points so the
//!    result is exact (no float drift at `.5`).
//! 4. `bonus = floor(amount * 1.1)`, the total number of tokens delivered.

use crate::money::Price;

pub const MIN_TOKENS: u32 = 100;
pub const MAX_TOKENS: u32 = 5000;

/// Quick-pick packages. They go through [`compute_pricing`] like slider input.
pub const TOKEN_PRESETS: [u32; 5] = [100, 500, 1000, 2000, 5000];

const BP_SCALE: u64 = 10_000;

/// `(inclusive upper bound, rate in basis points)`, ascending.
const RATE_TIERS: [(u32, u64); 3] = [(500, 10_000), (1000, 9_500), (2000, 9_000)];
const TOP_RATE_BP: u64 = 8_000;

/// Result of pricing one token request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenQuote {
    /// Clamped quantity the user pays for.
    pub amount: u32,
    /// Tiered price for `amount`.
    pub price: Price,
    /// Total tokens delivered (always >= `amount`).
    pub bonus: u32,
}

impl TokenQuote {
    /// Tokens delivered on top of the paid quantity.
    pub fn extra(&self) -> u32 {
        self.bonus - self.amount
    }
}

/// Unit rate (basis points) for an already-clamped amount.
pub fn rate_bp_for(amount: u32) -> u64 {
    RATE_TIERS
        .iter()
        .find(|(upper, _)| amount <= *upper)
        .map(|(_, bp)| *bp)
        .unwrap_or(TOP_RATE_BP)
}

/// Price a numeric token request.
///
/// `NaN` is treated as missing input and yields [`MIN_TOKENS`]; infinities
/// clamp to the nearest bound.
pub fn compute_pricing(requested: f64) -> TokenQuote {
    let amount = clamp_amount(requested);
    let price = (u64::from(amount) * rate_bp_for(amount) + BP_SCALE / 2) / BP_SCALE;
    let bonus = amount * 11 / 10;

    TokenQuote {
        amount,
        price: Price::roubles(price),
        bonus,
    }
}

/// Price raw text from an input control.
///
/// Blank, unparseable or non-finite text counts as missing input.
pub fn compute_pricing_from_input(raw: &str) -> TokenQuote {
    let parsed = raw
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite());

    compute_pricing(parsed.unwrap_or(f64::NAN))
}

fn clamp_amount(requested: f64) -> u32 {
    if requested.is_nan() {
        return MIN_TOKENS;
    }
    let rounded = (requested + 0.5).floor();
    if rounded <= f64::from(MIN_TOKENS) {
        MIN_TOKENS
    } else if rounded >= f64::from(MAX_TOKENS) {
        MAX_TOKENS
    } else {
        rounded as u32
    }
}
