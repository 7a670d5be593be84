use std::fmt;

/// Display currency. All catalog and calculator prices are whole roubles.
pub const CURRENCY_SYMBOL: &str = "₽";

/// A whole-rouble price.
///
/// Renders as `"<amount>₽"` (no separator), e.g. `890₽`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(pub u64);

impl Price {
    pub const fn roubles(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Currency-less numeric string, e.g. `"890"`.
    pub fn numeric(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, CURRENCY_SYMBOL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_without_separator() {
        assert_eq!(Price::roubles(890).to_string(), "890₽");
        assert_eq!(Price::roubles(890).numeric(), "890");
    }
}
