use std::fmt;
use std::str::FromStr;

use crate::money::Price;

/// Subscription tiers offered on the subscription tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Plan {
    Start,
    Optimal,
    Pro,
}

/// Catalog order as rendered on the tab strip.
pub const ALL_PLANS: [Plan; 3] = [Plan::Start, Plan::Optimal, Plan::Pro];

impl Plan {
    /// Stable slug used in deep-link payloads and CLI flags.
    pub fn slug(&self) -> &'static str {
        match self {
            Plan::Start => "start",
            Plan::Optimal => "optimal",
            Plan::Pro => "pro",
        }
    }

    /// Localized display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Start => "Старт",
            Plan::Optimal => "Оптимальный",
            Plan::Pro => "Про",
        }
    }

    /// Fixed monthly price.
    pub fn price(&self) -> Price {
        match self {
            Plan::Start => Price::roubles(390),
            Plan::Optimal => Price::roubles(890),
            Plan::Pro => Price::roubles(1490),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Returned by [`Plan::from_str`] for an unknown slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanParseError(pub String);

impl fmt::Display for PlanParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid plan '{}'. expected one of: start | optimal | pro",
            self.0
        )
    }
}

impl std::error::Error for PlanParseError {}

impl FromStr for Plan {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Plan::Start),
            "optimal" => Ok(Plan::Optimal),
            "pro" => Ok(Plan::Pro),
            other => Err(PlanParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_parse_is_case_insensitive() {
        assert_eq!("Optimal".parse::<Plan>().unwrap(), Plan::Optimal);
        assert_eq!(" pro ".parse::<Plan>().unwrap(), Plan::Pro);
        assert!("premium".parse::<Plan>().is_err());
    }

    #[test]
    fn every_plan_round_trips_through_its_slug() {
        for plan in ALL_PLANS {
            assert_eq!(plan.slug().parse::<Plan>().unwrap(), plan);
        }
    }

    #[test]
    fn optimal_is_890() {
        assert_eq!(Plan::Optimal.price().to_string(), "890₽");
        assert_eq!(Plan::Optimal.display_name(), "Оптимальный");
    }
}
