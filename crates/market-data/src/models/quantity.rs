use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Unit a quote's number is expressed in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteUnit {
    /// Spot price of one troy ounce in US dollars.
    UsdPerTroyOunce,
    /// Indian rupees per one US dollar.
    RateUsdToInr,
}

/// A logical quantity the resolver knows how to acquire.
///
/// Each source adapter supplies exactly one quantity; the quantity's key is
/// also the cache key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    /// XAU/USD spot price.
    #[serde(rename = "xau_usd")]
    XauUsd,
    /// USD to INR exchange rate.
    #[serde(rename = "usd_inr")]
    UsdInr,
}

impl Quantity {
    pub const ALL: [Quantity; 2] = [Quantity::XauUsd, Quantity::UsdInr];

    /// Cache and lookup key, e.g. `"xau_usd"`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::XauUsd => "xau_usd",
            Self::UsdInr => "usd_inr",
        }
    }

    pub fn unit(&self) -> QuoteUnit {
        match self {
            Self::XauUsd => QuoteUnit::UsdPerTroyOunce,
            Self::UsdInr => QuoteUnit::RateUsdToInr,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Quantity {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name.to_ascii_lowercase().as_str() {
            "xau_usd" => Ok(Self::XauUsd),
            "usd_inr" => Ok(Self::UsdInr),
            _ => Err(MarketDataError::UnknownQuantity(name.to_string())),
        }
    }
}
