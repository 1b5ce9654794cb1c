use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::quantity::{Quantity, QuoteUnit};

/// Suffix appended to the source name of a quote served from cache.
const CACHED_SUFFIX: &str = " (cached)";

/// A single observed value from one source.
///
/// Immutable once constructed; the cache hands out clones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    quantity: f64,
    unit: QuoteUnit,
    source_name: String,
    observed_at: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(
        quantity: f64,
        unit: QuoteUnit,
        source_name: impl Into<String>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            quantity,
            unit,
            source_name: source_name.into(),
            observed_at,
        }
    }

    /// Quote for `quantity`, observed now.
    pub fn observed_now(value: f64, quantity: Quantity, source_name: impl Into<String>) -> Self {
        Self::new(value, quantity.unit(), source_name, Utc::now())
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit(&self) -> QuoteUnit {
        self.unit
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// Copy of this quote with its provenance marked as served from cache.
    pub fn cached(&self) -> Self {
        let source_name = if self.source_name.ends_with(CACHED_SUFFIX) {
            self.source_name.clone()
        } else {
            format!("{}{}", self.source_name, CACHED_SUFFIX)
        };
        Self {
            source_name,
            ..self.clone()
        }
    }
}
