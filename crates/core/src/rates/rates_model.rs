use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use goldrate_market_data::{FetchOutcome, PriceQuote};

use crate::pricing::{DisplayRow, PriceTable};

/// Result of a single-quantity lookup, as handed to UI or CLI code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RateResponse {
    pub fn ok(quote: &PriceQuote) -> Self {
        Self {
            success: true,
            value: Some(quote.quantity()),
            source: Some(quote.source_name().to_string()),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            value: None,
            source: None,
            error: Some(error.into()),
        }
    }
}

impl From<FetchOutcome> for RateResponse {
    fn from(outcome: FetchOutcome) -> Self {
        match &outcome {
            FetchOutcome::Success(quote) => Self::ok(quote),
            _ => Self::err(outcome.describe()),
        }
    }
}

/// Both inputs and the converted prices at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSnapshot {
    pub xau_usd: PriceQuote,
    pub usd_inr: PriceQuote,
    pub table: PriceTable,
    pub display: Vec<DisplayRow>,
    /// When the inputs were fetched; for a cached snapshot, the older of the two.
    pub fetched_at: DateTime<Utc>,
    pub from_cache: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldrate_market_data::Quantity;
    use std::time::Duration;

    #[test]
    fn test_success_serialization_omits_error() {
        let quote = PriceQuote::observed_now(83.12, Quantity::UsdInr, "EXCHANGERATE_HOST");
        let json = serde_json::to_value(RateResponse::ok(&quote)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "value": 83.12,
                "source": "EXCHANGERATE_HOST"
            })
        );
    }

    #[test]
    fn test_failure_serialization_omits_value() {
        let json = serde_json::to_value(RateResponse::err("no sources configured for usd_inr"))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": "no sources configured for usd_inr"
            })
        );
    }

    #[test]
    fn test_rate_limited_outcome_keeps_hint() {
        let response = RateResponse::from(FetchOutcome::RateLimited {
            retry_after: Some(Duration::from_secs(30)),
        });
        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("rate limited (retry after 30s)")
        );
    }
}
