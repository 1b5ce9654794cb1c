//! exchangerate.host FX provider.
//!
//! Reads `rates.<CODE>` from a `base`/`symbols` query. Free tier, no key.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{PriceQuote, Quantity};
use crate::provider::http;
use crate::provider::{SourceAdapter, SourceSpec};

/// Provider ID constant
pub const PROVIDER_ID: &str = "EXCHANGERATE_HOST";

const ENDPOINT: &str = "https://api.exchangerate.host/latest?base={base}&symbols={symbol}";

/// API response. Only the rates map matters; everything else is ignored.
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    rates: Option<HashMap<String, serde_json::Value>>,
}

/// USD→INR from exchangerate.host.
pub struct ExchangeRateAdapter {
    spec: SourceSpec,
    base: String,
    target: String,
    client: Client,
}

impl ExchangeRateAdapter {
    pub fn new(priority: u8, timeout: Duration) -> Result<Self, MarketDataError> {
        Self::with_endpoint(ENDPOINT, priority, timeout)
    }

    /// Same provider at a different base URL (mirrors, tests).
    pub fn with_endpoint(
        endpoint_template: &str,
        priority: u8,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        let spec = SourceSpec::new(PROVIDER_ID, Quantity::UsdInr, endpoint_template, priority);
        spec.render_endpoint(&[("base", "USD"), ("symbol", "INR")])?;

        Ok(Self {
            spec,
            base: "USD".to_string(),
            target: "INR".to_string(),
            client: http::build_client(timeout)?,
        })
    }

    fn parse_rate(&self, body: &str) -> Result<f64, MarketDataError> {
        let resp: LatestRatesResponse = serde_json::from_str(body)
            .map_err(|e| MarketDataError::parse(PROVIDER_ID, e.to_string()))?;

        let rate = resp
            .rates
            .as_ref()
            .and_then(|rates| rates.get(&self.target))
            .and_then(|v| v.as_f64())
            .ok_or_else(|| {
                MarketDataError::parse(PROVIDER_ID, format!("rates.{} missing", self.target))
            })?;

        if rate <= 0.0 || !rate.is_finite() {
            return Err(MarketDataError::parse(
                PROVIDER_ID,
                format!("rates.{} is not a positive number: {}", self.target, rate),
            ));
        }

        Ok(rate)
    }
}

#[async_trait]
impl SourceAdapter for ExchangeRateAdapter {
    fn id(&self) -> &str {
        &self.spec.name
    }

    fn quantity(&self) -> Quantity {
        self.spec.quantity
    }

    fn priority(&self) -> u8 {
        self.spec.priority
    }

    async fn fetch(&self) -> Result<PriceQuote, MarketDataError> {
        let url = self.spec.render_endpoint(&[
            ("base", self.base.as_str()),
            ("symbol", self.target.as_str()),
        ])?;
        let body = http::get_text(&self.client, PROVIDER_ID, &url, HeaderMap::new()).await?;
        let rate = self.parse_rate(&body)?;
        Ok(PriceQuote::observed_now(rate, self.quantity(), PROVIDER_ID))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> ExchangeRateAdapter {
        ExchangeRateAdapter::new(1, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_parse_rate() {
        let body = r#"{"success":true,"base":"USD","rates":{"INR":83.12}}"#;
        assert_eq!(adapter().parse_rate(body).unwrap(), 83.12);
    }

    #[test]
    fn test_missing_rate_is_parse_error() {
        let err = adapter()
            .parse_rate(r#"{"success":false,"error":{"code":101}}"#)
            .unwrap_err();
        assert!(matches!(err, MarketDataError::Parse { .. }));
        assert!(err.to_string().contains("rates.INR missing"));
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        let err = adapter().parse_rate(r#"{"rates":{"INR":0}}"#).unwrap_err();
        assert!(matches!(err, MarketDataError::Parse { .. }));
    }

    #[test]
    fn test_provider_metadata() {
        let adapter = adapter();
        assert_eq!(adapter.id(), "EXCHANGERATE_HOST");
        assert_eq!(adapter.quantity(), Quantity::UsdInr);
        assert_eq!(adapter.priority(), 1);
    }
}
