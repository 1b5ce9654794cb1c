//! Metal Price API provider, the paid fallback.
//!
//! This provider fetches latest rates from the Metal Price API with an access
//! key. It can supply either quantity:
//! - XAU: the API answers in ounces per USD, so the rate is inverted
//! - INR: the API answers in rupees per USD, used as-is
//!
//! Only registered when an API key is configured.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{PriceQuote, Quantity};
use crate::provider::http;
use crate::provider::{SourceAdapter, SourceSpec};

/// Provider ID constant
pub const PROVIDER_ID: &str = "METAL_PRICE_API";

const ENDPOINT: &str =
    "https://api.metalpriceapi.com/v1/latest?api_key={api_key}&base=USD&currencies={symbol}";

/// API response from Metal Price API
#[derive(Debug, Deserialize)]
struct MetalPriceResponse {
    /// Whether the request was successful
    #[serde(default)]
    success: bool,
    /// Rates for requested symbols (1 USD = rate units)
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// How the API's rate relates to the quantity we want.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RateForm {
    /// The rate already is the quantity (INR per USD).
    Direct,
    /// The rate is units per USD and must be inverted (USD per ounce).
    Inverse,
}

/// Metal Price API provider.
///
/// # Example
///
/// ```ignore
/// use goldrate_market_data::MetalPriceApiAdapter;
///
/// let gold = MetalPriceApiAdapter::xau_usd("your_api_key".to_string(), 4, timeout)?;
/// ```
pub struct MetalPriceApiAdapter {
    spec: SourceSpec,
    api_key: String,
    symbol: &'static str,
    form: RateForm,
    client: Client,
}

impl MetalPriceApiAdapter {
    /// Gold in USD per troy ounce.
    pub fn xau_usd(
        api_key: String,
        priority: u8,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        Self::with_endpoint(ENDPOINT, Quantity::XauUsd, api_key, priority, timeout)
    }

    /// Rupees per USD.
    pub fn usd_inr(
        api_key: String,
        priority: u8,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        Self::with_endpoint(ENDPOINT, Quantity::UsdInr, api_key, priority, timeout)
    }

    pub fn with_endpoint(
        endpoint_template: &str,
        quantity: Quantity,
        api_key: String,
        priority: u8,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        if api_key.trim().is_empty() {
            return Err(MarketDataError::Config(format!(
                "{}: API key is empty",
                PROVIDER_ID
            )));
        }

        let (symbol, form) = match quantity {
            Quantity::XauUsd => ("XAU", RateForm::Inverse),
            Quantity::UsdInr => ("INR", RateForm::Direct),
        };

        let spec = SourceSpec::new(PROVIDER_ID, quantity, endpoint_template, priority);
        spec.render_endpoint(&[("api_key", api_key.as_str()), ("symbol", symbol)])?;

        Ok(Self {
            spec,
            api_key,
            symbol,
            form,
            client: http::build_client(timeout)?,
        })
    }

    pub fn rate_form(&self) -> RateForm {
        self.form
    }

    fn parse_rate(&self, body: &str) -> Result<f64, MarketDataError> {
        let metal_resp: MetalPriceResponse = serde_json::from_str(body)
            .map_err(|e| MarketDataError::parse(PROVIDER_ID, e.to_string()))?;

        // Check if the API request was successful
        if !metal_resp.success {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "API request failed".to_string(),
            });
        }

        let rate = *metal_resp.rates.get(self.symbol).ok_or_else(|| {
            MarketDataError::parse(PROVIDER_ID, format!("rates.{} missing", self.symbol))
        })?;

        to_quantity(rate, self.form)
            .ok_or_else(|| MarketDataError::parse(PROVIDER_ID, format!("invalid rate: {}", rate)))
    }
}

/// Convert the API rate into the quantity's unit.
///
/// Zero, negative and non-finite rates are rejected rather than divided by.
fn to_quantity(rate: f64, form: RateForm) -> Option<f64> {
    if !rate.is_finite() || rate <= 0.0 {
        return None;
    }
    let value = match form {
        RateForm::Direct => rate,
        RateForm::Inverse => 1.0 / rate,
    };
    value.is_finite().then_some(value)
}

#[async_trait]
impl SourceAdapter for MetalPriceApiAdapter {
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
            ("api_key", self.api_key.as_str()),
            ("symbol", self.symbol),
        ])?;
        let body = http::get_text(&self.client, PROVIDER_ID, &url, HeaderMap::new()).await?;
        let value = self.parse_rate(&body)?;
        Ok(PriceQuote::observed_now(value, self.quantity(), PROVIDER_ID))
    }
}
