//! JSON quote API adapter.
//!
//! Covers quote endpoints that return a JSON envelope with the price at some
//! nested path. The adapter is configured with an ordered list of candidate
//! paths; the first one that resolves to a number wins. Presets are provided
//! for the Investing.com chart API and the Yahoo Finance quote API.

mod path;

pub use path::{PathSegment, PricePath};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{PriceQuote, Quantity};
use crate::provider::http::{self, BROWSER_USER_AGENT};
use crate::provider::{SourceAdapter, SourceSpec};

pub const INVESTING_PROVIDER_ID: &str = "INVESTING";
pub const YAHOO_PROVIDER_ID: &str = "YAHOO";

const INVESTING_ENDPOINT: &str =
    "https://api.investing.com/api/financialdata/v1/indices/{symbol}/historical/chart";
const YAHOO_ENDPOINT: &str = "https://query1.finance.yahoo.com/v7/finance/quote?symbols={symbol}";

/// Adapter for JSON quote endpoints.
pub struct JsonQuoteAdapter {
    spec: SourceSpec,
    symbol: String,
    paths: Vec<PricePath>,
    headers: HeaderMap,
    client: Client,
}

impl JsonQuoteAdapter {
    /// Create an adapter for `spec`, requesting `symbol` and reading the
    /// first of `paths` that holds a number.
    pub fn new(
        spec: SourceSpec,
        symbol: impl Into<String>,
        paths: Vec<PricePath>,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        if paths.is_empty() {
            return Err(MarketDataError::Config(format!(
                "{}: at least one price path is required",
                spec.name
            )));
        }

        let symbol = symbol.into();
        // Fail fast on a template that can't be filled with the symbol alone.
        spec.render_endpoint(&[("symbol", symbol.as_str())])?;

        Ok(Self {
            spec,
            symbol,
            paths,
            headers: HeaderMap::new(),
            client: http::build_client(timeout)?,
        })
    }

    /// Send these headers with every request.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Investing.com chart endpoint for XAU/USD.
    ///
    /// The endpoint is undocumented and its shape drifts, so several layouts
    /// are tried. It usually needs browser-like headers and may answer 403.
    pub fn investing(priority: u8, timeout: Duration) -> Result<Self, MarketDataError> {
        Self::investing_at(INVESTING_ENDPOINT, priority, timeout)
    }

    pub fn investing_at(
        endpoint_template: &str,
        priority: u8,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        let spec = SourceSpec::new(
            INVESTING_PROVIDER_ID,
            Quantity::XauUsd,
            endpoint_template,
            priority,
        );
        let paths = vec![
            PricePath::keys(&["last"]),
            PricePath::keys(&["series"]).last().key("value"),
            PricePath::keys(&["data"]).last(),
            PricePath::keys(&["data"]).last().key("close"),
            PricePath::keys(&["price"]),
        ];

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static("https://in.investing.com"));

        Ok(Self::new(spec, "XAU_USD", paths, timeout)?.with_headers(headers))
    }

    /// Yahoo Finance quote endpoint for `XAUUSD=X`.
    pub fn yahoo(priority: u8, timeout: Duration) -> Result<Self, MarketDataError> {
        Self::yahoo_at(YAHOO_ENDPOINT, priority, timeout)
    }

    pub fn yahoo_at(
        endpoint_template: &str,
        priority: u8,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        let spec = SourceSpec::new(
            YAHOO_PROVIDER_ID,
            Quantity::XauUsd,
            endpoint_template,
            priority,
        );
        let result = || PricePath::keys(&["quoteResponse", "result"]).index(0);
        let paths = vec![
            result().key("regularMarketPrice"),
            result().key("bid"),
            result().key("ask"),
        ];
        Self::new(spec, "XAUUSD=X", paths, timeout)
    }

    /// Read the price out of a response body.
    fn parse_price(&self, body: &str) -> Result<f64, MarketDataError> {
        let json: Value = serde_json::from_str(body)
            .map_err(|e| MarketDataError::parse(self.id(), format!("invalid JSON: {}", e)))?;

        for path in &self.paths {
            if let Some(price) = path.extract(&json) {
                debug!("{} price found at {}", self.id(), path);
                return Ok(price);
            }
        }

        let tried = self
            .paths
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(MarketDataError::parse(
            self.id(),
            format!("no price at any of: {}", tried),
        ))
    }
}

#[async_trait]
impl SourceAdapter for JsonQuoteAdapter {
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
        let url = self.spec.render_endpoint(&[("symbol", self.symbol.as_str())])?;
        let body = http::get_text(&self.client, self.id(), &url, self.headers.clone()).await?;
        let price = self.parse_price(&body)?;
        Ok(PriceQuote::observed_now(price, self.quantity(), self.id()))
    }
}
