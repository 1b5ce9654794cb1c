//! HTML scrape adapter.
//!
//! Fetches a page and runs an ordered [`PatternSet`] over the raw text. The
//! first pattern whose first capture group matches wins. Prices use `,`
//! thousands separators and `.` as the decimal point.
//!
//! Upstream markup changes often; the patterns are configuration handed in at
//! construction, not logic.

use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{PriceQuote, Quantity};
use crate::provider::http::{self, BROWSER_USER_AGENT};
use crate::provider::{SourceAdapter, SourceSpec};

pub const GOOGLE_FINANCE_PROVIDER_ID: &str = "GOOGLE_FINANCE";

const GOOGLE_FINANCE_ENDPOINT: &str = "https://www.google.com/finance/quote/{symbol}";

lazy_static! {
    /// Candidates for the XAU/USD quote page, most specific first.
    static ref XAU_PAGE_PATTERNS: PatternSet = PatternSet::new(&[
        r#"data-last-price="([0-9][0-9,]*(?:\.[0-9]+)?)""#,
        r#"class="YMlKec fxKbKc">\$?([0-9][0-9,]*(?:\.[0-9]+)?)<"#,
        r#""price"\s*:\s*"?([0-9][0-9,]*(?:\.[0-9]+)?)"#,
    ])
    .expect("Invalid regex pattern");
}

/// Ordered regex candidates; each must have one capture group holding the price.
#[derive(Clone, Debug)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile `patterns` in order.
    pub fn new(patterns: &[&str]) -> Result<Self, MarketDataError> {
        if patterns.is_empty() {
            return Err(MarketDataError::Config(
                "pattern set must not be empty".to_string(),
            ));
        }

        let patterns = patterns
            .iter()
            .map(|p| {
                let regex = Regex::new(p).map_err(|e| {
                    MarketDataError::Config(format!("invalid pattern '{}': {}", p, e))
                })?;
                if regex.captures_len() < 2 {
                    return Err(MarketDataError::Config(format!(
                        "pattern '{}' has no capture group",
                        p
                    )));
                }
                Ok(regex)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Patterns for the XAU/USD quote page.
    pub fn xau_page() -> Self {
        XAU_PAGE_PATTERNS.clone()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// First capture of the first matching pattern, as a number.
    ///
    /// A pattern that matches but captures something unparseable is skipped
    /// in favour of the next candidate.
    pub fn find_price(&self, text: &str) -> Option<f64> {
        self.patterns.iter().find_map(|regex| {
            let captured = regex.captures(text)?.get(1)?.as_str();
            match parse_grouped_number(captured) {
                Some(price) => {
                    debug!("scrape pattern matched: {}", regex.as_str());
                    Some(price)
                }
                None => None,
            }
        })
    }
}

/// Parse `1,234,567.89` style numbers.
pub fn parse_grouped_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Adapter that scrapes a price out of an HTML page.
pub struct ScrapeAdapter {
    spec: SourceSpec,
    symbol: String,
    patterns: PatternSet,
    client: Client,
}

impl ScrapeAdapter {
    pub fn new(
        spec: SourceSpec,
        symbol: impl Into<String>,
        patterns: PatternSet,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        let symbol = symbol.into();
        spec.render_endpoint(&[("symbol", symbol.as_str())])?;

        Ok(Self {
            spec,
            symbol,
            patterns,
            client: http::build_client(timeout)?,
        })
    }

    /// Google Finance XAU-USD quote page.
    pub fn google_finance(priority: u8, timeout: Duration) -> Result<Self, MarketDataError> {
        Self::google_finance_at(GOOGLE_FINANCE_ENDPOINT, priority, timeout)
    }

    pub fn google_finance_at(
        endpoint_template: &str,
        priority: u8,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        let spec = SourceSpec::new(
            GOOGLE_FINANCE_PROVIDER_ID,
            Quantity::XauUsd,
            endpoint_template,
            priority,
        );
        Self::new(spec, "XAU-USD", PatternSet::xau_page(), timeout)
    }

    fn parse_page(&self, html: &str) -> Result<f64, MarketDataError> {
        self.patterns.find_price(html).ok_or_else(|| {
            MarketDataError::parse(
                self.id(),
                format!(
                    "none of {} page patterns matched",
                    self.patterns.len()
                ),
            )
        })
    }
}

#[async_trait]
impl SourceAdapter for ScrapeAdapter {
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

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));

        let html = http::get_text(&self.client, self.id(), &url, headers).await?;
        let price = self.parse_page(&html)?;
        Ok(PriceQuote::observed_now(price, self.quantity(), self.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_matching_pattern_wins() {
        let patterns = PatternSet::new(&[
            r#"id="primary">([0-9,.]+)<"#,
            r#"id="secondary">([0-9,.]+)<"#,
        ])
        .unwrap();

        let html = r#"<span id="secondary">1,111.00</span><span id="primary">2,345.67</span>"#;
        assert_eq!(patterns.find_price(html), Some(2345.67));

        let html = r#"<span id="secondary">1,111.00</span>"#;
        assert_eq!(patterns.find_price(html), Some(1111.0));
    }

    #[test]
    fn test_unparseable_capture_falls_through() {
        let patterns =
            PatternSet::new(&[r#"price=([^;]+);"#, r#"fallback=([0-9.]+);"#]).unwrap();
        let html = "price=unavailable; fallback=2001.5;";
        assert_eq!(patterns.find_price(html), Some(2001.5));
    }

    #[test]
    fn test_no_match_is_none() {
        let patterns = PatternSet::xau_page();
        assert_eq!(patterns.find_price("<html><body>Sorry</body></html>"), None);
    }

    #[test]
    fn test_xau_page_patterns() {
        let patterns = PatternSet::xau_page();
        assert_eq!(
            patterns.find_price(r#"<div data-last-price="2,387.15" data-x="1">"#),
            Some(2387.15)
        );
        assert_eq!(
            patterns.find_price(r#"<div class="YMlKec fxKbKc">$2,390.40</div>"#),
            Some(2390.4)
        );
    }

    #[test]
    fn test_invalid_patterns_are_config_errors() {
        assert!(matches!(
            PatternSet::new(&["(unclosed"]),
            Err(MarketDataError::Config(_))
        ));
        assert!(matches!(
            PatternSet::new(&["no-group"]),
            Err(MarketDataError::Config(_))
        ));
        assert!(matches!(PatternSet::new(&[]), Err(MarketDataError::Config(_))));
    }

    #[test]
    fn test_parse_grouped_number() {
        assert_eq!(parse_grouped_number("1,234,567.89"), Some(1234567.89));
        assert_eq!(parse_grouped_number(" 83.12 "), Some(83.12));
        assert_eq!(parse_grouped_number("1.2.3"), None);
        assert_eq!(parse_grouped_number("inf"), None);
    }

    #[test]
    fn test_parse_page_error_names_provider() {
        let adapter = ScrapeAdapter::google_finance(3, Duration::from_secs(5)).unwrap();
        let err = adapter.parse_page("<html></html>").unwrap_err();
        assert!(err.to_string().starts_with("parse error: GOOGLE_FINANCE"));
    }
}
