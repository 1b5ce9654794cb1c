//! Static per-source configuration.

use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::{ProviderId, Quantity};

/// Static description of one upstream source.
///
/// Immutable once built. The endpoint template uses `{name}` placeholders
/// that are filled (URL-encoded) at request time, e.g.
/// `https://query1.finance.yahoo.com/v7/finance/quote?symbols={symbol}`.
#[derive(Clone, Debug)]
pub struct SourceSpec {
    pub name: ProviderId,
    pub quantity: Quantity,
    pub endpoint_template: String,
    /// Lower values are tried first.
    pub priority: u8,
}

impl SourceSpec {
    pub fn new(
        name: impl Into<ProviderId>,
        quantity: Quantity,
        endpoint_template: impl Into<String>,
        priority: u8,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            endpoint_template: endpoint_template.into(),
            priority,
        }
    }

    /// Fill the endpoint template.
    ///
    /// Every `{key}` in the template must be supplied; a placeholder left
    /// over after substitution is a configuration error.
    pub fn render_endpoint(&self, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let mut url = self.endpoint_template.clone();
        for (key, value) in params {
            url = url.replace(&format!("{{{}}}", key), &encode(value));
        }

        if let Some(start) = url.find('{') {
            let rest = &url[start..];
            let placeholder = rest.split_inclusive('}').next().unwrap_or(rest);
            return Err(MarketDataError::Config(format!(
                "{}: unfilled placeholder {} in endpoint template",
                self.name, placeholder
            )));
        }

        Ok(url)
    }
}
