use std::collections::HashMap;
use std::sync::Arc;

use log::info;

use goldrate_market_data::{
    ExchangeRateAdapter, JsonQuoteAdapter, MetalPriceApiAdapter, Quantity, ScrapeAdapter,
    SourceAdapter,
};

use crate::errors::Result;
use crate::settings::CalculatorSettings;

/// Source adapters grouped by the quantity they supply.
#[derive(Clone, Default)]
pub struct RateSources {
    by_quantity: HashMap<Quantity, Vec<Arc<dyn SourceAdapter>>>,
}

impl RateSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in sources, by priority:
    ///
    /// | Quantity | Sources |
    /// |----------|---------|
    /// | xau_usd  | Investing, Yahoo, Google Finance, Metal Price API* |
    /// | usd_inr  | exchangerate.host, Metal Price API* |
    ///
    /// \* only when an API key is configured
    pub fn defaults(settings: &CalculatorSettings) -> Result<Self> {
        let timeout = settings.http_timeout;
        let mut sources = Self::new()
            .with(Arc::new(JsonQuoteAdapter::investing(1, timeout)?))
            .with(Arc::new(JsonQuoteAdapter::yahoo(2, timeout)?))
            .with(Arc::new(ScrapeAdapter::google_finance(3, timeout)?))
            .with(Arc::new(ExchangeRateAdapter::new(1, timeout)?));

        if let Some(key) = &settings.metal_price_api_key {
            info!("Metal Price API key configured, enabling paid fallback");
            sources = sources
                .with(Arc::new(MetalPriceApiAdapter::xau_usd(key.clone(), 4, timeout)?))
                .with(Arc::new(MetalPriceApiAdapter::usd_inr(key.clone(), 2, timeout)?));
        }

        Ok(sources)
    }

    pub fn with(mut self, adapter: Arc<dyn SourceAdapter>) -> Self {
        self.add(adapter);
        self
    }

    pub fn add(&mut self, adapter: Arc<dyn SourceAdapter>) {
        self.by_quantity
            .entry(adapter.quantity())
            .or_default()
            .push(adapter);
    }

    pub fn for_quantity(&self, quantity: Quantity) -> &[Arc<dyn SourceAdapter>] {
        self.by_quantity
            .get(&quantity)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Source ids for `quantity`, in registration order.
    pub fn ids(&self, quantity: Quantity) -> Vec<&str> {
        self.for_quantity(quantity).iter().map(|a| a.id()).collect()
    }
}
