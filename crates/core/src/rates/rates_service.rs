use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::Mutex;

use goldrate_market_data::{
    CooldownGate, FetchOutcome, PriceQuote, PriceResolver, Quantity, ResolverState, RetryPolicy,
    RetryingFetcher,
};

use super::rates_model::{RateResponse, RateSnapshot};
use super::rates_traits::RateServiceTrait;
use super::sources::RateSources;
use crate::errors::{Error, Result};
use crate::pricing::GoldRateCalculator;
use crate::settings::CalculatorSettings;

/// Rate lookups for one interactive session.
///
/// The resolver state sits behind a mutex so that at most one resolve runs
/// at a time.
pub struct RateService {
    resolver: PriceResolver,
    state: Arc<Mutex<ResolverState>>,
    sources: RateSources,
    calculator: GoldRateCalculator,
    cooldown: CooldownGate,
    cache_ttl: Duration,
}

impl RateService {
    /// Service over the built-in sources.
    pub fn new(settings: CalculatorSettings) -> Result<Self> {
        let sources = RateSources::defaults(&settings)?;
        Self::with_sources(settings, sources)
    }

    pub fn with_sources(settings: CalculatorSettings, sources: RateSources) -> Result<Self> {
        settings.validate()?;

        let policy = RetryPolicy::new(settings.max_attempts, settings.base_backoff);
        Ok(Self {
            resolver: PriceResolver::new(RetryingFetcher::new(policy)),
            state: Arc::new(Mutex::new(ResolverState::new())),
            sources,
            calculator: GoldRateCalculator::new(settings.pricing),
            cooldown: CooldownGate::new(settings.cooldown),
            cache_ttl: settings.cache_ttl,
        })
    }

    pub fn calculator(&self) -> &GoldRateCalculator {
        &self.calculator
    }

    async fn resolve(
        &self,
        state: &mut ResolverState,
        quantity: Quantity,
        force_refresh: bool,
    ) -> FetchOutcome {
        self.resolver
            .resolve(
                state,
                quantity,
                self.sources.for_quantity(quantity),
                self.cache_ttl,
                force_refresh,
            )
            .await
    }

    /// Admit a user-forced refresh, or report how long to wait.
    fn admit_forced(&self, state: &mut ResolverState) -> Result<()> {
        let now = Utc::now();
        if let Err(remaining) = self.cooldown.check(state, now) {
            let remaining_secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            debug!("Forced refresh rejected, {}s of cooldown left", remaining_secs);
            return Err(Error::Cooldown { remaining_secs });
        }
        self.cooldown.record(state, now);
        Ok(())
    }

    async fn resolve_quote(
        &self,
        state: &mut ResolverState,
        quantity: Quantity,
        force_refresh: bool,
    ) -> Result<PriceQuote> {
        match self.resolve(state, quantity, force_refresh).await {
            FetchOutcome::Success(quote) => Ok(quote),
            other => Err(Error::RateUnavailable {
                quantity: quantity.key().to_string(),
                reason: other.describe(),
            }),
        }
    }

    fn snapshot(
        &self,
        xau_usd: PriceQuote,
        usd_inr: PriceQuote,
        from_cache: bool,
    ) -> Result<RateSnapshot> {
        let table = self
            .calculator
            .compute(xau_usd.quantity(), usd_inr.quantity())?;
        let display = self.calculator.display_rows(&table)?;
        let fetched_at = xau_usd.observed_at().min(usd_inr.observed_at());

        Ok(RateSnapshot {
            xau_usd,
            usd_inr,
            table,
            display,
            fetched_at,
            from_cache,
        })
    }
}

#[async_trait]
impl RateServiceTrait for RateService {
    async fn get_rate(&self, name: &str, force_refresh: bool) -> RateResponse {
        let quantity = match Quantity::from_str(name) {
            Ok(q) => q,
            Err(e) => return RateResponse::err(e.to_string()),
        };

        let mut state = self.state.lock().await;
        if force_refresh {
            if let Err(e) = self.admit_forced(&mut state) {
                return RateResponse::err(e.to_string());
            }
        }
        RateResponse::from(self.resolve(&mut state, quantity, force_refresh).await)
    }

    async fn clear_cache(&self) {
        self.state.lock().await.cache.clear();
        info!("Rate cache cleared");
    }

    async fn fetch_now(&self) -> Result<RateSnapshot> {
        let mut state = self.state.lock().await;
        self.admit_forced(&mut state)?;

        let xau_usd = self.resolve_quote(&mut state, Quantity::XauUsd, true).await?;
        let usd_inr = self.resolve_quote(&mut state, Quantity::UsdInr, true).await;
        let usd_inr = match usd_inr {
            Ok(quote) => quote,
            Err(e) => {
                warn!("Gold price resolved but FX rate did not: {}", e);
                return Err(e);
            }
        };

        self.snapshot(xau_usd, usd_inr, false)
    }

    async fn current(&self) -> Result<Option<RateSnapshot>> {
        let mut state = self.state.lock().await;
        let xau_usd = state.cache.get(Quantity::XauUsd.key());
        let usd_inr = state.cache.get(Quantity::UsdInr.key());
        drop(state);

        match (xau_usd, usd_inr) {
            (Some(xau_usd), Some(usd_inr)) => self
                .snapshot(xau_usd.cached(), usd_inr.cached(), true)
                .map(Some),
            _ => Ok(None),
        }
    }
}
