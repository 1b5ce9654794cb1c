//! Cache-first, priority-ordered fallback across sources for one quantity.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use super::diagnostics::{FetchDiagnostics, SkipReason};
use super::ResolverState;
use crate::fetcher::RetryingFetcher;
use crate::models::{FetchOutcome, PriceQuote, ProviderId, Quantity};
use crate::provider::SourceAdapter;

/// Resolves a quantity from the cache or, failing that, from the first
/// source that answers.
#[derive(Clone, Debug, Default)]
pub struct PriceResolver {
    fetcher: RetryingFetcher,
}

impl PriceResolver {
    pub fn new(fetcher: RetryingFetcher) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &RetryingFetcher {
        &self.fetcher
    }

    /// Resolve `quantity`.
    ///
    /// 1. Unless `force_refresh`, a fresh cache entry is returned with its
    ///    source annotated `(cached)` and no source is called
    /// 2. Sources supplying `quantity` are tried by ascending priority, each
    ///    through the retrying fetcher; the first valid quote is cached for
    ///    `ttl` and returned
    /// 3. If none succeeds, `Failed` carries every source's reason
    pub async fn resolve(
        &self,
        state: &mut ResolverState,
        quantity: Quantity,
        adapters: &[Arc<dyn SourceAdapter>],
        ttl: Duration,
        force_refresh: bool,
    ) -> FetchOutcome {
        let key = quantity.key();

        if !force_refresh {
            if let Some(quote) = state.cache.get(key) {
                debug!("'{}' served from cache ({})", key, quote.source_name());
                return FetchOutcome::Success(quote.cached());
            }
        }

        let mut diagnostics = FetchDiagnostics::new();
        let ordered = ordered_adapters(adapters, quantity, &mut diagnostics);

        if ordered.is_empty() {
            warn!("No sources configured for '{}'", key);
            return FetchOutcome::Failed(format!("no sources configured for {}", key));
        }

        for adapter in ordered {
            let provider_id: ProviderId = Cow::Owned(adapter.id().to_string());

            match self.fetcher.fetch_with_retry(&**adapter).await {
                FetchOutcome::Success(quote) => {
                    if let Err(reason) = validate(&quote, quantity) {
                        warn!("'{}' returned an unusable quote: {}", provider_id, reason);
                        diagnostics.record_error(provider_id, reason);
                        continue;
                    }

                    diagnostics.record_success(provider_id);
                    info!(
                        "Resolved '{}' = {} ({})",
                        key,
                        quote.quantity(),
                        diagnostics.summary()
                    );
                    state.cache.set(key, quote.clone(), ttl);
                    return FetchOutcome::Success(quote);
                }
                FetchOutcome::RateLimited { retry_after } => {
                    diagnostics.record_rate_limited(provider_id, retry_after);
                }
                FetchOutcome::Failed(reason) => {
                    diagnostics.record_error(provider_id, reason);
                }
            }
        }

        let summary = diagnostics.summary();
        warn!("All sources failed for '{}': {}", key, summary);
        FetchOutcome::Failed(summary)
    }
}

/// Sources supplying `quantity`, sorted by priority (stable for ties).
///
/// Sources for other quantities are recorded as skipped.
fn ordered_adapters<'a>(
    adapters: &'a [Arc<dyn SourceAdapter>],
    quantity: Quantity,
    diagnostics: &mut FetchDiagnostics,
) -> Vec<&'a Arc<dyn SourceAdapter>> {
    let mut eligible = Vec::with_capacity(adapters.len());

    for adapter in adapters {
        if adapter.quantity() == quantity {
            eligible.push(adapter);
        } else {
            diagnostics.record_skip(
                Cow::Owned(adapter.id().to_string()),
                SkipReason::QuantityMismatch {
                    supplies: adapter.quantity(),
                },
            );
        }
    }

    eligible.sort_by_key(|a| a.priority());
    eligible
}

/// A quote is usable iff it is a finite positive value in the quantity's unit.
fn validate(quote: &PriceQuote, quantity: Quantity) -> Result<(), String> {
    let value = quote.quantity();
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("invalid value {}", value));
    }
    if quote.unit() != quantity.unit() {
        return Err(format!(
            "unit {:?} does not match {}",
            quote.unit(),
            quantity
        ));
    }
    Ok(())
}
