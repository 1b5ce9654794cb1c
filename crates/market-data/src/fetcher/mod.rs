//! Bounded retry with exponential backoff around a single source.
//!
//! Folds every expected failure into a [`FetchOutcome`]:
//! - transport / timeout / 5xx: retried after `base_backoff * 2^(attempt-1)`
//! - 429: returned at once as `RateLimited`, no further attempts spent
//! - parse and other client errors: returned at once as `Failed`

use std::time::Duration;

use log::{debug, warn};

use crate::errors::{MarketDataError, RetryClass};
use crate::models::FetchOutcome;
use crate::provider::SourceAdapter;

/// Default number of attempts per source.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default first backoff delay.
pub const DEFAULT_BASE_BACKOFF: Duration = Duration::from_millis(500);

/// Retry configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each one after.
    pub base_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_backoff: Duration) -> Self {
        Self {
            max_attempts,
            base_backoff,
        }
    }

    /// Sleep before the attempt following `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_backoff.saturating_mul(1u32 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: DEFAULT_BASE_BACKOFF,
        }
    }
}

/// Runs one source adapter under a [`RetryPolicy`].
#[derive(Clone, Debug, Default)]
pub struct RetryingFetcher {
    policy: RetryPolicy,
}

impl RetryingFetcher {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetch from `adapter` with this fetcher's policy.
    pub async fn fetch_with_retry(&self, adapter: &dyn SourceAdapter) -> FetchOutcome {
        Self::fetch_with_policy(adapter, self.policy.max_attempts, self.policy.base_backoff).await
    }

    /// Fetch from `adapter`, making at most `max_attempts` calls.
    pub async fn fetch_with_policy(
        adapter: &dyn SourceAdapter,
        max_attempts: u32,
        base_backoff: Duration,
    ) -> FetchOutcome {
        let policy = RetryPolicy::new(max_attempts.max(1), base_backoff);
        let mut attempt = 1;

        loop {
            let error = match adapter.fetch().await {
                Ok(quote) => {
                    debug!(
                        "'{}' returned {} on attempt {}",
                        adapter.id(),
                        quote.quantity(),
                        attempt
                    );
                    return FetchOutcome::Success(quote);
                }
                Err(e) => e,
            };

            match error.retry_class() {
                RetryClass::RateLimited => {
                    let retry_after = match error {
                        MarketDataError::RateLimited { retry_after, .. } => retry_after,
                        _ => None,
                    };
                    warn!(
                        "'{}' rate limited on attempt {}, not retrying",
                        adapter.id(),
                        attempt
                    );
                    return FetchOutcome::RateLimited { retry_after };
                }
                RetryClass::NextProvider => {
                    debug!("'{}' failed with {}, not retrying", adapter.id(), error);
                    return FetchOutcome::Failed(error.to_string());
                }
                RetryClass::WithBackoff => {
                    if attempt >= policy.max_attempts {
                        warn!(
                            "'{}' failed after {} attempts: {}",
                            adapter.id(),
                            attempt,
                            error
                        );
                        return FetchOutcome::Failed(error.to_string());
                    }

                    let delay = policy.backoff_for(attempt);
                    debug!(
                        "'{}' attempt {} failed with {}, retrying in {:?}",
                        adapter.id(),
                        attempt,
                        error,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
