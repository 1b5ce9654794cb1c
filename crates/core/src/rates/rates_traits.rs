use async_trait::async_trait;

use super::rates_model::{RateResponse, RateSnapshot};
use crate::errors::Result;

/// Trait defining the contract for rate lookups.
#[async_trait]
pub trait RateServiceTrait: Send + Sync {
    /// Resolve one quantity by key (`"xau_usd"`, `"usd_inr"`).
    ///
    /// Never fails: unknown names and upstream failures come back with
    /// `success = false`.
    async fn get_rate(&self, name: &str, force_refresh: bool) -> RateResponse;

    async fn clear_cache(&self);

    /// Refresh both quantities now and convert them.
    ///
    /// Rejected with [`crate::Error::Cooldown`] inside the cooldown window.
    async fn fetch_now(&self) -> Result<RateSnapshot>;

    /// Snapshot built from cache only, if both quantities are cached.
    async fn current(&self) -> Result<Option<RateSnapshot>>;
}
