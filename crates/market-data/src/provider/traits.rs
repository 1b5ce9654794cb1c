//! Source adapter trait definitions.
//!
//! This module defines the core `SourceAdapter` trait that all upstream
//! sources must implement.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{PriceQuote, Quantity};

/// Trait for upstream rate sources.
///
/// Implement this trait to add support for a new provider. An adapter issues
/// a single request per [`fetch`](Self::fetch) call and never retries; retry
/// and fallback belong to the fetcher and the resolver.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use goldrate_market_data::provider::SourceAdapter;
///
/// struct FixedRate;
///
/// #[async_trait]
/// impl SourceAdapter for FixedRate {
///     fn id(&self) -> &str {
///         "FIXED"
///     }
///
///     fn quantity(&self) -> Quantity {
///         Quantity::UsdInr
///     }
///
///     async fn fetch(&self) -> Result<PriceQuote, MarketDataError> {
///         Ok(PriceQuote::observed_now(83.0, Quantity::UsdInr, self.id()))
///     }
/// }
/// ```
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Unique identifier for this source.
    ///
    /// Used for logging, diagnostics and as the quote's source name.
    fn id(&self) -> &str;

    /// The single logical quantity this source supplies.
    fn quantity(&self) -> Quantity;

    /// Source priority for ordering.
    ///
    /// Lower values = higher priority. Default is 10.
    fn priority(&self) -> u8 {
        10
    }

    /// Fetch the current value once.
    ///
    /// # Returns
    ///
    /// The quote on success, or a `MarketDataError` describing why the single
    /// attempt failed. Malformed payloads are reported as
    /// [`MarketDataError::Parse`], never as a default value.
    async fn fetch(&self) -> Result<PriceQuote, MarketDataError>;
}
