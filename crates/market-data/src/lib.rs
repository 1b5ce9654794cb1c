//! Goldrate Market Data Crate
//!
//! Acquires the two quantities a gold rate is computed from, spot gold
//! (USD per troy ounce) and the USD→INR exchange rate, from unreliable,
//! rate-limited upstream sources.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  PriceResolver   |  cache check, priority fallback, diagnostics
//! +------------------+
//!     |          |
//!     v          v
//! +----------+  +------------------+
//! | TtlCache |  | RetryingFetcher  |  bounded retry, exponential backoff
//! +----------+  +------------------+
//!                        |
//!                        v
//!               +------------------+
//!               |  SourceAdapter   |  one request, typed error
//!               +------------------+
//!                        |
//!                        v
//!               +------------------+
//!               |   PriceQuote     |  value + unit + provenance
//!               +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quantity`] - The logical quantity being resolved (`xau_usd`, `usd_inr`)
//! - [`PriceQuote`] - An observed value with its source and timestamp
//! - [`FetchOutcome`] - `Success`, `RateLimited` or `Failed`, never an error
//! - [`ResolverState`] - Session cache and last user fetch time

pub mod cache;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod provider;
pub mod resolver;

// Re-export all public types from models
pub use models::{FetchOutcome, PriceQuote, ProviderId, Quantity, QuoteUnit};

// Re-export pipeline types
pub use cache::{CacheEntry, TtlCache};
pub use fetcher::{RetryPolicy, RetryingFetcher};
pub use resolver::{
    CooldownGate, FetchDiagnostics, PriceResolver, ProviderAttempt, ResolverState, SkipReason,
};

// Re-export provider types
pub use provider::exchange_rate::ExchangeRateAdapter;
pub use provider::json_quote::{JsonQuoteAdapter, PricePath};
pub use provider::metal_price_api::{MetalPriceApiAdapter, RateForm};
pub use provider::scrape::{PatternSet, ScrapeAdapter};
pub use provider::{SourceAdapter, SourceSpec};

// Re-export error types
pub use errors::{MarketDataError, RetryClass};
