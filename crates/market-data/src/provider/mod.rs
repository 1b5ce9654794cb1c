//! Source adapter abstractions and implementations.
//!
//! This module contains:
//! - The `SourceAdapter` trait that all upstream sources implement
//! - `SourceSpec`, the static per-source configuration
//! - Shared HTTP status classification and `Retry-After` parsing
//! - Concrete adapters (JSON quote APIs, HTML scrape, FX API, paid fallback)
//!
//! # Architecture
//!
//! The adapter layer is designed to be:
//! - **Single-shot**: one request per `fetch()`, no retries or sleeping here
//! - **Defensive**: malformed payloads surface as `MarketDataError::Parse`
//! - **Swappable**: endpoints, price paths and scrape patterns are configuration

pub mod http;
mod source_spec;
mod traits;

pub mod exchange_rate;
pub mod json_quote;
pub mod metal_price_api;
pub mod scrape;

// Re-exports
pub use source_spec::SourceSpec;
pub use traits::SourceAdapter;
