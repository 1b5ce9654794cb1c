//! Market data models
//!
//! This module contains the core data types for rate fetching:
//! - `types` - Type aliases for common identifiers (ProviderId)
//! - `quantity` - The logical quantities the pipeline resolves (Quantity, QuoteUnit)
//! - `quote` - The immutable value produced by a source (PriceQuote)
//! - `outcome` - The structured result of a fetch (FetchOutcome)

mod outcome;
mod quantity;
mod quote;
mod types;

pub use outcome::FetchOutcome;
pub use quantity::{Quantity, QuoteUnit};
pub use quote::PriceQuote;
pub use types::ProviderId;
