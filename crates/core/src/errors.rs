//! Core error types for the goldrate application.
//!
//! Expected upstream conditions (timeouts, 429s, bad payloads) never surface
//! here directly: the resolver folds them into a `FetchOutcome`, and only an
//! exhausted resolve becomes [`Error::RateUnavailable`].

use goldrate_market_data::MarketDataError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the goldrate application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Please wait {remaining_secs}s before fetching again")]
    Cooldown { remaining_secs: u64 },

    #[error("Could not get {quantity}: {reason}")]
    RateUnavailable { quantity: String, reason: String },

    #[error("Calculation failed: {0}")]
    Calculation(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
