//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The error enum returned by every source adapter
//! - [`RetryClass`]: Classification for determining retry behavior
//!
//! Errors here describe a single failed call. They never escape the resolver:
//! [`crate::fetcher::RetryingFetcher`] folds them into a
//! [`crate::models::FetchOutcome`].

mod retry;

pub use retry::RetryClass;

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during a single source adapter call.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// Connection failure, DNS failure, reset, or a body that could not be read.
    #[error("Transport error: {provider} - {message}")]
    Transport {
        /// The provider that could not be reached
        provider: String,
        /// Underlying transport error text
        message: String,
    },

    /// The request exceeded the per-call timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a 5xx status.
    #[error("Server error: {provider} - HTTP {status}")]
    ServerError {
        /// The provider that failed
        provider: String,
        /// HTTP status code
        status: u16,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
        /// Parsed `Retry-After` hint, if the provider sent a usable one
        retry_after: Option<Duration>,
    },

    /// Any other non-success status (403, 404, ...).
    #[error("HTTP error: {provider} - HTTP {status}")]
    HttpStatus {
        /// The provider that returned the status
        provider: String,
        /// HTTP status code
        status: u16,
    },

    /// The response body did not have the expected shape.
    #[error("parse error: {provider} - {message}")]
    Parse {
        /// The provider whose payload could not be parsed
        provider: String,
        /// What was missing or malformed
        message: String,
    },

    /// The provider reported a failure inside an otherwise valid payload.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A source was built from an invalid specification (bad template,
    /// uncompilable pattern). Raised at construction time.
    #[error("Invalid source configuration: {0}")]
    Config(String),

    /// A quantity name that is neither `xau_usd` nor `usd_inr`.
    #[error("Unknown quantity '{0}' (expected xau_usd or usd_inr)")]
    UnknownQuantity(String),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use goldrate_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::Timeout { provider: "YAHOO".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = MarketDataError::Parse {
    ///     provider: "YAHOO".to_string(),
    ///     message: "missing price".to_string(),
    /// };
    /// assert_eq!(error.retry_class(), RetryClass::NextProvider);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } | Self::ServerError { .. } => {
                RetryClass::WithBackoff
            }

            Self::RateLimited { .. } => RetryClass::RateLimited,

            Self::HttpStatus { .. }
            | Self::Parse { .. }
            | Self::ProviderError { .. }
            | Self::Config(_)
            | Self::UnknownQuantity(_) => RetryClass::NextProvider,
        }
    }

    /// Build the error for a failed `reqwest` send.
    ///
    /// The request URL is dropped: some endpoints carry an access key in the
    /// query string and the message ends up in logs and user-facing errors.
    pub(crate) fn from_reqwest(provider: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::Transport {
                provider: provider.to_string(),
                message: error.without_url().to_string(),
            }
        }
    }

    pub(crate) fn parse(provider: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_retries_with_backoff() {
        let error = MarketDataError::Transport {
            provider: "YAHOO".to_string(),
            message: "connection reset".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_timeout_retries_with_backoff() {
        let error = MarketDataError::Timeout {
            provider: "INVESTING".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_server_error_retries_with_backoff() {
        let error = MarketDataError::ServerError {
            provider: "YAHOO".to_string(),
            status: 503,
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_rate_limited_is_not_retried() {
        let error = MarketDataError::RateLimited {
            provider: "YAHOO".to_string(),
            retry_after: Some(Duration::from_secs(30)),
        };
        assert_eq!(error.retry_class(), RetryClass::RateLimited);
    }

    #[test]
    fn test_client_errors_try_next_provider() {
        let forbidden = MarketDataError::HttpStatus {
            provider: "INVESTING".to_string(),
            status: 403,
        };
        assert_eq!(forbidden.retry_class(), RetryClass::NextProvider);

        let parse = MarketDataError::parse("YAHOO", "no price field");
        assert_eq!(parse.retry_class(), RetryClass::NextProvider);

        let provider = MarketDataError::ProviderError {
            provider: "METAL_PRICE_API".to_string(),
            message: "API request failed".to_string(),
        };
        assert_eq!(provider.retry_class(), RetryClass::NextProvider);
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::parse("YAHOO", "missing quoteResponse");
        assert_eq!(
            format!("{}", error),
            "parse error: YAHOO - missing quoteResponse"
        );

        let error = MarketDataError::ServerError {
            provider: "INVESTING".to_string(),
            status: 502,
        };
        assert_eq!(format!("{}", error), "Server error: INVESTING - HTTP 502");

        let error = MarketDataError::RateLimited {
            provider: "YAHOO".to_string(),
            retry_after: None,
        };
        assert_eq!(format!("{}", error), "Rate limited: YAHOO");
    }
}
