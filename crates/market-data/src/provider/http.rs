//! Shared HTTP plumbing for source adapters.
//!
//! One GET per call, with the status mapped onto [`MarketDataError`] so the
//! fetcher can classify it.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::errors::MarketDataError;

/// Default per-call timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent to sources that reject non-browser clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Build a client with the given per-call timeout.
pub fn build_client(timeout: Duration) -> Result<Client, MarketDataError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| MarketDataError::Config(format!("Failed to initialize HTTP client: {}", e)))
}

/// Issue one GET and return the body of a successful response.
///
/// - 429 → [`MarketDataError::RateLimited`] with the parsed `Retry-After`
/// - 5xx → [`MarketDataError::ServerError`]
/// - other non-success → [`MarketDataError::HttpStatus`]
pub async fn get_text(
    client: &Client,
    provider: &str,
    url: &str,
    headers: HeaderMap,
) -> Result<String, MarketDataError> {
    debug!("{} request", provider);

    let response = client
        .get(url)
        .headers(headers)
        .send()
        .await
        .map_err(|e| MarketDataError::from_reqwest(provider, e))?;

    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = parse_retry_after(response.headers().get(RETRY_AFTER));
        warn!("{} rate limited (retry after {:?})", provider, retry_after);
        return Err(MarketDataError::RateLimited {
            provider: provider.to_string(),
            retry_after,
        });
    }

    if status.is_server_error() {
        return Err(MarketDataError::ServerError {
            provider: provider.to_string(),
            status: status.as_u16(),
        });
    }

    if !status.is_success() {
        return Err(MarketDataError::HttpStatus {
            provider: provider.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| MarketDataError::from_reqwest(provider, e))
}

/// Parse a `Retry-After` header given as integer seconds.
///
/// Absent, non-integer (including the HTTP-date form) or negative values
/// yield no hint.
pub fn parse_retry_after(value: Option<&HeaderValue>) -> Option<Duration> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
