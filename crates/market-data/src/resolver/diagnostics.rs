//! Per-source attempt tracking for one resolve call.

use std::time::Duration;

use crate::models::{ProviderId, Quantity};

/// Why a source was not called.
#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    /// The source supplies a different quantity.
    QuantityMismatch { supplies: Quantity },
}

/// Record of a single source during a resolve.
#[derive(Clone, Debug)]
pub struct ProviderAttempt {
    pub provider_id: ProviderId,
    pub skipped: Option<SkipReason>,
    pub rate_limited: Option<Option<Duration>>,
    pub error: Option<String>,
    pub success: bool,
}

impl ProviderAttempt {
    fn new(provider_id: ProviderId) -> Self {
        Self {
            provider_id,
            skipped: None,
            rate_limited: None,
            error: None,
            success: false,
        }
    }
}

/// Ordered attempts of one resolve call.
#[derive(Clone, Debug, Default)]
pub struct FetchDiagnostics {
    pub attempts: Vec<ProviderAttempt>,
}

impl FetchDiagnostics {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    pub fn record_skip(&mut self, provider_id: ProviderId, reason: SkipReason) {
        self.attempts.push(ProviderAttempt {
            skipped: Some(reason),
            ..ProviderAttempt::new(provider_id)
        });
    }

    pub fn record_error(&mut self, provider_id: ProviderId, error: String) {
        self.attempts.push(ProviderAttempt {
            error: Some(error),
            ..ProviderAttempt::new(provider_id)
        });
    }

    pub fn record_rate_limited(&mut self, provider_id: ProviderId, retry_after: Option<Duration>) {
        self.attempts.push(ProviderAttempt {
            rate_limited: Some(retry_after),
            ..ProviderAttempt::new(provider_id)
        });
    }

    pub fn record_success(&mut self, provider_id: ProviderId) {
        self.attempts.push(ProviderAttempt {
            success: true,
            ..ProviderAttempt::new(provider_id)
        });
    }

    /// Summary for logging and for the failure reason handed to callers.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| {
                if a.success {
                    format!("{}: SUCCESS", a.provider_id)
                } else if let Some(skip) = &a.skipped {
                    format!("{}: SKIPPED ({:?})", a.provider_id, skip)
                } else if let Some(retry_after) = &a.rate_limited {
                    match retry_after {
                        Some(wait) => format!(
                            "{}: RATE LIMITED (retry after {}s)",
                            a.provider_id,
                            wait.as_secs()
                        ),
                        None => format!("{}: RATE LIMITED", a.provider_id),
                    }
                } else if let Some(err) = &a.error {
                    format!("{}: ERROR ({})", a.provider_id, err)
                } else {
                    format!("{}: UNKNOWN", a.provider_id)
                }
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    pub fn has_success(&self) -> bool {
        self.attempts.iter().any(|a| a.success)
    }

    /// Number of sources that were actually called.
    pub fn called(&self) -> usize {
        self.attempts.iter().filter(|a| a.skipped.is_none()).count()
    }

    /// Longest `Retry-After` hint seen, if any source was rate limited with one.
    pub fn longest_retry_after(&self) -> Option<Duration> {
        self.attempts
            .iter()
            .filter_map(|a| a.rate_limited.flatten())
            .max()
    }

    pub fn errors(&self) -> Vec<(&ProviderId, &str)> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_ref().map(|e| (&a.provider_id, e.as_str())))
            .collect()
    }
}
