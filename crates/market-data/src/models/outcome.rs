use std::time::Duration;

use super::quote::PriceQuote;

/// Structured result of fetching one quantity.
///
/// Expected network and HTTP conditions are reported here rather than raised.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    /// A value was obtained.
    Success(PriceQuote),
    /// The source answered HTTP 429. `retry_after` is the provider's hint, if any.
    RateLimited { retry_after: Option<Duration> },
    /// The source (or every source) failed; the text explains why.
    Failed(String),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The quote, if this outcome is a success.
    pub fn quote(&self) -> Option<&PriceQuote> {
        match self {
            Self::Success(quote) => Some(quote),
            _ => None,
        }
    }

    /// One-line description of a non-success outcome, for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Success(quote) => format!("ok ({})", quote.source_name()),
            Self::RateLimited {
                retry_after: Some(wait),
            } => format!("rate limited (retry after {}s)", wait.as_secs()),
            Self::RateLimited { retry_after: None } => "rate limited".to_string(),
            Self::Failed(reason) => reason.clone(),
        }
    }
}
