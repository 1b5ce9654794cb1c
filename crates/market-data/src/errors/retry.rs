/// Classification for retry policy.
///
/// Used by the fetcher to decide what to do with an error coming back from a
/// single source adapter call.
///
/// # Behavior Summary
///
/// | Class | Retry same source? | Hand back to resolver? |
/// |-------|--------------------|------------------------|
/// | `WithBackoff` | Yes, after exponential backoff | Only once attempts run out |
/// | `RateLimited` | No | Immediately, with the retry hint |
/// | `NextProvider` | No | Immediately, as a failure |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Transient transport or server failure (timeout, connection reset, 5xx).
    /// Worth another attempt against the same source after a backoff sleep.
    WithBackoff,

    /// The provider answered HTTP 429.
    ///
    /// Never retried automatically and never consumes further attempts; the
    /// caller decides whether to wait out the hint or move to another source.
    RateLimited,

    /// The source cannot produce a value for this request (schema mismatch,
    /// client error, misconfiguration). Retrying won't help; try the next
    /// source.
    NextProvider,
}
