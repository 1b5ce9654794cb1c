use chrono::{DateTime, Utc};

use crate::cache::TtlCache;

/// Session state the resolver reads and mutates.
///
/// Starts with an empty cache and no recorded user fetch. Never persisted;
/// callers that share it across tasks wrap it in a mutex.
#[derive(Clone, Debug, Default)]
pub struct ResolverState {
    pub cache: TtlCache,
    pub last_user_fetch: Option<DateTime<Utc>>,
}

impl ResolverState {
    pub fn new() -> Self {
        Self::default()
    }
}
