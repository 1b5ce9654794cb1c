//! Advisory gate on user-triggered refreshes.
//!
//! Keeps a person from hammering upstream sources inside one rate-limit
//! window. Cached reads are never gated.

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::ResolverState;

/// Default minimum spacing between forced refreshes.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CooldownGate {
    window: Duration,
}

impl CooldownGate {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// `Ok` if a forced refresh may run at `now`, else the remaining wait.
    pub fn check(&self, state: &ResolverState, now: DateTime<Utc>) -> Result<(), Duration> {
        let Some(last) = state.last_user_fetch else {
            return Ok(());
        };

        // A clock that went backwards counts as no time elapsed.
        let elapsed = (now - last).to_std().unwrap_or(Duration::ZERO);
        if elapsed < self.window {
            Err(self.window - elapsed)
        } else {
            Ok(())
        }
    }

    pub fn record(&self, state: &mut ResolverState, now: DateTime<Utc>) {
        state.last_user_fetch = Some(now);
    }
}

impl Default for CooldownGate {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}
