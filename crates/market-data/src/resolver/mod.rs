//! Quantity resolution: cache, priority fallback and the user cooldown gate.
//!
//! - [`PriceResolver`] - cache-first resolve across an adapter list
//! - [`ResolverState`] - the cache plus the last user-triggered fetch
//! - [`CooldownGate`] - rejects forced refreshes inside the cooldown window
//! - [`FetchDiagnostics`] - what happened to each source during one resolve

mod cooldown;
mod diagnostics;
mod price_resolver;
mod state;

pub use cooldown::{CooldownGate, DEFAULT_COOLDOWN};
pub use diagnostics::{FetchDiagnostics, ProviderAttempt, SkipReason};
pub use price_resolver::PriceResolver;
pub use state::ResolverState;
