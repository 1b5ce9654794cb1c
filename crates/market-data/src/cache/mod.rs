//! Time-to-live cache for resolved quotes.
//!
//! Entries are keyed by quantity key (`"xau_usd"`, `"usd_inr"`). An entry is
//! served iff `now < expires_at`; expired entries are dropped on the read that
//! finds them. There is no capacity bound and no background sweep.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PriceQuote;

/// A cached quote and the instant it stops being served.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub quote: PriceQuote,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Clone, Debug, Default)]
pub struct TtlCache {
    entries: HashMap<String, CacheEntry>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: &str) -> Option<PriceQuote> {
        self.get_at(key, Utc::now())
    }

    /// Quote for `key` as seen at `now`, evicting it if it has expired.
    pub fn get_at(&mut self, key: &str, now: DateTime<Utc>) -> Option<PriceQuote> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh_at(now) => Some(entry.quote.clone()),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn set(&mut self, key: &str, quote: PriceQuote, ttl: Duration) {
        self.set_at(key, quote, ttl, Utc::now());
    }

    /// Overwrite `key`, expiring `ttl` after `now`.
    ///
    /// A ttl too large to represent saturates to the maximum timestamp.
    pub fn set_at(&mut self, key: &str, quote: PriceQuote, ttl: Duration, now: DateTime<Utc>) {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.entries
            .insert(key.to_string(), CacheEntry { quote, expires_at });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quantity;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn quote(value: f64) -> PriceQuote {
        PriceQuote::new(value, Quantity::XauUsd.unit(), "YAHOO", t(0))
    }

    #[test]
    fn test_hit_within_ttl_miss_after() {
        let mut cache = TtlCache::new();
        cache.set_at("xau_usd", quote(2000.0), Duration::from_secs(10), t(0));

        assert_eq!(cache.get_at("xau_usd", t(9)), Some(quote(2000.0)));
        assert_eq!(cache.get_at("xau_usd", t(11)), None);
    }

    #[test]
    fn test_expiry_boundary_is_a_miss() {
        let mut cache = TtlCache::new();
        cache.set_at("xau_usd", quote(2000.0), Duration::from_secs(10), t(0));

        assert_eq!(cache.get_at("xau_usd", t(10)), None);
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let mut cache = TtlCache::new();
        cache.set_at("xau_usd", quote(2000.0), Duration::from_secs(1), t(0));
        assert_eq!(cache.len(), 1);

        assert!(cache.get_at("xau_usd", t(5)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_never_set_key_is_absent() {
        let mut cache = TtlCache::new();
        assert!(cache.get("usd_inr").is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let mut cache = TtlCache::new();
        cache.set_at("xau_usd", quote(2000.0), Duration::from_secs(10), t(0));
        cache.set_at("xau_usd", quote(2010.0), Duration::from_secs(10), t(5));

        assert_eq!(cache.get_at("xau_usd", t(12)), Some(quote(2010.0)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = TtlCache::new();
        cache.set("xau_usd", quote(2000.0), Duration::from_secs(60));
        cache.set("usd_inr", quote(83.0), Duration::from_secs(60));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.get("xau_usd").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let mut cache = TtlCache::new();
        cache.set_at("xau_usd", quote(2000.0), Duration::MAX, t(0));
        assert!(cache.get_at("xau_usd", t(1_000_000)).is_some());
    }
}
