//! Pair-keyed exchange-rate cache.
//!
//! Rates are cached per (from, to) currency pair so switching the target
//! currency can never serve a stale rate belonging to a different pair.
//! Each pair has a durable storage slot under `rate-exchange:<FROM>-<TO>`
//! holding `{value, expiry}`; an in-process `moka` tier avoids re-reading
//! storage within a session. A slot whose expiry has passed is deleted on
//! read, and `store` overwrites unconditionally.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use localprice_core::RatePair;
use moka::future::Cache;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, RATE_CACHE_KEY};

/// Upper bound on distinct pairs kept in the in-process tier.
const MEMORY_CAPACITY: u64 = 64;

/// One cached rate with its absolute expiry (epoch milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct CachedRate {
    #[serde(with = "rust_decimal::serde::float")]
    value: Decimal,
    expiry: i64,
}

/// Exchange-rate cache: durable slots with an in-process read tier.
pub struct RateCache {
    store: Arc<dyn KeyValueStore>,
    memory: Cache<RatePair, CachedRate>,
    ttl: Duration,
}

impl RateCache {
    /// Create a cache over `store` whose entries live for `ttl`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        let memory = Cache::builder()
            .max_capacity(MEMORY_CAPACITY)
            .time_to_live(ttl)
            .build();

        Self { store, memory, ttl }
    }

    /// Durable storage key of a pair's slot.
    #[must_use]
    pub fn slot_key(pair: &RatePair) -> String {
        format!("{RATE_CACHE_KEY}:{pair}")
    }

    /// Read the cached rate for `pair`, if present and not expired.
    ///
    /// An expired or unreadable slot is deleted and reported as a miss.
    pub async fn get(&self, pair: &RatePair) -> Option<Decimal> {
        if let Some(cached) = self.memory.get(pair).await {
            if now_ms() < cached.expiry {
                return Some(cached.value);
            }
            self.memory.invalidate(pair).await;
        }

        let key = Self::slot_key(pair);
        let raw = self.store.get(&key)?;
        let cached = match serde_json::from_str::<CachedRate>(&raw) {
            Ok(cached) => cached,
            Err(err) => {
                warn!(key = %key, error = %err, "discarding unreadable rate slot");
                self.store.remove(&key);
                return None;
            }
        };

        if now_ms() < cached.expiry {
            self.memory.insert(pair.clone(), cached).await;
            Some(cached.value)
        } else {
            debug!(pair = %pair, "cached rate expired");
            self.store.remove(&key);
            None
        }
    }

    /// Store `value` for `pair`, overwriting any previous slot.
    pub async fn store(&self, pair: &RatePair, value: Decimal) {
        let cached = CachedRate {
            value,
            expiry: now_ms().saturating_add(self.ttl_ms()),
        };

        match serde_json::to_string(&cached) {
            Ok(json) => self.store.set(&Self::slot_key(pair), &json),
            Err(err) => warn!(pair = %pair, error = %err, "failed to serialize rate slot"),
        }
        self.memory.insert(pair.clone(), cached).await;
    }

    fn ttl_ms(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use localprice_core::CurrencyCode;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::storage::MemoryStore;

    fn pair(from: &str, to: &str) -> RatePair {
        RatePair::new(
            CurrencyCode::parse(from).expect("valid code"),
            CurrencyCode::parse(to).expect("valid code"),
        )
    }

    #[tokio::test]
    async fn test_store_then_get_roundtrip() {
        let store = Arc::new(MemoryStore::new());
        let cache = RateCache::new(store.clone(), Duration::from_secs(3600));
        let usd_eur = pair("USD", "EUR");

        assert_eq!(cache.get(&usd_eur).await, None);

        cache.store(&usd_eur, dec!(0.91)).await;
        assert_eq!(cache.get(&usd_eur).await, Some(dec!(0.91)));

        // The durable slot exists under the pair-scoped key.
        assert!(store.get(&RateCache::slot_key(&usd_eur)).is_some());
    }

    #[tokio::test]
    async fn test_pairs_do_not_shadow_each_other() {
        let store = Arc::new(MemoryStore::new());
        let cache = RateCache::new(store, Duration::from_secs(3600));

        cache.store(&pair("USD", "EUR"), dec!(0.91)).await;
        cache.store(&pair("USD", "MAD"), dec!(9.87)).await;

        assert_eq!(cache.get(&pair("USD", "EUR")).await, Some(dec!(0.91)));
        assert_eq!(cache.get(&pair("USD", "MAD")).await, Some(dec!(9.87)));
        assert_eq!(cache.get(&pair("EUR", "MAD")).await, None);
    }

    #[tokio::test]
    async fn test_expired_slot_is_cleared() {
        let store = Arc::new(MemoryStore::new());
        let usd_eur = pair("USD", "EUR");
        let key = RateCache::slot_key(&usd_eur);

        // A slot written in some earlier session, already past its expiry.
        store.set(&key, r#"{"value":0.91,"expiry":1000}"#);

        let cache = RateCache::new(store.clone(), Duration::from_secs(3600));
        assert_eq!(cache.get(&usd_eur).await, None);
        assert_eq!(store.get(&key), None);
    }

    #[tokio::test]
    async fn test_unreadable_slot_is_cleared() {
        let store = Arc::new(MemoryStore::new());
        let usd_eur = pair("USD", "EUR");
        let key = RateCache::slot_key(&usd_eur);

        store.set(&key, "garbage");

        let cache = RateCache::new(store.clone(), Duration::from_secs(3600));
        assert_eq!(cache.get(&usd_eur).await, None);
        assert_eq!(store.get(&key), None);
    }

    #[tokio::test]
    async fn test_store_overwrites_unconditionally() {
        let store = Arc::new(MemoryStore::new());
        let cache = RateCache::new(store, Duration::from_secs(3600));
        let usd_eur = pair("USD", "EUR");

        cache.store(&usd_eur, dec!(0.91)).await;
        cache.store(&usd_eur, dec!(0.93)).await;
        assert_eq!(cache.get(&usd_eur).await, Some(dec!(0.93)));
    }
}
