//! Caching layer for quotes of shared itineraries.
//!
//! A shared link is opened far more often than it is created, and the
//! token fully determines the itinerary. Quotes are cached per
//! (token, promo code) with a TTL, so a catalog refresh shows up in
//! shared links once the entry expires.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use serde::Serialize;

use crate::domain::Itinerary;
use crate::quote::TripQuote;

/// Cache key: (share token, upper-cased promo code).
type QuoteKey = (String, Option<String>);

/// A decoded shared itinerary together with its quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedQuote {
    pub itinerary: Itinerary,
    pub quote: TripQuote,
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct QuoteCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for QuoteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Cache of shared itinerary quotes.
pub struct QuoteCache {
    entries: MokaCache<QuoteKey, Arc<SharedQuote>>,
}

impl QuoteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &QuoteCacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    fn key(token: &str, promo_code: Option<&str>) -> QuoteKey {
        let promo = promo_code
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty());
        (token.trim().to_string(), promo)
    }

    pub async fn get(&self, token: &str, promo_code: Option<&str>) -> Option<Arc<SharedQuote>> {
        self.entries.get(&Self::key(token, promo_code)).await
    }

    pub async fn insert(&self, token: &str, promo_code: Option<&str>, entry: Arc<SharedQuote>) {
        self.entries
            .insert(Self::key(token, promo_code), entry)
            .await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Drop every entry, e.g. after the catalog changed.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}
