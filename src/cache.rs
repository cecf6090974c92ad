//! TTL response cache for community searches.
//!
//! Decorator over [`GeoClient::search_communities`], keyed by
//! `(city, query)` with at most one entry per key. Eviction is lazy:
//! an entry past its TTL is removed by the access that observes it,
//! against an injectable [`Clock`] rather than real timers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::client::GeoClient;
use crate::clock::{Clock, SystemClock};
use crate::config::DEFAULT_CACHE_TTL_SECS;
use crate::error::GeoError;
use crate::models::{Poi, SearchOptions};

struct CacheEntry {
    pois: Vec<Poi>,
    inserted_at: DateTime<Utc>,
}

/// Caching decorator for community searches.
///
/// The entry map is guarded by a plain mutex that is never held across
/// an await, so concurrent requests for distinct keys never serialize
/// on the provider. Concurrent duplicate requests for the same key
/// before the first completes each issue their own provider call; the
/// last write wins. Failed searches never populate the cache.
pub struct SearchCache {
    client: GeoClient,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<(String, String), CacheEntry>>,
}

impl SearchCache {
    /// Cache with the default 5-minute TTL and the wall clock.
    pub fn new(client: GeoClient) -> Self {
        Self::with_ttl_and_clock(
            client,
            Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            Arc::new(SystemClock),
        )
    }

    pub fn with_ttl_and_clock(client: GeoClient, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Cached community search.
    ///
    /// Within the TTL the cached list is returned without contacting
    /// the provider; on a miss (or after expiry) the underlying search
    /// runs and its successful result repopulates the entry.
    pub async fn search_communities(
        &self,
        options: &SearchOptions,
    ) -> Result<Vec<Poi>, GeoError> {
        let key = (options.city.clone(), options.query.clone());

        if let Some(pois) = self.lookup(&key) {
            debug!("Cache hit for '{}'/'{}'", key.0, key.1);
            return Ok(pois);
        }

        let pois = self.client.search_communities(options).await?;

        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key,
            CacheEntry {
                pois: pois.clone(),
                inserted_at: self.clock.now(),
            },
        );

        Ok(pois)
    }

    /// Return a live entry, evicting it instead when past the TTL.
    fn lookup(&self, key: &(String, String)) -> Option<Vec<Poi>> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();

        match entries.get(key) {
            Some(entry) if now.signed_duration_since(entry.inserted_at) < self.ttl => {
                Some(entry.pois.clone())
            }
            Some(_) => {
                debug!("Evicting expired cache entry for '{}'/'{}'", key.0, key.1);
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Drop all cached entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}
