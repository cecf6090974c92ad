//! Shared test doubles for client, cache and retry tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use geo::{Distance, Haversine, Point};

use crate::error::ProviderError;
use crate::models::GeoPoint;
use crate::provider::{MapProvider, RawAddress, RawPoi};

/// Scriptable in-memory map provider.
pub(crate) struct MockProvider {
    pub pois: Vec<RawPoi>,
    /// When set, `search` filters `pois` by exact title match on the
    /// query, modeling per-name detail lookups.
    pub named_lookup: bool,
    /// When set, search operations fail with this provider status.
    pub fail_status: Option<i64>,
    /// Number of upcoming search calls that fail transiently.
    pub fail_next: AtomicUsize,
    pub geocode_point: Option<GeoPoint>,
    pub reverse_address: Option<RawAddress>,
    /// Yield once before responding, so concurrent callers interleave.
    pub yield_before_respond: bool,
    pub search_calls: AtomicUsize,
}

impl MockProvider {
    pub fn empty() -> Self {
        Self {
            pois: Vec::new(),
            named_lookup: false,
            fail_status: None,
            fail_next: AtomicUsize::new(0),
            geocode_point: None,
            reverse_address: None,
            yield_before_respond: false,
            search_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_communities(entries: &[(&str, &str, f64, f64)]) -> Self {
        let mut provider = Self::empty();
        provider.pois = entries
            .iter()
            .map(|(name, address, lng, lat)| RawPoi {
                title: name.to_string(),
                address: address.to_string(),
                point: GeoPoint::new(*lng, *lat),
                uid: None,
                city: None,
                province: None,
            })
            .collect();
        provider
    }

    pub fn with_named_lookup(entries: &[(&str, (&str, f64, f64))]) -> Self {
        let mut provider = Self::with_communities(
            &entries
                .iter()
                .map(|(name, (address, lng, lat))| (*name, *address, *lng, *lat))
                .collect::<Vec<_>>(),
        );
        provider.named_lookup = true;
        provider
    }

    pub fn failing(status: i64) -> Self {
        let mut provider = Self::empty();
        provider.fail_status = Some(status);
        provider
    }

    /// Attach uid/city/province to the first scripted POI.
    pub fn set_poi_metadata(&mut self, uid: &str, city: &str, province: &str) {
        if let Some(poi) = self.pois.first_mut() {
            poi.uid = Some(uid.to_string());
            poi.city = Some(city.to_string());
            poi.province = Some(province.to_string());
        }
    }

    pub fn search_call_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, query: &str, page_size: u32) -> Result<Vec<RawPoi>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        if self.yield_before_respond {
            tokio::task::yield_now().await;
        }

        if self.fail_next.load(Ordering::SeqCst) > 0 {
            self.fail_next.fetch_sub(1, Ordering::SeqCst);
            return Err(ProviderError::Status { code: 500 });
        }

        if let Some(code) = self.fail_status {
            return Err(ProviderError::Status { code });
        }

        let mut results: Vec<RawPoi> = if self.named_lookup {
            self.pois
                .iter()
                .filter(|poi| poi.title == query)
                .cloned()
                .collect()
        } else {
            self.pois.clone()
        };
        results.truncate(page_size as usize);
        Ok(results)
    }
}

#[async_trait]
impl MapProvider for MockProvider {
    async fn search(
        &self,
        _city: &str,
        query: &str,
        page_size: u32,
    ) -> Result<Vec<RawPoi>, ProviderError> {
        self.respond(query, page_size).await
    }

    async fn search_nearby(
        &self,
        _center: GeoPoint,
        _radius: f64,
        query: &str,
        page_size: u32,
    ) -> Result<Vec<RawPoi>, ProviderError> {
        self.respond(query, page_size).await
    }

    async fn geocode(
        &self,
        _address: &str,
        _city: &str,
    ) -> Result<Option<GeoPoint>, ProviderError> {
        Ok(self.geocode_point)
    }

    async fn reverse_geocode(
        &self,
        _point: GeoPoint,
    ) -> Result<Option<RawAddress>, ProviderError> {
        Ok(self.reverse_address.clone())
    }

    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        Haversine.distance(Point::new(a.lng, a.lat), Point::new(b.lng, b.lat))
    }
}
