//! Geo resolution client.
//!
//! Async facade over the map provider: community search, nearby search
//! with a defensive client-side distance filter, single-community
//! detail lookup, forward/reverse geocoding, and batch fan-out helpers.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use xxhash_rust::xxh64::xxh64;

use crate::config::{DEFAULT_PAGE_SIZE, DEFAULT_QUERY};
use crate::error::GeoError;
use crate::models::{
    CommunityDetail, GeoPoint, GeocodeResult, NearbySearchOptions, Poi, ReverseGeocodeResult,
    SearchOptions,
};
use crate::provider::MapProvider;

/// Client over an optional map provider capability.
///
/// Constructed with `None` when the provider is absent from the
/// environment; every operation then fails with
/// [`GeoError::ProviderUnavailable`] without attempting a call.
#[derive(Clone)]
pub struct GeoClient {
    provider: Option<Arc<dyn MapProvider>>,
}

/// Placeholder camera count for a community.
///
/// The provider has no such attribute; until a backend lookup exists
/// this is synthesized from the community name, in the range 5..15.
fn synthesize_camera_count(name: &str) -> u32 {
    (xxh64(name.as_bytes(), 0) % 10) as u32 + 5
}

impl GeoClient {
    pub fn new(provider: Option<Arc<dyn MapProvider>>) -> Self {
        Self { provider }
    }

    fn provider(&self) -> Result<&Arc<dyn MapProvider>, GeoError> {
        self.provider.as_ref().ok_or(GeoError::ProviderUnavailable)
    }

    /// Search for communities within a city.
    ///
    /// Result ids are per-response ordinals; the provider bounds the
    /// result count by `page_size` and no re-truncation happens here.
    pub async fn search_communities(
        &self,
        options: &SearchOptions,
    ) -> Result<Vec<Poi>, GeoError> {
        let provider = self.provider()?;

        let raw = provider
            .search(&options.city, &options.query, options.page_size)
            .await
            .map_err(GeoError::SearchFailed)?;

        debug!(
            "Search '{}' in '{}' returned {} results",
            options.query,
            options.city,
            raw.len()
        );

        Ok(raw
            .into_iter()
            .enumerate()
            .map(|(i, poi)| Poi {
                id: format!("community_{}", i + 1),
                camera_count: synthesize_camera_count(&poi.title),
                name: poi.title,
                address: poi.address,
                lng: poi.point.lng,
                lat: poi.point.lat,
                distance: None,
            })
            .collect())
    }

    /// Search for communities around a center coordinate.
    ///
    /// The provider is asked to scope by `radius` already, but each
    /// result is re-checked against the provider's distance primitive
    /// and dropped unless `distance <= radius`. Distances are reported
    /// in whole meters.
    pub async fn search_nearby_communities(
        &self,
        options: &NearbySearchOptions,
    ) -> Result<Vec<Poi>, GeoError> {
        let provider = self.provider()?;
        let center = GeoPoint::new(options.lng, options.lat);

        let raw = provider
            .search_nearby(center, options.radius, DEFAULT_QUERY, options.page_size)
            .await
            .map_err(GeoError::SearchFailed)?;

        let communities: Vec<Poi> = raw
            .into_iter()
            .enumerate()
            .filter_map(|(i, poi)| {
                let distance = provider.distance(center, poi.point);
                if distance > options.radius {
                    return None;
                }
                Some(Poi {
                    id: format!("community_{}", i + 1),
                    camera_count: synthesize_camera_count(&poi.title),
                    name: poi.title,
                    address: poi.address,
                    lng: poi.point.lng,
                    lat: poi.point.lat,
                    distance: Some(distance.round()),
                })
            })
            .collect();

        debug!(
            "Nearby search at ({}, {}) r={}m kept {} results",
            options.lng,
            options.lat,
            options.radius,
            communities.len()
        );

        Ok(communities)
    }

    /// Resolve a single community to its full details by name.
    ///
    /// Takes the first search result; fails with [`GeoError::NotFound`]
    /// when the provider returns none.
    pub async fn get_community_detail(
        &self,
        name: &str,
        city: &str,
    ) -> Result<CommunityDetail, GeoError> {
        let provider = self.provider()?;

        let raw = provider
            .search(city, name, DEFAULT_PAGE_SIZE)
            .await
            .map_err(GeoError::SearchFailed)?;

        let poi = raw.into_iter().next().ok_or_else(|| GeoError::NotFound {
            name: name.to_string(),
        })?;

        Ok(CommunityDetail {
            id: poi
                .uid
                .unwrap_or_else(|| format!("community_{}", Utc::now().timestamp_millis())),
            name: poi.title,
            address: poi.address,
            lng: poi.point.lng,
            lat: poi.point.lat,
            city: poi.city.unwrap_or_default(),
            province: poi.province.unwrap_or_default(),
        })
    }

    /// Forward geocoding: resolve an address to a coordinate.
    pub async fn get_location_by_address(
        &self,
        address: &str,
        city: &str,
    ) -> Result<GeocodeResult, GeoError> {
        let provider = self.provider()?;

        let point = provider
            .geocode(address, city)
            .await
            .map_err(|e| GeoError::GeocodeFailed(Some(e)))?
            .ok_or(GeoError::GeocodeFailed(None))?;

        Ok(GeocodeResult {
            lng: point.lng,
            lat: point.lat,
            address: address.to_string(),
        })
    }

    /// Reverse geocoding: resolve a coordinate to a structured address.
    pub async fn get_address_by_location(
        &self,
        lng: f64,
        lat: f64,
    ) -> Result<ReverseGeocodeResult, GeoError> {
        let provider = self.provider()?;

        let raw = provider
            .reverse_geocode(GeoPoint::new(lng, lat))
            .await
            .map_err(|e| GeoError::ReverseGeocodeFailed(Some(e)))?
            .ok_or(GeoError::ReverseGeocodeFailed(None))?;

        Ok(ReverseGeocodeResult {
            address: raw.formatted,
            province: raw.province,
            city: raw.city,
            district: raw.district,
            street: raw.street,
            street_number: raw.street_number,
        })
    }

    /// Resolve several communities concurrently, one outcome per item.
    ///
    /// A failed item never blocks or fails the others; the result
    /// vector is in input order.
    pub async fn get_community_details(
        &self,
        names: &[String],
        city: &str,
    ) -> Vec<Result<CommunityDetail, GeoError>> {
        futures::future::join_all(
            names
                .iter()
                .map(|name| self.get_community_detail(name, city)),
        )
        .await
    }

    /// All-or-nothing variant of [`Self::get_community_details`]:
    /// fails with the first item error encountered.
    pub async fn try_get_community_details(
        &self,
        names: &[String],
        city: &str,
    ) -> Result<Vec<CommunityDetail>, GeoError> {
        futures::future::try_join_all(
            names
                .iter()
                .map(|name| self.get_community_detail(name, city)),
        )
        .await
    }
}
