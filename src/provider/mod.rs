//! Map provider capability.
//!
//! Everything the client needs from the external mapping service, as a
//! dyn-safe async trait so the HTTP-backed provider and test doubles
//! interchange. The raw types carry exactly what the provider exposes;
//! the client shapes them into the crate's result types.

mod baidu;

pub use baidu::BaiduWebProvider;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::GeoPoint;

/// A point of interest as delivered by the provider.
#[derive(Debug, Clone)]
pub struct RawPoi {
    pub title: String,
    pub address: String,
    pub point: GeoPoint,
    /// Provider-assigned unique identifier, when it supplies one.
    pub uid: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
}

/// A structured address as delivered by reverse geocoding.
#[derive(Debug, Clone, Default)]
pub struct RawAddress {
    pub formatted: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub street: String,
    pub street_number: String,
}

/// The external map provider capability.
///
/// Each call is a single request/response cycle; completion (or
/// failure) is delivered by resolving the returned future. Geocoding
/// operations distinguish "completed but nothing resolvable" (`Ok(None)`)
/// from provider failure (`Err`).
#[async_trait]
pub trait MapProvider: Send + Sync {
    /// Keyword search scoped to a city/region.
    ///
    /// The provider enforces `page_size`; callers do not re-truncate.
    async fn search(
        &self,
        city: &str,
        query: &str,
        page_size: u32,
    ) -> Result<Vec<RawPoi>, ProviderError>;

    /// Keyword search scoped by a center coordinate and radius in meters.
    async fn search_nearby(
        &self,
        center: GeoPoint,
        radius: f64,
        query: &str,
        page_size: u32,
    ) -> Result<Vec<RawPoi>, ProviderError>;

    /// Resolve an address to a coordinate within a city.
    async fn geocode(&self, address: &str, city: &str)
        -> Result<Option<GeoPoint>, ProviderError>;

    /// Resolve a coordinate to a structured address.
    async fn reverse_geocode(&self, point: GeoPoint)
        -> Result<Option<RawAddress>, ProviderError>;

    /// Surface distance between two coordinates, in meters.
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64;
}
