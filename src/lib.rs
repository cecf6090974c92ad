//! Willow - community search and geo resolution client
//!
//! An async facade over an external map provider: city-scoped and
//! nearby community search, forward/reverse geocoding, bounding-box
//! coverage, exponential retry and a TTL response cache.

pub mod cache;
pub mod client;
pub mod clock;
pub mod config;
pub mod coverage;
pub mod error;
pub mod models;
pub mod provider;
pub mod retry;

#[cfg(test)]
pub(crate) mod test_util;

pub use cache::SearchCache;
pub use client::GeoClient;
pub use coverage::compute_coverage;
pub use error::{GeoError, ProviderError};
pub use models::{
    BoundingBox, CommunityDetail, GeoPoint, GeocodeResult, NearbySearchOptions, Poi,
    ReverseGeocodeResult, SearchOptions,
};
pub use provider::{BaiduWebProvider, MapProvider};
pub use retry::search_with_retry;
