//! POI and derived geometry types.

use serde::{Deserialize, Serialize};

/// Geographic point (lng/lat, degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// A residential community returned by a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    /// Per-response ordinal identifier ("community_1", "community_2", …).
    /// Unique only within a single search response.
    pub id: String,

    pub name: String,

    pub address: String,

    pub lng: f64,

    pub lat: f64,

    /// Surface distance from the search center in whole meters.
    /// Present only for nearby-search results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Placeholder camera count. There is no provider data source for
    /// this; it is synthesized locally until a backend lookup exists.
    pub camera_count: u32,
}

/// Full details for a single community resolved by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityDetail {
    pub id: String,
    pub name: String,
    pub address: String,
    pub lng: f64,
    pub lat: f64,
    pub city: String,
    pub province: String,
}

/// Axis-aligned extent of a set of POIs, with its midpoint.
///
/// Derived per request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub max_lng: f64,
    pub min_lat: f64,
    pub max_lat: f64,
    pub center_lng: f64,
    pub center_lat: f64,
}
