//! Search request options.

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_CITY, DEFAULT_NEARBY_RADIUS_M, DEFAULT_PAGE_SIZE, DEFAULT_QUERY, REGION_CENTER,
};

/// Options for a city-scoped community search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Region the search is scoped to, e.g. "定兴县".
    pub city: String,

    /// Keyword, e.g. "小区".
    pub query: String,

    /// Maximum number of results the provider returns per page.
    pub page_size: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            query: DEFAULT_QUERY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Options for a nearby search around a center coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySearchOptions {
    pub lng: f64,

    pub lat: f64,

    /// Search radius in meters. Also the upper bound on any returned
    /// result's distance from the center.
    pub radius: f64,

    pub page_size: u32,
}

impl Default for NearbySearchOptions {
    fn default() -> Self {
        Self {
            lng: REGION_CENTER.0,
            lat: REGION_CENTER.1,
            radius: DEFAULT_NEARBY_RADIUS_M,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
