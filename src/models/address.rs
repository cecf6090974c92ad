//! Geocoding result types.

use serde::{Deserialize, Serialize};

/// Forward geocoding result: the coordinate an address resolved to.
///
/// `address` echoes the input address, matching what callers display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub lng: f64,
    pub lat: f64,
    pub address: String,
}

/// Reverse geocoding result: the structured address at a coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseGeocodeResult {
    /// Full formatted address.
    pub address: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub street: String,
    pub street_number: String,
}
