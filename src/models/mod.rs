//! Request and result types for community search and geocoding.

mod address;
mod options;
mod poi;

pub use address::{GeocodeResult, ReverseGeocodeResult};
pub use options::{NearbySearchOptions, SearchOptions};
pub use poi::{BoundingBox, CommunityDetail, GeoPoint, Poi};
