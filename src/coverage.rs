//! Bounding-box coverage of a POI set.

use crate::error::GeoError;
use crate::models::{BoundingBox, Poi};

/// Compute the axis-aligned extent of a non-empty POI set.
///
/// Pure; fails with [`GeoError::EmptyInput`] on an empty slice rather
/// than producing a degenerate box.
pub fn compute_coverage(pois: &[Poi]) -> Result<BoundingBox, GeoError> {
    let first = pois.first().ok_or(GeoError::EmptyInput)?;

    let mut bbox = BoundingBox {
        min_lng: first.lng,
        max_lng: first.lng,
        min_lat: first.lat,
        max_lat: first.lat,
        center_lng: first.lng,
        center_lat: first.lat,
    };

    for poi in &pois[1..] {
        bbox.min_lng = bbox.min_lng.min(poi.lng);
        bbox.max_lng = bbox.max_lng.max(poi.lng);
        bbox.min_lat = bbox.min_lat.min(poi.lat);
        bbox.max_lat = bbox.max_lat.max(poi.lat);
    }

    bbox.center_lng = (bbox.min_lng + bbox.max_lng) / 2.0;
    bbox.center_lat = (bbox.min_lat + bbox.max_lat) / 2.0;

    Ok(bbox)
}
