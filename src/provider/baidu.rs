//! Baidu Web Service API provider.
//!
//! Talks to the hosted REST endpoints: place search v2 (keyword and
//! circular nearby search), geocoding v3 and reverse geocoding v3.
//! All endpoints report a numeric `status` where 0 is success.

use async_trait::async_trait;
use geo::{Distance, Haversine, Point};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{MapProvider, RawAddress, RawPoi};
use crate::config::Config;
use crate::error::ProviderError;
use crate::models::GeoPoint;

const STATUS_OK: i64 = 0;

/// Provider backed by the Baidu Web Service REST API.
pub struct BaiduWebProvider {
    client: Client,
    base_url: Url,
    ak: String,
}

#[derive(Debug, Deserialize)]
struct PlaceSearchResponse {
    status: i64,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: String,
    location: Option<Location>,
    uid: Option<String>,
    city: Option<String>,
    province: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Location {
    lng: f64,
    lat: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: i64,
    result: Option<GeocodePayload>,
}

#[derive(Debug, Deserialize)]
struct GeocodePayload {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    status: i64,
    result: Option<ReverseGeocodePayload>,
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodePayload {
    #[serde(default)]
    formatted_address: String,
    #[serde(rename = "addressComponent")]
    address_component: Option<AddressComponent>,
}

#[derive(Debug, Default, Deserialize)]
struct AddressComponent {
    #[serde(default)]
    province: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    district: String,
    #[serde(default)]
    street: String,
    #[serde(default)]
    street_number: String,
}

impl BaiduWebProvider {
    /// Build a provider from configuration.
    ///
    /// Returns `None` when no API key is configured anywhere, i.e. the
    /// capability is absent from this environment.
    pub fn from_config(config: &Config) -> Option<Self> {
        let ak = config.api_key()?;
        let base_url = Url::parse(&config.provider.base_url).ok()?;

        let client = Client::builder()
            .user_agent("willow/0.1 (community search client)")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Some(Self {
            client,
            base_url,
            ak,
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        debug!("Provider request: {} {:?}", path, params);

        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("output", "json"), ("ak", self.ak.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))
    }
}

fn into_raw_pois(results: Vec<PlaceResult>) -> Vec<RawPoi> {
    results
        .into_iter()
        .filter_map(|r| {
            let location = r.location?;
            Some(RawPoi {
                title: r.name,
                address: r.address,
                point: GeoPoint::new(location.lng, location.lat),
                uid: r.uid,
                city: r.city,
                province: r.province,
            })
        })
        .collect()
}

#[async_trait]
impl MapProvider for BaiduWebProvider {
    async fn search(
        &self,
        city: &str,
        query: &str,
        page_size: u32,
    ) -> Result<Vec<RawPoi>, ProviderError> {
        let response: PlaceSearchResponse = self
            .get_json(
                "/place/v2/search",
                &[
                    ("query", query.to_string()),
                    ("region", city.to_string()),
                    ("city_limit", "true".to_string()),
                    ("page_size", page_size.to_string()),
                ],
            )
            .await?;

        if response.status != STATUS_OK {
            return Err(ProviderError::Status {
                code: response.status,
            });
        }

        Ok(into_raw_pois(response.results))
    }

    async fn search_nearby(
        &self,
        center: GeoPoint,
        radius: f64,
        query: &str,
        page_size: u32,
    ) -> Result<Vec<RawPoi>, ProviderError> {
        let response: PlaceSearchResponse = self
            .get_json(
                "/place/v2/search",
                &[
                    ("query", query.to_string()),
                    // Baidu expects "lat,lng" here
                    ("location", format!("{},{}", center.lat, center.lng)),
                    ("radius", format!("{}", radius as u64)),
                    ("page_size", page_size.to_string()),
                ],
            )
            .await?;

        if response.status != STATUS_OK {
            return Err(ProviderError::Status {
                code: response.status,
            });
        }

        Ok(into_raw_pois(response.results))
    }

    async fn geocode(
        &self,
        address: &str,
        city: &str,
    ) -> Result<Option<GeoPoint>, ProviderError> {
        let response: GeocodeResponse = self
            .get_json(
                "/geocoding/v3/",
                &[
                    ("address", address.to_string()),
                    ("city", city.to_string()),
                ],
            )
            .await?;

        if response.status != STATUS_OK {
            return Err(ProviderError::Status {
                code: response.status,
            });
        }

        Ok(response
            .result
            .map(|r| GeoPoint::new(r.location.lng, r.location.lat)))
    }

    async fn reverse_geocode(
        &self,
        point: GeoPoint,
    ) -> Result<Option<RawAddress>, ProviderError> {
        let response: ReverseGeocodeResponse = self
            .get_json(
                "/reverse_geocoding/v3/",
                &[("location", format!("{},{}", point.lat, point.lng))],
            )
            .await?;

        if response.status != STATUS_OK {
            return Err(ProviderError::Status {
                code: response.status,
            });
        }

        Ok(response.result.map(|r| {
            let components = r.address_component.unwrap_or_default();
            RawAddress {
                formatted: r.formatted_address,
                province: components.province,
                city: components.city,
                district: components.district,
                street: components.street,
                street_number: components.street_number,
            }
        }))
    }

    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        Haversine.distance(Point::new(a.lng, a.lat), Point::new(b.lng, b.lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place_search_response() {
        let json = r#"{
            "status": 0,
            "message": "ok",
            "results": [
                {
                    "name": "阳光小区",
                    "address": "金台路1号",
                    "location": { "lat": 39.27, "lng": 115.81 },
                    "uid": "abc123",
                    "province": "河北省",
                    "city": "保定市"
                },
                {
                    "name": "无坐标小区",
                    "address": "未知"
                }
            ]
        }"#;

        let response: PlaceSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, 0);

        // Results without a coordinate are dropped
        let pois = into_raw_pois(response.results);
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].title, "阳光小区");
        assert_eq!(pois[0].uid.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_parse_reverse_geocode_response() {
        let json = r#"{
            "status": 0,
            "result": {
                "formatted_address": "河北省保定市定兴县金台路",
                "addressComponent": {
                    "province": "河北省",
                    "city": "保定市",
                    "district": "定兴县",
                    "street": "金台路",
                    "street_number": "88号"
                }
            }
        }"#;

        let response: ReverseGeocodeResponse = serde_json::from_str(json).unwrap();
        let payload = response.result.unwrap();
        let components = payload.address_component.unwrap();
        assert_eq!(components.district, "定兴县");
        assert_eq!(components.street_number, "88号");
    }
}
