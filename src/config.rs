//! Crate configuration loaded from TOML, with compiled-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default search region.
pub const DEFAULT_CITY: &str = "定兴县";

/// Default search keyword (residential community).
pub const DEFAULT_QUERY: &str = "小区";

/// Default provider page size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default nearby-search radius in meters.
pub const DEFAULT_NEARBY_RADIUS_M: f64 = 5000.0;

/// Center of the default region (lng, lat).
pub const REGION_CENTER: (f64, f64) = (115.808, 39.267);

/// Default cached-search TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Environment variable holding the Baidu Web Service API key.
pub const API_KEY_ENV: &str = "BAIDU_MAP_AK";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub provider: ProviderConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub default_city: String,
    pub default_query: String,
    pub page_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    /// API key; the `BAIDU_MAP_AK` environment variable takes precedence.
    pub ak: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            provider: ProviderConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            default_query: DEFAULT_QUERY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.map.baidu.com".to_string(),
            ak: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// API key after applying the environment override.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV).ok().or_else(|| self.provider.ak.clone())
    }
}
