//! Query CLI for community search and geocoding.
//!
//! Drives the Baidu Web Service provider; expects the API key in the
//! config file or the `BAIDU_MAP_AK` environment variable.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use willow::config::Config;
use willow::provider::{BaiduWebProvider, MapProvider};
use willow::retry::search_with_retry;
use willow::{compute_coverage, GeoClient, NearbySearchOptions, SearchOptions};

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Community search and geocoding queries")]
struct Args {
    /// Path to a TOML config file; compiled-in defaults otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search communities within a city
    Search {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        page_size: Option<u32>,
        /// Retry attempts with exponential backoff
        #[arg(long, default_value_t = 1)]
        retries: u32,
    },
    /// Search communities around a coordinate
    Nearby {
        #[arg(long)]
        lng: f64,
        #[arg(long)]
        lat: f64,
        /// Radius in meters
        #[arg(long, default_value_t = 5000.0)]
        radius: f64,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Full details for one community by name
    Detail {
        name: String,
        #[arg(long)]
        city: Option<String>,
    },
    /// Resolve an address to a coordinate
    Geocode {
        address: String,
        #[arg(long)]
        city: Option<String>,
    },
    /// Resolve a coordinate to a structured address
    Reverse {
        #[arg(long)]
        lng: f64,
        #[arg(long)]
        lat: f64,
    },
    /// Bounding box covered by a community search
    Coverage {
        #[arg(long)]
        city: Option<String>,
        #[arg(long, default_value_t = 50)]
        page_size: u32,
    },
}

fn search_options(
    config: &Config,
    city: Option<String>,
    query: Option<String>,
    page_size: Option<u32>,
) -> SearchOptions {
    SearchOptions {
        city: city.unwrap_or_else(|| config.search.default_city.clone()),
        query: query.unwrap_or_else(|| config.search.default_query.clone()),
        page_size: page_size.unwrap_or(config.search.page_size),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    let provider = BaiduWebProvider::from_config(&config)
        .map(|p| Arc::new(p) as Arc<dyn MapProvider>);
    if provider.is_none() {
        info!("No map provider API key configured; operations will fail");
    }
    let client = GeoClient::new(provider);

    match args.command {
        Command::Search {
            city,
            query,
            page_size,
            retries,
        } => {
            let options = search_options(&config, city, query, page_size);
            let pois = if retries > 1 {
                search_with_retry(&client, &options, retries).await?
            } else {
                client.search_communities(&options).await?
            };
            info!("Found {} communities", pois.len());
            println!("{}", serde_json::to_string_pretty(&pois)?);
        }
        Command::Nearby {
            lng,
            lat,
            radius,
            page_size,
        } => {
            let options = NearbySearchOptions {
                lng,
                lat,
                radius,
                page_size: page_size.unwrap_or(config.search.page_size),
            };
            let pois = client.search_nearby_communities(&options).await?;
            info!("Found {} communities within {}m", pois.len(), radius);
            println!("{}", serde_json::to_string_pretty(&pois)?);
        }
        Command::Detail { name, city } => {
            let city = city.unwrap_or_else(|| config.search.default_city.clone());
            let detail = client.get_community_detail(&name, &city).await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Command::Geocode { address, city } => {
            let city = city.unwrap_or_else(|| config.search.default_city.clone());
            let location = client.get_location_by_address(&address, &city).await?;
            println!("{}", serde_json::to_string_pretty(&location)?);
        }
        Command::Reverse { lng, lat } => {
            let address = client.get_address_by_location(lng, lat).await?;
            println!("{}", serde_json::to_string_pretty(&address)?);
        }
        Command::Coverage { city, page_size } => {
            let options = search_options(&config, city, None, Some(page_size));
            let pois = client.search_communities(&options).await?;
            let bbox = compute_coverage(&pois)?;
            info!("Coverage over {} communities", pois.len());
            println!("{}", serde_json::to_string_pretty(&bbox)?);
        }
    }

    Ok(())
}
