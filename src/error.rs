//! Typed failures for client operations and the provider seam.

use thiserror::Error;

/// Failure reported by the underlying map provider.
///
/// Kept free of any HTTP-crate types so that provider implementations
/// and test doubles share one error surface.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider completed with a non-success status code.
    #[error("provider returned status {code}")]
    Status { code: i64 },

    /// The request never reached a usable completion (network, decode).
    #[error("provider transport error: {0}")]
    Transport(String),
}

/// Errors surfaced by [`crate::client::GeoClient`] operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The map provider capability is absent; no call was attempted.
    #[error("map provider is not available")]
    ProviderUnavailable,

    /// A community search completed with a provider failure.
    #[error("search failed")]
    SearchFailed(#[source] ProviderError),

    /// The address could not be resolved to a coordinate.
    #[error("address could not be resolved to a location")]
    GeocodeFailed(#[source] Option<ProviderError>),

    /// The coordinate could not be resolved to an address.
    #[error("location could not be resolved to an address")]
    ReverseGeocodeFailed(#[source] Option<ProviderError>),

    /// Exactly one result was expected and the provider returned none.
    #[error("no result found for '{name}'")]
    NotFound { name: String },

    /// All retry attempts failed; wraps the final underlying error.
    #[error("search failed after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<GeoError>,
    },

    /// Coverage was requested over an empty POI set.
    #[error("cannot compute coverage of an empty POI set")]
    EmptyInput,
}
