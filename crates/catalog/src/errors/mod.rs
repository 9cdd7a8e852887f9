//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while fetching or normalizing catalog data.
///
/// Transient variants (see [`is_transient`](Self::is_transient)) trigger
/// local fallback in the engine instead of surfacing to the user.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The payload was not a well-formed catalog object.
    /// Fatal when it happens at product load; at lookup time the engine
    /// falls back to local data.
    #[error("Malformed catalog payload: {0}")]
    MalformedPayload(String),

    /// The service does not know the requested product or variant.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The service answered with a non-success status or an otherwise
    /// unusable response.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while talking to the service.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl CatalogError {
    /// Returns true if the failure is a service-side or transport problem
    /// that local fallback can recover from.
    ///
    /// `MalformedPayload` from a *local* normalization (product load) is the
    /// one case the engine treats as fatal; everything coming back from the
    /// wire is recoverable by falling back.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::ProviderError { .. } | Self::Network(_)
        )
    }
}
