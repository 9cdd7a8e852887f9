//! Core error types for the storefront engine.
//!
//! Remote failures are swallowed at the resolution-chain boundary and
//! converted into fallback behavior or the non-fatal kinds below. Only
//! catalog load failure is surfaced to the caller as a blocking error.

use thiserror::Error;

use storefront_catalog::{CatalogError, VariantId};

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the resolution engine.
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog payload was unusable. Fatal to the product load.
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),

    /// A catalog operation failed below the fallback boundary.
    #[error("Catalog operation failed: {0}")]
    Catalog(#[from] CatalogError),

    /// No variant for the current attribute pair from either source.
    /// Non-fatal; the previous selection is retained.
    #[error("No variant available for color {color:?}, size {size:?}")]
    VariantUnavailable {
        color: Option<String>,
        size: Option<String>,
    },

    /// No pricing obtainable from any source. Non-fatal; callers keep the
    /// previously displayed quote.
    #[error("No price available for variant {variant_id}")]
    PriceUnavailable { variant_id: VariantId },

    /// The variant carries no local tiers to price from.
    /// Internal to the pricing chain; exhaustion of the chain surfaces as
    /// `PriceUnavailable`.
    #[error("Variant {variant_id} has no price tiers")]
    NoPriceTiers { variant_id: VariantId },
}

impl Error {
    /// Returns true if the error is non-fatal: the engine keeps its prior
    /// state and the UI keeps whatever it was displaying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::VariantUnavailable { .. }
                | Error::PriceUnavailable { .. }
                | Error::NoPriceTiers { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_errors_are_recoverable() {
        let error = Error::VariantUnavailable {
            color: Some("Blue".to_string()),
            size: None,
        };
        assert!(error.is_recoverable());

        let error = Error::PriceUnavailable {
            variant_id: VariantId::new("V-1"),
        };
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_load_failure_is_not_recoverable() {
        let error = Error::MalformedCatalog("payload is not an object".to_string());
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let error = Error::VariantUnavailable {
            color: Some("Blue".to_string()),
            size: Some("S".to_string()),
        };
        assert_eq!(
            format!("{}", error),
            "No variant available for color Some(\"Blue\"), size Some(\"S\")"
        );
    }
}
