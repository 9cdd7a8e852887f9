//! Catalog provider trait definition.

use async_trait::async_trait;

use crate::errors::CatalogError;
use crate::models::{PriceQuote, Product, ProductId, Variant, VariantId};

/// Trait for remote catalog/pricing sources.
///
/// Implement this trait to back the engine with a different catalog
/// service. All methods return canonical models; payload normalization is
/// the implementation's responsibility.
///
/// The engine treats every failure from this trait as recoverable: a
/// failed lookup triggers local fallback, never a user-visible error on
/// its own.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Used for logging and as the `source` tag on returned quotes.
    fn id(&self) -> &'static str;

    /// Fetch and normalize the full product payload.
    ///
    /// This is the one call whose failure is fatal to a product load;
    /// there is no local source to fall back to before a product exists.
    async fn fetch_product(&self, product: &ProductId) -> Result<Product, CatalogError>;

    /// Look up the authoritative variant for an attribute pair.
    ///
    /// # Returns
    ///
    /// The matching variant, or `CatalogError::NotFound` when the service
    /// knows no variant for the pair.
    async fn variant_by_attributes(
        &self,
        product: &ProductId,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Result<Variant, CatalogError>;

    /// Compute the authoritative price for a variant at a quantity.
    ///
    /// A successful response carries the service's own unit and total
    /// prices; callers must not recompute them from local tiers.
    async fn price_for(
        &self,
        product: &ProductId,
        variant: &VariantId,
        quantity: u32,
    ) -> Result<PriceQuote, CatalogError>;
}
