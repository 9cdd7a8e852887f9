//! Variant lookup chain.
//!
//! Obtaining the authoritative variant for an attribute pair follows the
//! same remote-first/local-fallback pattern as pricing: an explicit ordered
//! list of sources, tried in order, first success short-circuiting. No
//! nested error handling; each source reports success or failure and the
//! chain decides what happens next.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use storefront_catalog::{CatalogProvider, Product, ProductId, Variant};

use crate::errors::{Error, Result};
use crate::selection::resolver;

/// One strategy for finding the variant matching an attribute pair.
#[async_trait]
pub trait VariantSource: Send + Sync {
    /// Identifier used in logs.
    fn id(&self) -> &'static str;

    async fn find(&self, color: Option<&str>, size: Option<&str>) -> Result<Variant>;
}

/// Authoritative lookup against the remote catalog service.
pub struct RemoteVariantSource {
    provider: Arc<dyn CatalogProvider>,
    product_id: ProductId,
}

impl RemoteVariantSource {
    pub fn new(provider: Arc<dyn CatalogProvider>, product_id: ProductId) -> Self {
        Self {
            provider,
            product_id,
        }
    }
}

#[async_trait]
impl VariantSource for RemoteVariantSource {
    fn id(&self) -> &'static str {
        "REMOTE"
    }

    async fn find(&self, color: Option<&str>, size: Option<&str>) -> Result<Variant> {
        let variant = self
            .provider
            .variant_by_attributes(&self.product_id, color, size)
            .await?;
        Ok(variant)
    }
}

/// Exact-match search over the locally cached canonical variants.
pub struct LocalVariantSource {
    product: Arc<Product>,
}

impl LocalVariantSource {
    pub fn new(product: Arc<Product>) -> Self {
        Self { product }
    }
}

#[async_trait]
impl VariantSource for LocalVariantSource {
    fn id(&self) -> &'static str {
        "LOCAL"
    }

    async fn find(&self, color: Option<&str>, size: Option<&str>) -> Result<Variant> {
        resolver::resolve_by_attributes(&self.product, color, size)
            .cloned()
            .ok_or_else(|| Error::VariantUnavailable {
                color: color.map(String::from),
                size: size.map(String::from),
            })
    }
}

/// Ordered variant lookup: remote first, then local.
pub struct VariantLookupChain {
    sources: Vec<Arc<dyn VariantSource>>,
}

impl VariantLookupChain {
    pub fn new(sources: Vec<Arc<dyn VariantSource>>) -> Self {
        Self { sources }
    }

    /// Standard chain: authoritative remote lookup with local fallback.
    pub fn remote_first(
        provider: Arc<dyn CatalogProvider>,
        product: Arc<Product>,
    ) -> Self {
        let product_id = product.id.clone();
        Self::new(vec![
            Arc::new(RemoteVariantSource::new(provider, product_id)),
            Arc::new(LocalVariantSource::new(product)),
        ])
    }

    /// Try each source in order; the first success wins.
    ///
    /// Exhausting every source reports `VariantUnavailable`; the caller
    /// retains its previously selected variant unchanged.
    pub async fn find(&self, color: Option<&str>, size: Option<&str>) -> Result<Variant> {
        for source in &self.sources {
            match source.find(color, size).await {
                Ok(variant) => {
                    debug!(
                        "Variant ({:?}, {:?}) resolved by source '{}'",
                        color,
                        size,
                        source.id()
                    );
                    return Ok(variant);
                }
                Err(e) => {
                    warn!(
                        "Variant source '{}' failed for ({:?}, {:?}): {}, trying next",
                        source.id(),
                        color,
                        size,
                        e
                    );
                }
            }
        }

        Err(Error::VariantUnavailable {
            color: color.map(String::from),
            size: size.map(String::from),
        })
    }
}
