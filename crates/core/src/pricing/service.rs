//! Pricing resolution chain.
//!
//! Resolution order, first success wins:
//!
//! 1. Remote authoritative lookup - the service's unit/total prices are
//!    returned directly; local tiers are not consulted even when present.
//! 2. Local tiered fallback - the tier covering the quantity, else the
//!    variant's first tier as the designated default.
//!
//! Exhausting the chain reports `PriceUnavailable` and issues no quote;
//! callers leave previously displayed pricing untouched rather than
//! showing zero.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use storefront_catalog::{CatalogProvider, PriceQuote, ProductId, Variant};

use crate::constants::{MAX_QUANTITY, MIN_QUANTITY};
use crate::errors::{Error, Result};

/// Source tag carried on locally computed quotes.
pub const LOCAL_TIERS_SOURCE: &str = "LOCAL_TIERS";

/// One strategy for pricing a variant at a quantity.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Identifier used in logs and as the quote's `source` tag.
    fn id(&self) -> &'static str;

    async fn quote(&self, variant: &Variant, quantity: u32) -> Result<PriceQuote>;
}

/// Authoritative pricing from the remote service.
pub struct RemotePriceSource {
    provider: Arc<dyn CatalogProvider>,
    product_id: ProductId,
}

impl RemotePriceSource {
    pub fn new(provider: Arc<dyn CatalogProvider>, product_id: ProductId) -> Self {
        Self {
            provider,
            product_id,
        }
    }
}

#[async_trait]
impl PriceSource for RemotePriceSource {
    fn id(&self) -> &'static str {
        "REMOTE"
    }

    async fn quote(&self, variant: &Variant, quantity: u32) -> Result<PriceQuote> {
        let quote = self
            .provider
            .price_for(&self.product_id, &variant.id, quantity)
            .await?;
        Ok(quote)
    }
}

/// Locally cached tiered pricing.
#[derive(Default)]
pub struct TierPriceSource;

impl TierPriceSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PriceSource for TierPriceSource {
    fn id(&self) -> &'static str {
        LOCAL_TIERS_SOURCE
    }

    async fn quote(&self, variant: &Variant, quantity: u32) -> Result<PriceQuote> {
        let tier = variant
            .tier_for_quantity(quantity)
            .or_else(|| variant.fallback_tier())
            .ok_or_else(|| Error::NoPriceTiers {
                variant_id: variant.id.clone(),
            })?;

        Ok(PriceQuote::from_unit_price(
            tier.unit_price,
            quantity,
            LOCAL_TIERS_SOURCE,
        ))
    }
}

/// Ordered pricing resolution over a set of sources.
///
/// Never mutates selection state; its only side effect is the remote
/// source's network call.
pub struct PricingService {
    sources: Vec<Arc<dyn PriceSource>>,
}

impl PricingService {
    pub fn new(sources: Vec<Arc<dyn PriceSource>>) -> Self {
        Self { sources }
    }

    /// Standard chain: authoritative remote pricing with local tier
    /// fallback.
    pub fn remote_first(provider: Arc<dyn CatalogProvider>, product_id: ProductId) -> Self {
        Self::new(vec![
            Arc::new(RemotePriceSource::new(provider, product_id)),
            Arc::new(TierPriceSource::new()),
        ])
    }

    /// Resolve unit and total price for `variant` at `quantity`.
    ///
    /// Quantity is expected to be pre-clamped by the caller; a value
    /// outside the orderable domain is treated as 1 rather than propagated
    /// as an error.
    pub async fn resolve_price(&self, variant: &Variant, quantity: u32) -> Result<PriceQuote> {
        let quantity = if (MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
            quantity
        } else {
            warn!(
                "Quantity {} outside [{}, {}], pricing as 1",
                quantity, MIN_QUANTITY, MAX_QUANTITY
            );
            MIN_QUANTITY
        };

        for source in &self.sources {
            match source.quote(variant, quantity).await {
                Ok(quote) => {
                    debug!(
                        "Variant {} quantity {} priced by source '{}': unit {} total {}",
                        variant.id,
                        quantity,
                        source.id(),
                        quote.unit_price,
                        quote.total_price
                    );
                    return Ok(quote);
                }
                Err(e) => {
                    warn!(
                        "Price source '{}' failed for variant {} quantity {}: {}, trying next",
                        source.id(),
                        variant.id,
                        quantity,
                        e
                    );
                }
            }
        }

        Err(Error::PriceUnavailable {
            variant_id: variant.id.clone(),
        })
    }
}
