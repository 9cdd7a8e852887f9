//! Session controller.
//!
//! Wires the pure selection operations to the asynchronous resolution
//! chains and enforces the "last selection wins" ordering guarantee:
//! selections may change faster than in-flight lookups complete, so every
//! resolution request carries the generation of the selection it was
//! issued for, and its result is applied only if that generation is still
//! current at completion time. Superseded results are discarded, never
//! applied over newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use tokio::sync::RwLock;

use storefront_catalog::{
    CatalogError, CatalogProvider, PriceQuote, Product, ProductId, Variant,
};

use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::pricing::PricingService;
use crate::selection::lookup::VariantLookupChain;
use crate::selection::model::{clamp_quantity, SelectionState};
use crate::selection::resolver;

/// The selection a resolution request was issued for.
struct RequestSnapshot {
    color: Option<String>,
    size: Option<String>,
    quantity: u32,
    generation: u64,
}

/// Controller for one product's selection session.
///
/// Owns the canonical product (immutable after load), the live selection
/// state, and the last applied price quote. All mutation goes through the
/// operations below; the rendering collaborator observes changes through
/// the event sink and the read accessors.
pub struct SessionController {
    product: Arc<Product>,
    state: RwLock<SelectionState>,
    last_quote: RwLock<Option<PriceQuote>>,
    variants: VariantLookupChain,
    pricing: PricingService,
    events: Arc<dyn DomainEventSink>,
    generation: AtomicU64,
}

impl SessionController {
    /// Start a session for an already-normalized product.
    pub fn new(
        product: Product,
        provider: Arc<dyn CatalogProvider>,
        events: Arc<dyn DomainEventSink>,
    ) -> Self {
        let product = Arc::new(product);
        let state = SelectionState::for_product(&product);

        events.emit(DomainEvent::product_loaded(product.id.clone()));

        Self {
            variants: VariantLookupChain::remote_first(provider.clone(), product.clone()),
            pricing: PricingService::remote_first(provider, product.id.clone()),
            state: RwLock::new(state),
            last_quote: RwLock::new(None),
            product,
            events,
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch, normalize, and start a session for `product_id`.
    ///
    /// This is the one operation whose catalog failure is fatal: without a
    /// product there is nothing to fall back to, and the error surfaces to
    /// the caller as a blocking load failure.
    pub async fn load(
        provider: Arc<dyn CatalogProvider>,
        product_id: ProductId,
        events: Arc<dyn DomainEventSink>,
    ) -> Result<Self> {
        let product = provider
            .fetch_product(&product_id)
            .await
            .map_err(|e| match e {
                CatalogError::MalformedPayload(message) => Error::MalformedCatalog(message),
                other => Error::Catalog(other),
            })?;

        Ok(Self::new(product, provider, events))
    }

    /// The canonical product backing this session.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Snapshot of the current selection.
    pub async fn selection(&self) -> SelectionState {
        self.state.read().await.clone()
    }

    /// The last applied price quote, if any.
    pub async fn last_quote(&self) -> Option<PriceQuote> {
        self.last_quote.read().await.clone()
    }

    /// Select a color, repairing the size axis if needed, then resolve the
    /// variant and price for the new selection.
    pub async fn select_color(&self, color: &str) -> Result<()> {
        let snapshot = {
            let mut state = self.state.write().await;
            resolver::on_color_changed(&self.product, &mut state, color);
            self.emit_selection(&state);
            self.begin_request(&state)
        };

        self.resolve_snapshot(snapshot).await
    }

    /// Select a size, repairing the color axis if needed, then resolve the
    /// variant and price for the new selection.
    pub async fn select_size(&self, size: &str) -> Result<()> {
        let snapshot = {
            let mut state = self.state.write().await;
            resolver::on_size_changed(&self.product, &mut state, size);
            self.emit_selection(&state);
            self.begin_request(&state)
        };

        self.resolve_snapshot(snapshot).await
    }

    /// Update the quantity, clamped to the orderable domain, and re-price
    /// the current variant.
    pub async fn set_quantity(&self, requested: i64) -> Result<()> {
        let (snapshot, variant) = {
            let mut state = self.state.write().await;
            state.quantity = clamp_quantity(requested);
            self.emit_selection(&state);
            (self.begin_request(&state), state.selected_variant.clone())
        };

        match variant {
            // The variant cannot change when only quantity moves; skip the
            // lookup chain and go straight to pricing.
            Some(variant) => self.price_and_apply(&variant, &snapshot).await,
            None => self.resolve_snapshot(snapshot).await,
        }
    }

    /// Run the resolution chain for the current selection.
    ///
    /// Called after load to obtain the initial variant and quote; also the
    /// way to retry after a transient outage.
    pub async fn refresh(&self) -> Result<()> {
        let snapshot = {
            let state = self.state.read().await;
            self.begin_request(&state)
        };

        self.resolve_snapshot(snapshot).await
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    async fn resolve_snapshot(&self, snapshot: RequestSnapshot) -> Result<()> {
        let variant = match self
            .variants
            .find(snapshot.color.as_deref(), snapshot.size.as_deref())
            .await
        {
            Ok(variant) => variant,
            Err(e) => {
                if self.is_stale(&snapshot) {
                    debug!("Discarding failed lookup for superseded selection");
                    return Ok(());
                }
                // Previously selected variant is retained unchanged.
                return Err(e);
            }
        };

        {
            let mut state = self.state.write().await;
            if self.is_stale(&snapshot) {
                debug!(
                    "Discarding stale variant {} for superseded selection",
                    variant.id
                );
                return Ok(());
            }
            let changed =
                state.selected_variant.as_ref().map(|v| &v.id) != Some(&variant.id);
            state.selected_variant = Some(variant.clone());
            if changed {
                self.emit_selection(&state);
            }
        }

        self.price_and_apply(&variant, &snapshot).await
    }

    async fn price_and_apply(&self, variant: &Variant, snapshot: &RequestSnapshot) -> Result<()> {
        let quote = match self.pricing.resolve_price(variant, snapshot.quantity).await {
            Ok(quote) => quote,
            Err(e) => {
                if self.is_stale(snapshot) {
                    debug!("Discarding failed pricing for superseded selection");
                    return Ok(());
                }
                // Prior quote stays untouched; the UI keeps displaying it.
                return Err(e);
            }
        };

        let mut last_quote = self.last_quote.write().await;
        if self.is_stale(snapshot) {
            debug!(
                "Discarding stale quote for variant {} quantity {}",
                variant.id, snapshot.quantity
            );
            return Ok(());
        }

        *last_quote = Some(quote.clone());
        self.events.emit(DomainEvent::price_quote_changed(
            variant.id.clone(),
            snapshot.quantity,
            quote.unit_price,
            quote.total_price,
            quote.source,
        ));

        Ok(())
    }

    /// Tag a new resolution request with the next generation, superseding
    /// every request issued before it.
    fn begin_request(&self, state: &SelectionState) -> RequestSnapshot {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestSnapshot {
            color: state.selected_color.clone(),
            size: state.selected_size.clone(),
            quantity: state.quantity,
            generation,
        }
    }

    fn is_stale(&self, snapshot: &RequestSnapshot) -> bool {
        self.generation.load(Ordering::SeqCst) != snapshot.generation
    }

    fn emit_selection(&self, state: &SelectionState) {
        self.events.emit(DomainEvent::selection_changed(
            state.selected_color.clone(),
            state.selected_size.clone(),
            state.quantity,
            state.selected_variant.as_ref().map(|v| v.id.clone()),
        ));
    }
}
