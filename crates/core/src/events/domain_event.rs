//! Domain event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_catalog::{ProductId, VariantId};

/// Domain events emitted by the engine after state changes.
///
/// These events represent facts about the selection session. The rendering
/// collaborator translates them into display updates (swatch highlighting,
/// price labels, variant imagery).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A product was loaded and a fresh selection session started.
    ProductLoaded { product_id: ProductId },

    /// The selection (color, size, or quantity) changed.
    SelectionChanged {
        color: Option<String>,
        size: Option<String>,
        quantity: u32,
        /// The variant currently backing the selection; stale until the
        /// resolution chain completes for the new selection.
        variant_id: Option<VariantId>,
    },

    /// A new price quote was applied for the current selection.
    PriceQuoteChanged {
        variant_id: VariantId,
        quantity: u32,
        unit_price: Decimal,
        total_price: Decimal,
        /// Resolving source (REST, LOCAL_TIERS, ...)
        source: String,
    },
}

impl DomainEvent {
    /// Creates a ProductLoaded event.
    pub fn product_loaded(product_id: ProductId) -> Self {
        Self::ProductLoaded { product_id }
    }

    /// Creates a SelectionChanged event.
    pub fn selection_changed(
        color: Option<String>,
        size: Option<String>,
        quantity: u32,
        variant_id: Option<VariantId>,
    ) -> Self {
        Self::SelectionChanged {
            color,
            size,
            quantity,
            variant_id,
        }
    }

    /// Creates a PriceQuoteChanged event.
    pub fn price_quote_changed(
        variant_id: VariantId,
        quantity: u32,
        unit_price: Decimal,
        total_price: Decimal,
        source: String,
    ) -> Self {
        Self::PriceQuoteChanged {
            variant_id,
            quantity,
            unit_price,
            total_price,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_domain_event_serialization() {
        let event = DomainEvent::price_quote_changed(
            VariantId::new("V-1"),
            3,
            dec!(12.00),
            dec!(36.00),
            "LOCAL_TIERS".to_string(),
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("price_quote_changed"));

        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();
        match deserialized {
            DomainEvent::PriceQuoteChanged {
                variant_id,
                quantity,
                unit_price,
                total_price,
                source,
            } => {
                assert_eq!(variant_id, VariantId::new("V-1"));
                assert_eq!(quantity, 3);
                assert_eq!(unit_price, dec!(12.00));
                assert_eq!(total_price, dec!(36.00));
                assert_eq!(source, "LOCAL_TIERS");
            }
            _ => panic!("Expected PriceQuoteChanged"),
        }
    }

    #[test]
    fn test_selection_changed_serialization() {
        let event = DomainEvent::selection_changed(
            Some("Blue".to_string()),
            Some("M".to_string()),
            1,
            None,
        );

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();

        match deserialized {
            DomainEvent::SelectionChanged {
                color,
                size,
                quantity,
                variant_id,
            } => {
                assert_eq!(color.as_deref(), Some("Blue"));
                assert_eq!(size.as_deref(), Some("M"));
                assert_eq!(quantity, 1);
                assert!(variant_id.is_none());
            }
            _ => panic!("Expected SelectionChanged"),
        }
    }
}
