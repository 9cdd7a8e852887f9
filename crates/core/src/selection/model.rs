use serde::{Deserialize, Serialize};

use storefront_catalog::{Product, Variant};

use crate::constants::{MAX_QUANTITY, MIN_QUANTITY};

/// The user's current purchasing selection.
///
/// Created once per product load and replaced wholesale on a fresh load.
/// Mutated only through the resolver operations and the quantity update;
/// the session controller owns the single live value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_color: Option<String>,

    pub selected_size: Option<String>,

    /// Set only after a successful resolve. When a resolve fails this
    /// keeps its previous (possibly stale) value instead of being cleared,
    /// so the UI never renders a transient empty state.
    pub selected_variant: Option<Variant>,

    /// Always within `[MIN_QUANTITY, MAX_QUANTITY]`.
    pub quantity: u32,
}

impl SelectionState {
    /// Initial selection for a freshly loaded product.
    ///
    /// Defaults come from the product's declared attribute lists when
    /// present; otherwise the axes start unset. Quantity starts at 1.
    /// Pure - no remote queries.
    pub fn for_product(product: &Product) -> Self {
        Self {
            selected_color: product.attributes.colors.first().cloned(),
            selected_size: product.attributes.sizes.first().cloned(),
            selected_variant: None,
            quantity: MIN_QUANTITY,
        }
    }
}

/// Clamp a requested quantity into the orderable domain.
///
/// Out-of-range values are pulled to the nearest bound (0 becomes 1,
/// 1000 becomes 999); nothing out of range ever propagates downstream.
pub fn clamp_quantity(requested: i64) -> u32 {
    requested.clamp(i64::from(MIN_QUANTITY), i64::from(MAX_QUANTITY)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_catalog::{ProductAttributes, ProductId};

    fn product_with_attributes(colors: Vec<&str>, sizes: Vec<&str>) -> Product {
        Product {
            id: ProductId::new("722541043"),
            name: None,
            description: None,
            image_url: None,
            attributes: ProductAttributes {
                colors: colors.into_iter().map(String::from).collect(),
                sizes: sizes.into_iter().map(String::from).collect(),
            },
            variants: Vec::new(),
        }
    }

    #[test]
    fn test_defaults_from_declared_attributes() {
        let product = product_with_attributes(vec!["Red", "Blue"], vec!["S", "M"]);
        let state = SelectionState::for_product(&product);

        assert_eq!(state.selected_color.as_deref(), Some("Red"));
        assert_eq!(state.selected_size.as_deref(), Some("S"));
        assert!(state.selected_variant.is_none());
        assert_eq!(state.quantity, 1);
    }

    #[test]
    fn test_defaults_unset_without_declared_attributes() {
        let product = product_with_attributes(vec![], vec![]);
        let state = SelectionState::for_product(&product);

        assert!(state.selected_color.is_none());
        assert!(state.selected_size.is_none());
        assert_eq!(state.quantity, 1);
    }

    #[test]
    fn test_clamp_quantity_bounds() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(1), 1);
        assert_eq!(clamp_quantity(500), 500);
        assert_eq!(clamp_quantity(999), 999);
        assert_eq!(clamp_quantity(1000), 999);
        assert_eq!(clamp_quantity(-5), 1);
    }
}
