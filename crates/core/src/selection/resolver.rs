//! Pure variant resolution and selection repair.
//!
//! Color and size are independent axes whose cross-product is sparse: some
//! combinations legitimately have no variant. The repair operations keep a
//! selection on a purchasable combination by snapping the other axis to its
//! first available value, without precomputing a compatibility matrix.

use log::debug;

use storefront_catalog::{Product, Variant};

use super::model::SelectionState;

/// Exact (color, size) match over the product's variants, in declaration
/// order.
pub fn resolve_by_attributes<'a>(
    product: &'a Product,
    color: Option<&str>,
    size: Option<&str>,
) -> Option<&'a Variant> {
    product
        .variants
        .iter()
        .find(|v| v.attributes.matches(color, size))
}

/// Sizes available for `color`, in variant declaration order, duplicates
/// removed.
pub fn available_sizes<'a>(product: &'a Product, color: &str) -> Vec<&'a str> {
    let mut sizes: Vec<&str> = Vec::new();
    for variant in &product.variants {
        if variant.attributes.color.as_deref() != Some(color) {
            continue;
        }
        if let Some(size) = variant.attributes.size.as_deref() {
            if !sizes.contains(&size) {
                sizes.push(size);
            }
        }
    }
    sizes
}

/// Colors available for `size`, in variant declaration order, duplicates
/// removed.
pub fn available_colors<'a>(product: &'a Product, size: &str) -> Vec<&'a str> {
    let mut colors: Vec<&str> = Vec::new();
    for variant in &product.variants {
        if variant.attributes.size.as_deref() != Some(size) {
            continue;
        }
        if let Some(color) = variant.attributes.color.as_deref() {
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
    }
    colors
}

/// Apply a color change, repairing the size axis if needed.
///
/// If the current size is not available for the new color, it snaps to the
/// first available size; a color with no variants at all unsets the size.
/// Concludes by re-resolving: on success `selected_variant` is replaced,
/// on failure it keeps its previous, possibly stale, value (known
/// incompleteness - the UI keeps rendering the old variant rather than
/// nothing).
pub fn on_color_changed(product: &Product, state: &mut SelectionState, new_color: &str) {
    state.selected_color = Some(new_color.to_string());

    let sizes = available_sizes(product, new_color);
    let size_available = state
        .selected_size
        .as_deref()
        .is_some_and(|s| sizes.contains(&s));

    if !size_available {
        let snapped = sizes.first().map(|s| (*s).to_string());
        debug!(
            "Size {:?} not available for color {:?}, snapping to {:?}",
            state.selected_size, new_color, snapped
        );
        state.selected_size = snapped;
    }

    conclude_resolve(product, state);
}

/// Apply a size change, repairing the color axis if needed. Symmetric to
/// [`on_color_changed`].
pub fn on_size_changed(product: &Product, state: &mut SelectionState, new_size: &str) {
    state.selected_size = Some(new_size.to_string());

    let colors = available_colors(product, new_size);
    let color_available = state
        .selected_color
        .as_deref()
        .is_some_and(|c| colors.contains(&c));

    if !color_available {
        let snapped = colors.first().map(|c| (*c).to_string());
        debug!(
            "Color {:?} not available for size {:?}, snapping to {:?}",
            state.selected_color, new_size, snapped
        );
        state.selected_color = snapped;
    }

    conclude_resolve(product, state);
}

fn conclude_resolve(product: &Product, state: &mut SelectionState) {
    if let Some(variant) = resolve_by_attributes(
        product,
        state.selected_color.as_deref(),
        state.selected_size.as_deref(),
    ) {
        state.selected_variant = Some(variant.clone());
    }
}
