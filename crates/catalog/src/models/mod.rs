//! Canonical catalog models.
//!
//! Everything in this module is the output of the normalizer: one schema,
//! one field spelling. Downstream code never re-checks alternate wire
//! casings.

mod product;
mod quote;
mod types;

pub use product::{PriceTier, Product, ProductAttributes, Variant, VariantAttributes};
pub use quote::PriceQuote;
pub use types::{ProductId, VariantId};
