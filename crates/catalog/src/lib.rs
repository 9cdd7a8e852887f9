//! Storefront Catalog Crate
//!
//! Wire-facing half of the storefront engine: canonical catalog models,
//! the ingestion-time payload normalizer, and the provider abstraction over
//! the remote catalog/pricing service.
//!
//! # Overview
//!
//! The remote service returns product, variant, and pricing payloads whose
//! field names vary in casing and nesting. This crate turns those payloads
//! into one canonical schema exactly once, at ingestion:
//!
//! ```text
//! +------------------+     +------------------+
//! |  Remote service  | --> |  raw JSON Value  |
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    normalize     |  (one canonical schema)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | Product/Variant/ |
//!                          | PriceTier/Quote  |
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Product`] - canonical product with ordered [`Variant`]s
//! - [`VariantAttributes`] - the (color, size) pair identifying a variant
//! - [`PriceTier`] - quantity range with a per-unit price
//! - [`PriceQuote`] - resolved unit/total price for a variant and quantity
//! - [`CatalogProvider`] - async seam to the remote service
//! - [`RestCatalogProvider`] - reqwest-backed implementation

pub mod errors;
pub mod models;
pub mod normalize;
pub mod provider;

// Re-export all public types from models
pub use models::{
    PriceQuote, PriceTier, Product, ProductAttributes, ProductId, Variant, VariantAttributes,
    VariantId,
};

// Re-export provider types
pub use provider::{CatalogProvider, RestCatalogProvider};

// Re-export error types
pub use errors::CatalogError;
