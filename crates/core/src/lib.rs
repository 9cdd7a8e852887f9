//! Storefront Core - the selection-to-variant-and-price resolution engine.
//!
//! This crate keeps a product's color/size/quantity selection mutually
//! consistent, maps it to a concrete purchasable variant, and prices that
//! variant for the chosen quantity. Remote lookups are authoritative when
//! the catalog service answers and degrade to locally cached data when it
//! does not; results of superseded lookups are discarded so the last
//! selection always wins.
//!
//! Rendering, event binding, and transport live outside this crate; the
//! [`session::SessionController`] and [`events::DomainEventSink`] are the
//! seams they attach to.

pub mod constants;
pub mod errors;
pub mod events;
pub mod pricing;
pub mod selection;
pub mod session;

// Re-export the session entry point
pub use session::SessionController;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
