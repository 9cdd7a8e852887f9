//! Price resolution.
//!
//! An ordered chain of price sources: the remote service is authoritative
//! when it answers; locally cached tiers cover for it when it does not.

pub mod service;

pub use service::{PriceSource, PricingService, RemotePriceSource, TierPriceSource};
