use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A resolved price for one variant at one quantity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Per-unit price at the quoted quantity.
    pub unit_price: Decimal,

    /// Extended price for the full quantity.
    pub total_price: Decimal,

    /// Source of the quote (REST, LOCAL_TIERS, etc.)
    pub source: String,

    /// When the quote was produced.
    pub as_of: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(unit_price: Decimal, total_price: Decimal, source: impl Into<String>) -> Self {
        Self {
            unit_price,
            total_price,
            source: source.into(),
            as_of: Utc::now(),
        }
    }

    /// Quote derived from a per-unit price, totalled over `quantity`.
    pub fn from_unit_price(unit_price: Decimal, quantity: u32, source: impl Into<String>) -> Self {
        Self::new(unit_price, unit_price * Decimal::from(quantity), source)
    }
}
