use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{ProductId, VariantId};

/// Canonical product as produced by the normalizer.
///
/// Only `id` and `variants` are guaranteed present; everything needed
/// purely for display may be absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default image shown before a variant is selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Declared attribute lists, used for selection defaults.
    pub attributes: ProductAttributes,

    /// Purchasable variants in catalog declaration order.
    pub variants: Vec<Variant>,
}

impl Product {
    /// Look up a variant by its catalog identity.
    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.id == id)
    }
}

/// Color/size lists as declared on the product itself.
///
/// These drive the initial selection. They are independent of the variant
/// list: a declared color may have no variants, and variants may use
/// colors that were never declared.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributes {
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
}

/// One concretely purchasable color/size combination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Stock-keeping number, when the catalog carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub attributes: VariantAttributes,

    /// Locally cached tiered pricing. May be empty when pricing is
    /// server-only.
    pub price_tiers: Vec<PriceTier>,
}

impl Variant {
    /// The tier whose `[from, to]` range contains `quantity`, if any.
    ///
    /// Tiers are non-overlapping within a variant, so at most one matches.
    pub fn tier_for_quantity(&self, quantity: u32) -> Option<&PriceTier> {
        self.price_tiers.iter().find(|t| t.contains(quantity))
    }

    /// The designated fallback when no tier covers a quantity: the first
    /// declared tier.
    pub fn fallback_tier(&self) -> Option<&PriceTier> {
        self.price_tiers.first()
    }
}

/// The attribute pair identifying a variant within its product.
///
/// Either axis may be absent; the pairs across a product's variants are
/// not necessarily a full cross-product.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl VariantAttributes {
    /// Exact-pair comparison against a requested selection.
    pub fn matches(&self, color: Option<&str>, size: Option<&str>) -> bool {
        self.color.as_deref() == color && self.size.as_deref() == size
    }
}

/// A quantity range with an associated per-unit price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    /// Lowest quantity covered, inclusive.
    pub from: u32,

    /// Highest quantity covered, inclusive.
    pub to: u32,

    pub unit_price: Decimal,
}

impl PriceTier {
    pub fn new(from: u32, to: u32, unit_price: Decimal) -> Self {
        Self {
            from,
            to,
            unit_price,
        }
    }

    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.from && quantity <= self.to
    }
}
