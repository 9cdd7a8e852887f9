//! Catalog payload normalization.
//!
//! The catalog service is not consistent about field casing: depending on
//! the code path that produced a payload, keys arrive in lowerCamel
//! (`name`, `variants`, `unit_price`) or PascalCase (`Name`, `Variants`,
//! `UnitPrice`), and variant attributes arrive either as flat `color`/`size`
//! fields or nested under an `attributes` object. Normalization happens
//! exactly once, here, at ingestion; every component downstream operates on
//! the canonical [`models`](crate::models) schema and never re-checks
//! alternate spellings.
//!
//! Missing optional fields never fail normalization. The only hard failure
//! is a payload that is not a JSON object.

use log::warn;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::errors::CatalogError;
use crate::models::{
    PriceQuote, PriceTier, Product, ProductAttributes, ProductId, Variant, VariantAttributes,
    VariantId,
};

/// Normalize a raw product payload into the canonical schema.
///
/// Tolerates either field casing and any combination of missing optional
/// fields. A payload without a `variants` key normalizes to an empty
/// variant list. Fails only when the payload is not an object or carries
/// no usable product id.
pub fn product(raw: &Value) -> Result<Product, CatalogError> {
    let obj = as_object(raw)?;

    let id = field(obj, &["id", "Id"])
        .and_then(identifier)
        .ok_or_else(|| CatalogError::MalformedPayload("product id missing".to_string()))?;

    let variants = field(obj, &["variants", "Variants"])
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .enumerate()
                .filter_map(|(i, entry)| match variant(entry) {
                    Ok(v) => Some(v),
                    Err(e) => {
                        warn!("Skipping variant at index {}: {}", i, e);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Product {
        id: ProductId::new(id),
        name: field(obj, &["name", "Name"]).and_then(text),
        description: field(obj, &["description", "Description"]).and_then(text),
        image_url: product_image(obj),
        attributes: product_attributes(obj),
        variants,
    })
}

/// Normalize a raw variant payload into the canonical schema.
///
/// The flat `color`/`size` fields win over a nested attributes object when
/// both are present.
pub fn variant(raw: &Value) -> Result<Variant, CatalogError> {
    let obj = as_object(raw)?;

    let id = field(obj, &["id", "Id"])
        .and_then(identifier)
        .ok_or_else(|| CatalogError::MalformedPayload("variant id missing".to_string()))?;

    Ok(Variant {
        id: VariantId::new(id),
        name: field(obj, &["name", "Name"]).and_then(text),
        number: field(obj, &["number", "Number"]).and_then(identifier),
        image_url: field(obj, &["imageUrl", "ImageUrl"]).and_then(text),
        attributes: variant_attributes(obj),
        price_tiers: price_tiers(obj),
    })
}

/// Normalize a raw pricing response into a [`PriceQuote`].
///
/// Both prices are required; a response without them is unusable and the
/// caller falls back to local tiers.
pub fn price_quote(raw: &Value, source: &str) -> Result<PriceQuote, CatalogError> {
    let obj = as_object(raw)?;

    let unit_price = field(obj, &["unit_price", "unitPrice", "UnitPrice"])
        .and_then(decimal)
        .ok_or_else(|| CatalogError::MalformedPayload("unit price missing".to_string()))?;
    let total_price = field(obj, &["total_price", "totalPrice", "TotalPrice"])
        .and_then(decimal)
        .ok_or_else(|| CatalogError::MalformedPayload("total price missing".to_string()))?;

    Ok(PriceQuote::new(unit_price, total_price, source))
}

// =============================================================================
// Field extraction helpers
// =============================================================================

fn as_object(raw: &Value) -> Result<&Map<String, Value>, CatalogError> {
    raw.as_object()
        .ok_or_else(|| CatalogError::MalformedPayload("payload is not an object".to_string()))
}

/// First present spelling wins. Both spellings are checked before a field
/// is treated as absent.
fn field<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| obj.get(*name))
        .filter(|v| !v.is_null())
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Identifiers arrive as strings or bare numbers depending on the service
/// code path; both become strings.
fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n.as_f64().and_then(Decimal::from_f64_retain),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn quantity_bound(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|v| u32::try_from(v).ok())
}

fn product_image(obj: &Map<String, Value>) -> Option<String> {
    field(obj, &["mainImage", "MainImage"])
        .and_then(text)
        .or_else(|| {
            field(obj, &["images", "Images"])
                .and_then(Value::as_array)
                .and_then(|images| images.first())
                .and_then(text)
        })
        .or_else(|| field(obj, &["imageUrl", "ImageUrl"]).and_then(text))
}

fn product_attributes(obj: &Map<String, Value>) -> ProductAttributes {
    let attrs = field(obj, &["attributes", "Attributes"]).and_then(Value::as_object);

    let list = |names: &[&str]| -> Vec<String> {
        attrs
            .and_then(|a| field(a, names))
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(attribute_name).collect())
            .unwrap_or_default()
    };

    ProductAttributes {
        colors: list(&["colors", "Colors"]),
        sizes: list(&["sizes", "Sizes"]),
    }
}

/// Declared attribute entries are either bare strings or objects with a
/// name field.
fn attribute_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => field(obj, &["name", "Name"]).and_then(text),
        _ => None,
    }
}

fn variant_attributes(obj: &Map<String, Value>) -> VariantAttributes {
    let nested = field(obj, &["attributes", "Attributes"]).and_then(Value::as_object);

    let axis = |flat: &[&str], nested_names: &[&str]| -> Option<String> {
        field(obj, flat)
            .and_then(text)
            .or_else(|| nested.and_then(|a| field(a, nested_names)).and_then(text))
    };

    VariantAttributes {
        color: axis(&["color", "Color"], &["color", "Color"]),
        size: axis(&["size", "Size"], &["size", "Size"]),
    }
}

fn price_tiers(obj: &Map<String, Value>) -> Vec<PriceTier> {
    let entries = match field(obj, &["prices", "Prices"]).and_then(Value::as_array) {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match price_tier(entry) {
            Some(tier) => Some(tier),
            None => {
                warn!("Skipping unusable price tier at index {}", i);
                None
            }
        })
        .collect()
}

fn price_tier(raw: &Value) -> Option<PriceTier> {
    let obj = raw.as_object()?;
    let range = field(obj, &["quantity", "Quantity"]).and_then(Value::as_object)?;

    let from = field(range, &["from", "From"]).and_then(quantity_bound)?;
    let to = field(range, &["to", "To"]).and_then(quantity_bound)?;
    let unit_price = field(obj, &["price", "Price"]).and_then(decimal)?;

    Some(PriceTier::new(from, to, unit_price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_product_accepts_either_casing_identically() {
        let camel = json!({
            "id": "722541043",
            "name": "Canvas Tote",
            "description": "A tote bag",
            "mainImage": "https://img.example/main.png",
            "attributes": {
                "colors": ["Red", "Blue"],
                "sizes": ["S", "M"]
            },
            "variants": [{
                "id": "V-1",
                "name": "Red / S",
                "number": "SKU-1",
                "imageUrl": "https://img.example/v1.png",
                "color": "Red",
                "size": "S",
                "prices": [
                    { "quantity": { "from": 1, "to": 9 }, "price": 10.0 },
                    { "quantity": { "from": 10, "to": 999 }, "price": 8.0 }
                ]
            }]
        });
        let pascal = json!({
            "Id": "722541043",
            "Name": "Canvas Tote",
            "Description": "A tote bag",
            "MainImage": "https://img.example/main.png",
            "Attributes": {
                "Colors": ["Red", "Blue"],
                "Sizes": ["S", "M"]
            },
            "Variants": [{
                "Id": "V-1",
                "Name": "Red / S",
                "Number": "SKU-1",
                "ImageUrl": "https://img.example/v1.png",
                "Attributes": { "Color": "Red", "Size": "S" },
                "Prices": [
                    { "Quantity": { "From": 1, "To": 9 }, "Price": 10.0 },
                    { "Quantity": { "From": 10, "To": 999 }, "Price": 8.0 }
                ]
            }]
        });

        let from_camel = product(&camel).unwrap();
        let from_pascal = product(&pascal).unwrap();
        assert_eq!(from_camel, from_pascal);

        assert_eq!(from_camel.name.as_deref(), Some("Canvas Tote"));
        assert_eq!(from_camel.attributes.colors, vec!["Red", "Blue"]);
        assert_eq!(from_camel.variants.len(), 1);
        assert_eq!(from_camel.variants[0].price_tiers.len(), 2);
        assert_eq!(from_camel.variants[0].price_tiers[1].unit_price, dec!(8));
    }

    #[test]
    fn test_flat_attribute_fields_win_over_nested() {
        let raw = json!({
            "id": "V-2",
            "color": "Blue",
            "size": "M",
            "attributes": { "Color": "Red", "Size": "S" }
        });

        let v = variant(&raw).unwrap();
        assert_eq!(v.attributes.color.as_deref(), Some("Blue"));
        assert_eq!(v.attributes.size.as_deref(), Some("M"));
    }

    #[test]
    fn test_nested_attributes_used_when_flat_absent() {
        let raw = json!({
            "Id": "V-3",
            "Attributes": { "Color": "Green" }
        });

        let v = variant(&raw).unwrap();
        assert_eq!(v.attributes.color.as_deref(), Some("Green"));
        assert!(v.attributes.size.is_none());
    }

    #[test]
    fn test_missing_variants_key_yields_empty_list() {
        let raw = json!({ "id": "722541043", "name": "Canvas Tote" });

        let p = product(&raw).unwrap();
        assert!(p.variants.is_empty());
        assert!(p.description.is_none());
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let raw = json!({ "id": 722541043 });
        let p = product(&raw).unwrap();
        assert_eq!(p.id.as_str(), "722541043");
    }

    #[test]
    fn test_image_preference_order() {
        let with_main = json!({
            "id": "1",
            "mainImage": "main.png",
            "images": ["first.png"],
            "imageUrl": "url.png"
        });
        assert_eq!(
            product(&with_main).unwrap().image_url.as_deref(),
            Some("main.png")
        );

        let with_images = json!({ "id": "1", "images": ["first.png"], "imageUrl": "url.png" });
        assert_eq!(
            product(&with_images).unwrap().image_url.as_deref(),
            Some("first.png")
        );

        let with_url = json!({ "id": "1", "ImageUrl": "url.png" });
        assert_eq!(
            product(&with_url).unwrap().image_url.as_deref(),
            Some("url.png")
        );
    }

    #[test]
    fn test_non_object_payload_fails() {
        assert!(matches!(
            product(&json!([1, 2, 3])),
            Err(CatalogError::MalformedPayload(_))
        ));
        assert!(matches!(
            product(&json!("not a product")),
            Err(CatalogError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_unusable_variant_entries_are_skipped() {
        let raw = json!({
            "id": "722541043",
            "variants": [
                { "id": "V-1", "color": "Red", "size": "S" },
                "garbage",
                { "color": "Blue" }
            ]
        });

        let p = product(&raw).unwrap();
        assert_eq!(p.variants.len(), 1);
        assert_eq!(p.variants[0].id.as_str(), "V-1");
    }

    #[test]
    fn test_declared_attribute_objects_with_name() {
        let raw = json!({
            "id": "722541043",
            "attributes": {
                "Colors": [{ "Name": "Red" }, { "name": "White" }, "Blue"],
                "sizes": []
            }
        });

        let p = product(&raw).unwrap();
        assert_eq!(p.attributes.colors, vec!["Red", "White", "Blue"]);
        assert!(p.attributes.sizes.is_empty());
    }

    #[test]
    fn test_price_quote_accepts_either_casing() {
        let snake = json!({ "unit_price": 9.5, "total_price": 19.0 });
        let camel = json!({ "unitPrice": 9.5, "totalPrice": 19.0 });

        let a = price_quote(&snake, "REST").unwrap();
        let b = price_quote(&camel, "REST").unwrap();
        assert_eq!(a.unit_price, b.unit_price);
        assert_eq!(a.total_price, b.total_price);
        assert_eq!(a.unit_price, dec!(9.5));
    }

    #[test]
    fn test_price_quote_missing_price_fails() {
        let raw = json!({ "unit_price": 9.5 });
        assert!(matches!(
            price_quote(&raw, "REST"),
            Err(CatalogError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_string_prices_are_parsed() {
        let raw = json!({
            "id": "V-9",
            "prices": [{ "quantity": { "from": 1, "to": 999 }, "price": "12.50" }]
        });

        let v = variant(&raw).unwrap();
        assert_eq!(v.price_tiers[0].unit_price, dec!(12.50));
    }
}
