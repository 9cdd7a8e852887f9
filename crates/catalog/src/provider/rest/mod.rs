//! REST catalog provider implementation.
//!
//! Talks to the remote catalog/pricing service over plain HTTP:
//!
//! - Product payload: `GET {base}/products/{id}`
//! - Variant lookup: `GET {base}/products/{id}/variant-by-attributes?color=&size=`
//! - Pricing: `POST {base}/products/{id}/pricing` with `{variant_id, quantity}`
//!
//! Responses may use either field casing; everything is run through
//! [`normalize`](crate::normalize) before being returned.

use log::debug;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use urlencoding::encode;

use async_trait::async_trait;

use crate::errors::CatalogError;
use crate::models::{PriceQuote, Product, ProductId, Variant, VariantId};
use crate::normalize;
use crate::provider::CatalogProvider;

const PROVIDER_ID: &str = "REST";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body for the pricing endpoint.
#[derive(Debug, Serialize)]
struct PricingRequest<'a> {
    variant_id: &'a str,
    quantity: u32,
}

/// Catalog provider backed by the remote REST service.
///
/// # Example
///
/// ```ignore
/// let provider = RestCatalogProvider::new("http://127.0.0.1:5000/api");
/// let product = provider.fetch_product(&"722541043".into()).await?;
/// ```
pub struct RestCatalogProvider {
    client: Client,
    base_url: String,
}

impl RestCatalogProvider {
    /// Create a provider for the service at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn product_url(&self, product: &ProductId) -> String {
        format!("{}/products/{}", self.base_url, product)
    }

    fn variant_url(&self, product: &ProductId, color: Option<&str>, size: Option<&str>) -> String {
        format!(
            "{}/products/{}/variant-by-attributes?color={}&size={}",
            self.base_url,
            product,
            encode(color.unwrap_or("")),
            encode(size.unwrap_or(""))
        )
    }

    fn pricing_url(&self, product: &ProductId) -> String {
        format!("{}/products/{}/pricing", self.base_url, product)
    }

    /// Map a response to its body text, converting non-success statuses
    /// into errors.
    async fn read_body(
        response: reqwest::Response,
        context: &str,
    ) -> Result<String, CatalogError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(context.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP error: {}", status),
            });
        }

        Ok(response.text().await?)
    }

    fn parse_json(body: &str) -> Result<serde_json::Value, CatalogError> {
        serde_json::from_str(body)
            .map_err(|e| CatalogError::MalformedPayload(format!("invalid JSON body: {}", e)))
    }
}

#[async_trait]
impl CatalogProvider for RestCatalogProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_product(&self, product: &ProductId) -> Result<Product, CatalogError> {
        let url = self.product_url(product);
        debug!("Fetching product from {}", url);

        let response = self.client.get(&url).send().await?;
        let body = Self::read_body(response, &format!("product {}", product)).await?;

        normalize::product(&Self::parse_json(&body)?)
    }

    async fn variant_by_attributes(
        &self,
        product: &ProductId,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Result<Variant, CatalogError> {
        let url = self.variant_url(product, color, size);
        debug!("Looking up variant via {}", url);

        let response = self.client.get(&url).send().await?;
        let context = format!(
            "variant ({}, {}) of product {}",
            color.unwrap_or("-"),
            size.unwrap_or("-"),
            product
        );
        let body = Self::read_body(response, &context).await?;

        normalize::variant(&Self::parse_json(&body)?)
    }

    async fn price_for(
        &self,
        product: &ProductId,
        variant: &VariantId,
        quantity: u32,
    ) -> Result<PriceQuote, CatalogError> {
        let url = self.pricing_url(product);
        debug!(
            "Requesting price for variant {} quantity {} via {}",
            variant, quantity, url
        );

        let request = PricingRequest {
            variant_id: variant.as_str(),
            quantity,
        };
        let response = self.client.post(&url).json(&request).send().await?;
        let body =
            Self::read_body(response, &format!("pricing for variant {}", variant)).await?;

        normalize::price_quote(&Self::parse_json(&body)?, PROVIDER_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id() {
        let provider = RestCatalogProvider::new("http://127.0.0.1:5000/api");
        assert_eq!(provider.id(), "REST");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let provider = RestCatalogProvider::new("http://127.0.0.1:5000/api/");
        assert_eq!(
            provider.product_url(&"722541043".into()),
            "http://127.0.0.1:5000/api/products/722541043"
        );
    }

    #[test]
    fn test_variant_url_encodes_attributes() {
        let provider = RestCatalogProvider::new("http://127.0.0.1:5000/api");
        let url = provider.variant_url(&"1".into(), Some("Navy Blue"), Some("S"));
        assert_eq!(
            url,
            "http://127.0.0.1:5000/api/products/1/variant-by-attributes?color=Navy%20Blue&size=S"
        );
    }

    #[test]
    fn test_variant_url_with_unset_axis() {
        let provider = RestCatalogProvider::new("http://127.0.0.1:5000/api");
        let url = provider.variant_url(&"1".into(), Some("Red"), None);
        assert_eq!(
            url,
            "http://127.0.0.1:5000/api/products/1/variant-by-attributes?color=Red&size="
        );
    }

    #[test]
    fn test_pricing_request_body_shape() {
        let request = PricingRequest {
            variant_id: "V-1",
            quantity: 20,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "variant_id": "V-1", "quantity": 20 })
        );
    }

    #[test]
    fn test_parse_json_rejects_invalid_body() {
        assert!(matches!(
            RestCatalogProvider::parse_json("<html>gateway error</html>"),
            Err(CatalogError::MalformedPayload(_))
        ));
    }
}
