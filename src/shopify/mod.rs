//! Shopify Admin REST resources used by the bridge.
//!
//! - `GET /products/{id}.json` → [`ShopifyProduct`]
//! - `GET /products.json?limit=N` → raw JSON
//! - `GET /orders.json?limit=N&status=any` → raw JSON
//!
//! No pagination: only the first page is fetched.

mod models;

pub use models::{ShopifyImage, ShopifyProduct, ShopifyVariant};

use serde::Deserialize;
use serde_json::Value;

use crate::clients::{ApiError, ApiRequest, ShopifyClient};

impl ShopifyClient {
    /// Fetches one product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the response has no `product` object
    /// or it does not match [`ShopifyProduct`]; otherwise the errors of
    /// [`ShopifyClient::request`].
    pub async fn get_product(&self, id: u64) -> Result<ShopifyProduct, ApiError> {
        let request = ApiRequest::get(format!("/products/{id}.json")).build()?;
        let body = self.request(&request).await?;

        let product = body.get("product").ok_or_else(|| ApiError::Decode {
            reason: "response has no 'product' field".to_string(),
        })?;
        ShopifyProduct::deserialize(product).map_err(|e| ApiError::Decode {
            reason: format!("'product': {e}"),
        })
    }

    /// Lists up to `limit` products.
    ///
    /// # Errors
    ///
    /// See [`ShopifyClient::request`].
    pub async fn list_products(&self, limit: u32) -> Result<Value, ApiError> {
        let request = ApiRequest::get("/products.json")
            .query_param("limit", limit.to_string())
            .build()?;
        self.request(&request).await
    }

    /// Lists up to `limit` orders in any status.
    ///
    /// # Errors
    ///
    /// See [`ShopifyClient::request`].
    pub async fn list_orders(&self, limit: u32) -> Result<Value, ApiError> {
        let request = ApiRequest::get("/orders.json")
            .query_param("limit", limit.to_string())
            .query_param("status", "any")
            .build()?;
        self.request(&request).await
    }
}
