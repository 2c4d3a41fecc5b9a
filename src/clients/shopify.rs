//! Shopify Admin REST client.

use crate::clients::errors::ApiError;
use crate::clients::http_client::{HttpClient, VendorProfile};
use crate::clients::http_request::ApiRequest;
use crate::clients::http_response::ApiResponse;
use crate::config::{Secret, ShopifyConfig};

/// Authenticated Shopify Admin REST client.
///
/// Rooted at `https://{shop}.myshopify.com/admin/api/{version}`, so request
/// paths look like `/products.json`. The static access token is sent as
/// `X-Shopify-Access-Token` on every request.
#[derive(Clone, Debug)]
pub struct ShopifyClient {
    http: HttpClient,
    access_token: Secret,
}

// Verify ShopifyClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyClient>();
};

impl ShopifyClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP transport cannot be built.
    pub fn new(config: &ShopifyConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(
                VendorProfile::shopify(config.api_base_url()),
                config.timeout(),
            )?,
            access_token: config.access_token().clone(),
        })
    }

    /// Returns the Admin API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Sends `request` and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    pub async fn request(&self, request: &ApiRequest) -> Result<serde_json::Value, ApiError> {
        Ok(self.send(request).await?.body)
    }

    /// Sends `request` and returns the full response.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.http.send(request, self.access_token.expose()).await
    }
}
