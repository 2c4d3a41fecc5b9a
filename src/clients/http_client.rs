//! Vendor-neutral HTTP core.
//!
//! This module provides the [`HttpClient`] type, which sends an
//! [`ApiRequest`] to a base URL with the auth headers of a [`VendorProfile`].
//! It knows nothing about tokens beyond attaching the one it is given.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::ApiError;
use crate::clients::http_request::{ApiRequest, HttpMethod};
use crate::clients::http_response::{request_id_from, ApiResponse};

/// Crate version from Cargo.toml.
pub const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How a vendor expects the access token to be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthScheme {
    /// SP-API: `Authorization: Bearer <token>` and `x-amz-access-token`.
    AmazonLwa,
    /// Shopify Admin API: `X-Shopify-Access-Token`.
    ShopifyAccessToken,
}

impl AuthScheme {
    /// Returns the headers carrying `token`.
    #[must_use]
    pub fn headers(self, token: &str) -> Vec<(&'static str, String)> {
        match self {
            Self::AmazonLwa => vec![
                ("Authorization", format!("Bearer {token}")),
                ("x-amz-access-token", token.to_string()),
            ],
            Self::ShopifyAccessToken => vec![("X-Shopify-Access-Token", token.to_string())],
        }
    }
}

/// Capability table for one remote API: where it lives and how it
/// authenticates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VendorProfile {
    /// Label used in log lines.
    pub name: &'static str,
    /// Base URL without trailing slash; request paths are appended.
    pub base_url: String,
    /// Auth header scheme.
    pub auth: AuthScheme,
}

impl VendorProfile {
    /// SP-API profile rooted at `base_url`.
    #[must_use]
    pub fn amazon(base_url: impl Into<String>) -> Self {
        Self {
            name: "amazon",
            base_url: base_url.into(),
            auth: AuthScheme::AmazonLwa,
        }
    }

    /// Shopify Admin API profile rooted at `base_url`.
    #[must_use]
    pub fn shopify(base_url: impl Into<String>) -> Self {
        Self {
            name: "shopify",
            base_url: base_url.into(),
            auth: AuthScheme::ShopifyAccessToken,
        }
    }
}

/// Builds the shared transport.
///
/// # Errors
///
/// Returns the reqwest error if TLS initialization fails.
pub fn build_transport(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().use_rustls_tls();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// HTTP client bound to one [`VendorProfile`].
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`.
///
/// # Example
///
/// ```rust,ignore
/// use marketplace_bridge::clients::{ApiRequest, HttpClient, VendorProfile};
///
/// let client = HttpClient::new(
///     VendorProfile::shopify("https://my-store.myshopify.com/admin/api/2023-10"),
///     None,
/// )?;
///
/// let request = ApiRequest::get("/products.json").query_param("limit", "5").build()?;
/// let products = client.request(&request, access_token).await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    profile: VendorProfile,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client with its own transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the transport cannot be built.
    pub fn new(profile: VendorProfile, timeout: Option<Duration>) -> Result<Self, ApiError> {
        Ok(Self::with_client(build_transport(timeout)?, profile))
    }

    /// Creates a client on an existing transport.
    #[must_use]
    pub fn with_client(client: reqwest::Client, profile: VendorProfile) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert(
            "User-Agent".to_string(),
            format!("marketplace-bridge/{CRATE_VERSION}"),
        );
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            client,
            profile,
            default_headers,
        }
    }

    /// Returns the vendor profile.
    #[must_use]
    pub const fn profile(&self) -> &VendorProfile {
        &self.profile
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.profile.base_url
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full URL for `request`, without the query string.
    #[must_use]
    pub fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.profile.base_url, request.path)
    }

    /// Sends `request` with `token` and returns the decoded body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    pub async fn request(
        &self,
        request: &ApiRequest,
        token: &str,
    ) -> Result<serde_json::Value, ApiError> {
        Ok(self.send(request, token).await?.body)
    }

    /// Sends `request` with `token` and returns the full response.
    ///
    /// A single attempt is made. Any 2xx status counts as success.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidRequest`] if the descriptor fails validation
    /// - [`ApiError::Transport`] on connection failure or timeout
    /// - [`ApiError::Status`] on a non-2xx status
    /// - [`ApiError::Decode`] if a 2xx body is not JSON
    pub async fn send(&self, request: &ApiRequest, token: &str) -> Result<ApiResponse, ApiError> {
        request.verify()?;

        let url = self.url_for(request);
        let vendor = self.profile.name;

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        for (key, value) in self.profile.auth.headers(token) {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }
        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        tracing::debug!("{vendor} {} {url}", request.method);

        let res = req_builder.send().await.map_err(|e| {
            tracing::warn!("{vendor} {} {} failed: {e}", request.method, request.path);
            ApiError::Transport(e)
        })?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.map_err(|e| {
            tracing::warn!("{vendor} {}: failed to read body: {e}", request.path);
            ApiError::Transport(e)
        })?;

        if !(200..300).contains(&code) {
            let request_id = request_id_from(&res_headers).map(String::from);
            tracing::warn!(
                "{vendor} {} {} returned {code} (request id {})",
                request.method,
                request.path,
                request_id.as_deref().unwrap_or("-")
            );
            return Err(ApiError::Status {
                code,
                body: body_text,
                request_id,
            });
        }

        let body = serde_json::from_str(&body_text).map_err(|e| {
            tracing::warn!("{vendor} {}: response is not JSON: {e}", request.path);
            ApiError::Decode {
                reason: e.to_string(),
            }
        })?;

        Ok(ApiResponse::new(code, res_headers, body))
    }

    /// `PUT`s raw `content` to an absolute pre-signed `url`.
    ///
    /// No auth or default headers are attached; the URL carries its own
    /// signature.
    ///
    /// # Errors
    ///
    /// [`ApiError::Transport`] on connection failure, [`ApiError::Status`]
    /// on a non-2xx status.
    pub async fn upload(
        &self,
        url: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<(), ApiError> {
        let vendor = self.profile.name;
        tracing::debug!("{vendor} upload of {} bytes", content.len());

        let res = self
            .client
            .put(url)
            .header("Content-Type", content_type)
            .body(content)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("{vendor} upload failed: {e}");
                ApiError::Transport(e)
            })?;

        let code = res.status().as_u16();
        if !(200..300).contains(&code) {
            let request_id = request_id_from(&Self::parse_response_headers(res.headers()))
                .map(String::from);
            let body = res.text().await.unwrap_or_default();
            tracing::warn!("{vendor} upload returned {code}");
            return Err(ApiError::Status {
                code,
                body,
                request_id,
            });
        }
        Ok(())
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amazon_scheme_sends_token_twice() {
        let headers = AuthScheme::AmazonLwa.headers("Atza|abc");
        assert_eq!(
            headers,
            vec![
                ("Authorization", "Bearer Atza|abc".to_string()),
                ("x-amz-access-token", "Atza|abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_shopify_scheme_header() {
        let headers = AuthScheme::ShopifyAccessToken.headers("shpat_1");
        assert_eq!(
            headers,
            vec![("X-Shopify-Access-Token", "shpat_1".to_string())]
        );
    }

    #[test]
    fn test_default_headers() {
        let client = HttpClient::new(VendorProfile::amazon("https://example.com"), None).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("marketplace-bridge/"));
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_url_is_base_plus_path() {
        let client = HttpClient::new(
            VendorProfile::shopify("https://shop.myshopify.com/admin/api/2023-10"),
            None,
        )
        .unwrap();
        let request = ApiRequest::get("/products/42.json").build().unwrap();

        assert_eq!(
            client.url_for(&request),
            "https://shop.myshopify.com/admin/api/2023-10/products/42.json"
        );
        assert_eq!(client.profile().auth, AuthScheme::ShopifyAccessToken);
    }

    #[tokio::test]
    async fn test_invalid_request_is_not_sent() {
        let client = HttpClient::new(VendorProfile::amazon("http://127.0.0.1:9"), None).unwrap();
        let request = ApiRequest {
            method: HttpMethod::Get,
            path: "/orders/v0/orders".to_string(),
            query: Vec::new(),
            body: Some(serde_json::json!({"x": 1})),
            headers: Vec::new(),
        };

        let result = client.send(&request, "token").await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}
