//! Request descriptors.
//!
//! This module provides the [`ApiRequest`] type and its builder for
//! describing a single call: method, path, ordered query parameters, an
//! optional JSON body and extra headers.

use std::fmt;

use crate::clients::errors::InvalidRequestError;

/// HTTP methods used by the SP-API and Shopify endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// A request relative to a vendor base URL.
///
/// # Example
///
/// ```rust
/// use marketplace_bridge::clients::{ApiRequest, HttpMethod};
/// use serde_json::json;
///
/// let search = ApiRequest::get("/catalog/2022-04-01/items")
///     .query_param("keywords", "wiper blade")
///     .query_list("marketplaceIds", ["ATVPDKIKX0DER"])
///     .build()
///     .unwrap();
/// assert_eq!(search.method, HttpMethod::Get);
///
/// let feed = ApiRequest::post("/feeds/2021-06-30/documents")
///     .body(json!({"contentType": "text/xml; charset=UTF-8"}))
///     .build()
///     .unwrap();
/// assert!(feed.body.is_some());
///
/// assert!(ApiRequest::get("/orders.json").body(json!({})).build().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// Absolute path appended to the base URL.
    pub path: String,
    /// Query parameters, sent in insertion order.
    pub query: Vec<(String, String)>,
    /// JSON body for POST/PUT.
    pub body: Option<serde_json::Value>,
    /// Additional headers to include in the request.
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// Creates a new builder.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(method, path)
    }

    /// Shorthand for `builder(HttpMethod::Get, path)`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> ApiRequestBuilder {
        Self::builder(HttpMethod::Get, path)
    }

    /// Shorthand for `builder(HttpMethod::Post, path)`.
    #[must_use]
    pub fn post(path: impl Into<String>) -> ApiRequestBuilder {
        Self::builder(HttpMethod::Post, path)
    }

    /// Shorthand for `builder(HttpMethod::Put, path)`.
    #[must_use]
    pub fn put(path: impl Into<String>) -> ApiRequestBuilder {
        Self::builder(HttpMethod::Put, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if:
    /// - `path` does not start with `/`
    /// - `method` is `Get` and `body` is `Some`
    /// - `method` is `Post` or `Put` and `body` is `None`
    pub fn verify(&self) -> Result<(), InvalidRequestError> {
        if !self.path.starts_with('/') {
            return Err(InvalidRequestError::InvalidPath {
                path: self.path.clone(),
            });
        }

        match (self.method, &self.body) {
            (HttpMethod::Get, Some(_)) => Err(InvalidRequestError::BodyNotAllowed {
                method: self.method.to_string(),
            }),
            (HttpMethod::Post | HttpMethod::Put, None) => Err(InvalidRequestError::MissingBody {
                method: self.method.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Builder for constructing [`ApiRequest`] instances.
#[derive(Debug)]
pub struct ApiRequestBuilder {
    request: ApiRequest,
}

impl ApiRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            request: ApiRequest {
                method,
                path: path.into(),
                query: Vec::new(),
                body: None,
                headers: Vec::new(),
            },
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    /// Appends a query parameter only when `value` is `Some`.
    #[must_use]
    pub fn query_param_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query_param(key, value),
            None => self,
        }
    }

    /// Appends a list-valued parameter as one comma-joined value, the form
    /// SP-API expects for `marketplaceIds`, `includedData` and the like.
    ///
    /// An empty list adds nothing.
    #[must_use]
    pub fn query_list<I, S>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        if joined.is_empty() {
            return self;
        }
        self.query_param(key, joined)
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((key.into(), value.into()));
        self
    }

    /// Builds the [`ApiRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if the request fails validation.
    pub fn build(self) -> Result<ApiRequest, InvalidRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = ApiRequest::get("/sellers/v1/marketplaceParticipations")
            .build()
            .unwrap();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/sellers/v1/marketplaceParticipations");
        assert!(request.body.is_none());
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_get_with_body_is_rejected() {
        let result = ApiRequest::get("/orders/v0/orders")
            .body(json!({"x": 1}))
            .build();

        assert!(matches!(
            result,
            Err(InvalidRequestError::BodyNotAllowed { method }) if method == "GET"
        ));
    }

    #[test]
    fn test_post_and_put_require_body() {
        assert!(matches!(
            ApiRequest::post("/feeds/2021-06-30/feeds").build(),
            Err(InvalidRequestError::MissingBody { method }) if method == "POST"
        ));
        assert!(matches!(
            ApiRequest::put("/products/1.json").build(),
            Err(InvalidRequestError::MissingBody { method }) if method == "PUT"
        ));
    }

    #[test]
    fn test_relative_path_is_rejected() {
        assert!(matches!(
            ApiRequest::get("products.json").build(),
            Err(InvalidRequestError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_query_keeps_insertion_order() {
        let request = ApiRequest::get("/fba/inventory/v1/summaries")
            .query_param("granularityType", "Marketplace")
            .query_param("granularityId", "ATVPDKIKX0DER")
            .query_list("marketplaceIds", ["ATVPDKIKX0DER", "A2EUQ1WTGCTBG2"])
            .build()
            .unwrap();

        assert_eq!(
            request.query,
            vec![
                ("granularityType".to_string(), "Marketplace".to_string()),
                ("granularityId".to_string(), "ATVPDKIKX0DER".to_string()),
                (
                    "marketplaceIds".to_string(),
                    "ATVPDKIKX0DER,A2EUQ1WTGCTBG2".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_empty_list_and_none_add_nothing() {
        let request = ApiRequest::get("/reports/2021-06-30/reports")
            .query_list("reportTypes", Vec::<String>::new())
            .query_param_opt("createdAfter", None::<String>)
            .build()
            .unwrap();
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_builder_with_extra_headers() {
        let request = ApiRequest::get("/products.json")
            .header("X-Custom-Header", "custom-value")
            .build()
            .unwrap();

        assert_eq!(
            request.headers,
            vec![("X-Custom-Header".to_string(), "custom-value".to_string())]
        );
    }
}
