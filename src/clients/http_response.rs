//! Response wrapper.

use std::collections::HashMap;

/// Header names carrying a request identifier, most specific first.
const REQUEST_ID_HEADERS: [&str; 3] = ["x-amzn-requestid", "x-amz-rid", "x-request-id"];

/// A decoded 2xx response.
///
/// Most callers only need `body`; status and headers are kept for
/// diagnostics (request IDs, rate-limit hints).
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// HTTP status code.
    pub code: u16,
    /// Response headers, lower-cased names, all values kept.
    pub headers: HashMap<String, Vec<String>>,
    /// Decoded JSON body.
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Creates a response.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for 2xx codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of header `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the vendor request ID, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        request_id_from(&self.headers)
    }

    /// Returns SP-API's `x-amzn-RateLimit-Limit`, requests per second.
    #[must_use]
    pub fn rate_limit(&self) -> Option<f64> {
        self.header("x-amzn-ratelimit-limit")
            .and_then(|value| value.trim().parse().ok())
    }
}

pub(crate) fn request_id_from(headers: &HashMap<String, Vec<String>>) -> Option<&str> {
    REQUEST_ID_HEADERS
        .iter()
        .find_map(|name| headers.get(*name).and_then(|values| values.first()))
        .map(String::as_str)
}
