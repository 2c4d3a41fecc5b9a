//! Authenticated HTTP clients for Amazon SP-API and Shopify.
//!
//! Both vendors share one HTTP core, [`HttpClient`], parameterized by a
//! [`VendorProfile`] capability table (base URL plus [`AuthScheme`]). The
//! vendor clients wrap it:
//!
//! - [`AmazonClient`]: SP-API, LWA bearer token fetched lazily once
//! - [`ShopifyClient`]: Admin REST API, static access token
//!
//! A request is described by an [`ApiRequest`] and answered with the decoded
//! JSON body or an [`ApiError`]. One attempt per request: no retries, no
//! pagination following, and a 429 is an ordinary [`ApiError::Status`].
//!
//! # Example
//!
//! ```rust,ignore
//! use marketplace_bridge::clients::{ApiRequest, ShopifyClient};
//!
//! let client = ShopifyClient::new(&config)?;
//! let request = ApiRequest::get("/orders.json")
//!     .query_param("limit", "5")
//!     .query_param("status", "any")
//!     .build()?;
//!
//! let orders = client.request(&request).await?;
//! ```

mod amazon;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod shopify;

pub use amazon::AmazonClient;
pub use errors::{ApiError, InvalidRequestError};
pub use http_client::{build_transport, AuthScheme, HttpClient, VendorProfile, CRATE_VERSION};
pub use http_request::{ApiRequest, ApiRequestBuilder, HttpMethod};
pub use http_response::ApiResponse;
pub use shopify::ShopifyClient;
