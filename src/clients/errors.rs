//! Error types for the authenticated HTTP clients.
//!
//! Every request returns `Result<_, ApiError>`. The variants keep the four
//! failure classes apart so that callers can tell a bad configuration from
//! a dead network, a rejected request or an unreadable body:
//!
//! - [`ApiError::Config`] / [`ApiError::Auth`]: detected before the API call
//! - [`ApiError::InvalidRequest`]: the request descriptor failed validation
//! - [`ApiError::Transport`]: connection failure or timeout
//! - [`ApiError::Status`]: non-2xx response
//! - [`ApiError::Decode`]: 2xx response whose body is not the expected JSON
//!
//! # Example
//!
//! ```rust,ignore
//! use marketplace_bridge::ApiError;
//!
//! match client.request(&request).await {
//!     Ok(body) => println!("{body:#}"),
//!     Err(ApiError::Status { code, request_id, .. }) => {
//!         println!("HTTP {code} (request id {request_id:?})");
//!     }
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::AuthError;
use crate::error::ConfigError;

/// Error returned when a request descriptor fails validation.
///
/// Raised before anything is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// A GET request was given a body.
    #[error("Cannot send a body with {method}.")]
    BodyNotAllowed {
        /// The HTTP method.
        method: String,
    },

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The path is not absolute.
    #[error("Request path '{path}' must start with '/'.")]
    InvalidPath {
        /// The offending path.
        path: String,
    },
}

/// Unified error type for the client boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The access token could not be obtained. No API call was made.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("HTTP {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Raw response body.
        body: String,
        /// `x-amzn-RequestId` / `x-request-id`, when present.
        request_id: Option<String>,
    },

    /// The body could not be decoded as the expected JSON.
    #[error("Failed to decode response: {reason}")]
    Decode {
        /// Parser message or description of the missing field.
        reason: String,
    },
}

impl ApiError {
    /// Returns the HTTP status for [`ApiError::Status`].
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Short label for diagnostics tables.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Auth(_) => "auth",
            Self::InvalidRequest(_) => "invalid request",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
        }
    }
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
