//! Token acquisition errors.

use thiserror::Error;

/// Errors that can occur while obtaining an LWA access token.
///
/// # Example
///
/// ```rust
/// use marketplace_bridge::AuthError;
///
/// let error = AuthError::TokenRequestFailed {
///     status: 400,
///     message: r#"{"error":"invalid_grant"}"#.to_string(),
/// };
/// assert!(error.to_string().contains("400"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A credential field is blank. No request was sent.
    #[error("Missing LWA credential '{field}'")]
    MissingCredential {
        /// The blank field.
        field: &'static str,
    },

    /// The token endpoint answered with a non-success status, or could not
    /// be reached (`status` is 0 for transport failures).
    #[error("Token request failed with status {status}: {message}")]
    TokenRequestFailed {
        /// HTTP status code, or 0 when no response was received.
        status: u16,
        /// Response body or transport error text.
        message: String,
    },

    /// The token endpoint answered 2xx but the body was not a token.
    #[error("Invalid token response: {reason}")]
    InvalidTokenResponse {
        /// What was wrong with the body.
        reason: String,
    },
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
