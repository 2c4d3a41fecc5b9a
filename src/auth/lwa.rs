//! Refresh-token grant against the LWA token endpoint.

use crate::auth::{AuthError, LwaCredentials, Token};
use crate::config::LWA_TOKEN_URL;

/// Grant type for refresh token requests.
const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Exchanges an LWA refresh token for an access token.
///
/// Each call to [`fetch_token`](Self::fetch_token) sends exactly one request;
/// there is no caching, retry or backoff. Callers that need the token more
/// than once hold on to the returned [`Token`].
#[derive(Clone, Debug)]
pub struct LwaTokenProvider {
    client: reqwest::Client,
    token_url: String,
}

// Verify LwaTokenProvider is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LwaTokenProvider>();
};

impl Default for LwaTokenProvider {
    fn default() -> Self {
        Self::new(LWA_TOKEN_URL)
    }
}

impl LwaTokenProvider {
    /// Creates a provider posting to `token_url`.
    #[must_use]
    pub fn new(token_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), token_url)
    }

    /// Creates a provider sharing an existing transport.
    #[must_use]
    pub fn with_client(client: reqwest::Client, token_url: impl Into<String>) -> Self {
        Self {
            client,
            token_url: token_url.into(),
        }
    }

    /// Returns the token endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Performs the `refresh_token` grant.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredential`] if any credential is blank; no
    ///   request is sent in that case
    /// - [`AuthError::TokenRequestFailed`] on a non-2xx status or a transport
    ///   failure (status 0)
    /// - [`AuthError::InvalidTokenResponse`] if the body is not a token
    pub async fn fetch_token(&self, credentials: &LwaCredentials) -> Result<Token, AuthError> {
        credentials.validate()?;

        let form = [
            ("grant_type", REFRESH_TOKEN_GRANT_TYPE),
            ("refresh_token", credentials.refresh_token()),
            ("client_id", credentials.client_id()),
            ("client_secret", credentials.client_secret()),
        ];

        tracing::debug!("Requesting LWA access token from {}", self.token_url);

        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("LWA token request failed: {e}");
                AuthError::TokenRequestFailed {
                    status: 0,
                    message: format!("Network error: {e}"),
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::warn!("LWA token endpoint returned {}", status.as_u16());
            return Err(AuthError::TokenRequestFailed {
                status: status.as_u16(),
                message: body,
            });
        }

        let token: Token =
            serde_json::from_str(&body).map_err(|e| AuthError::InvalidTokenResponse {
                reason: e.to_string(),
            })?;

        if token.access_token.is_empty() {
            return Err(AuthError::InvalidTokenResponse {
                reason: "empty access_token".to_string(),
            });
        }

        tracing::info!(
            token_type = %token.token_type,
            expires_in = token.expires_in,
            "Obtained LWA access token"
        );

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_amazon() {
        let provider = LwaTokenProvider::default();
        assert_eq!(provider.token_url(), "https://api.amazon.com/auth/o2/token");
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_sending() {
        // Port 9 (discard) is never contacted because validation fails first.
        let provider = LwaTokenProvider::new("http://127.0.0.1:9/auth/o2/token");
        let credentials = LwaCredentials::new("id", "secret", "");

        let result = provider.fetch_token(&credentials).await;
        assert_eq!(
            result.unwrap_err(),
            AuthError::MissingCredential {
                field: "refresh_token"
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_status_zero() {
        let provider = LwaTokenProvider::new("http://127.0.0.1:1/auth/o2/token");
        let credentials = LwaCredentials::new("id", "secret", "refresh");

        let result = provider.fetch_token(&credentials).await;
        assert!(matches!(
            result,
            Err(AuthError::TokenRequestFailed { status: 0, .. })
        ));
    }
}
