//! LWA access token.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

// Upper bound for `expires_at` arithmetic, ten years.
const MAX_LIFETIME_SECS: i64 = 10 * 365 * 24 * 3600;

const fn default_expires_in() -> u64 {
    3600
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// A short-lived SP-API access token.
///
/// Deserialized from the LWA token response. `obtained_at` is stamped
/// locally when the response is parsed. The token is sent verbatim as both
/// the bearer value and the `x-amz-access-token` header.
#[derive(Clone, Deserialize)]
pub struct Token {
    /// The bearer token value.
    pub access_token: String,

    /// Lifetime in seconds, 3600 when the response omits it.
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,

    /// Token type, `bearer` when the response omits it.
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// When the token was received.
    #[serde(skip, default = "Utc::now")]
    pub obtained_at: DateTime<Utc>,
}

impl Token {
    /// Creates a token obtained now.
    #[must_use]
    pub fn new(access_token: impl Into<String>, expires_in: u64) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in,
            token_type: default_token_type(),
            obtained_at: Utc::now(),
        }
    }

    /// Returns when the token stops being accepted.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        let lifetime = i64::try_from(self.expires_in)
            .unwrap_or(MAX_LIFETIME_SECS)
            .min(MAX_LIFETIME_SECS);
        self.obtained_at + Duration::seconds(lifetime)
    }

    /// Returns `true` once the lifetime has elapsed.
    ///
    /// Informational only; clients never refresh on their own.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"*****")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_response() {
        let token: Token = serde_json::from_str(
            r#"{
                "access_token": "Atza|abc",
                "refresh_token": "Atzr|xyz",
                "token_type": "bearer",
                "expires_in": 1800
            }"#,
        )
        .unwrap();

        assert_eq!(token.access_token, "Atza|abc");
        assert_eq!(token.expires_in, 1800);
        assert_eq!(token.token_type, "bearer");
        assert!(!token.is_expired());
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let token: Token = serde_json::from_str(r#"{"access_token": "Atza|abc"}"#).unwrap();
        assert_eq!(token.expires_in, 3600);
        assert_eq!(token.token_type, "bearer");
    }

    #[test]
    fn test_deserialize_requires_access_token() {
        let result: Result<Token, _> = serde_json::from_str(r#"{"expires_in": 3600}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_expiry() {
        let mut token = Token::new("Atza|abc", 60);
        assert_eq!(token.expires_at(), token.obtained_at + Duration::seconds(60));
        assert!(!token.is_expired());

        token.obtained_at = Utc::now() - Duration::seconds(120);
        assert!(token.is_expired());
    }

    #[test]
    fn test_debug_masks_access_token() {
        let token = Token::new("Atza|very-secret", 3600);
        assert!(!format!("{token:?}").contains("very-secret"));
    }
}
