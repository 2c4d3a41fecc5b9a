//! LWA credential triple.

use std::fmt;

use crate::auth::AuthError;

/// Refresh-grant credentials for Login with Amazon.
///
/// The triple is stored as given; [`LwaCredentials::validate`] is called by
/// the token provider before any network traffic so that an incomplete set
/// fails fast. `Debug` output masks the secret and refresh token.
///
/// # Example
///
/// ```rust
/// use marketplace_bridge::LwaCredentials;
///
/// let credentials = LwaCredentials::new("amzn1.application-oa2-client.x", "", "Atzr|x");
/// assert!(credentials.validate().is_err());
/// assert!(!format!("{credentials:?}").contains("Atzr|x"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LwaCredentials {
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

impl LwaCredentials {
    /// Creates a credential set.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Returns the LWA application client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the LWA client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the seller's refresh token.
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Checks that every field is non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredential`] naming the first blank field.
    pub fn validate(&self) -> Result<(), AuthError> {
        let fields = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("refresh_token", &self.refresh_token),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(AuthError::MissingCredential { field: *field }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for LwaCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LwaCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"*****")
            .field("refresh_token", &"*****")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_complete_triple() {
        let credentials = LwaCredentials::new("id", "secret", "refresh");
        assert!(credentials.validate().is_ok());
    }

    #[test]
    fn test_validate_names_first_missing_field() {
        let cases = [
            (LwaCredentials::new("", "secret", "refresh"), "client_id"),
            (LwaCredentials::new("id", " ", "refresh"), "client_secret"),
            (LwaCredentials::new("id", "secret", ""), "refresh_token"),
            (LwaCredentials::new("", "", ""), "client_id"),
        ];
        for (credentials, expected) in cases {
            assert!(matches!(
                credentials.validate(),
                Err(AuthError::MissingCredential { field }) if field == expected
            ));
        }
    }

    #[test]
    fn test_debug_masks_secrets() {
        let credentials = LwaCredentials::new("my-client", "top-secret", "Atzr|refresh");
        let debug_output = format!("{credentials:?}");
        assert!(debug_output.contains("my-client"));
        assert!(!debug_output.contains("top-secret"));
        assert!(!debug_output.contains("Atzr|refresh"));
    }
}
