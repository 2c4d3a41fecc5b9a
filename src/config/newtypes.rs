//! Validated newtype wrappers for configuration values.
//!
//! Values are checked once on construction so that the HTTP layer can use
//! them without re-validating.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A credential value that must never appear in logs.
///
/// `Debug` prints `Secret(*****)`; use [`Secret::expose`] to get the raw
/// value when building a request, and [`Secret::preview`] for operator
/// diagnostics.
///
/// # Example
///
/// ```rust
/// use marketplace_bridge::Secret;
///
/// let secret = Secret::new("Atzr|IwEBIJ-refresh-token", "refresh_token").unwrap();
/// assert_eq!(format!("{secret:?}"), "Secret(*****)");
/// assert_eq!(secret.preview(4), "Atzr...");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a non-empty credential value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] naming `field` when the value
    /// is empty or whitespace.
    pub fn new(value: impl Into<String>, field: &'static str) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyCredential { field });
        }
        Ok(Self(value))
    }

    /// Returns the raw credential.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the first `chars` characters followed by `...`, or the whole
    /// value when it is not longer than `chars`.
    #[must_use]
    pub fn preview(&self, chars: usize) -> String {
        if self.0.chars().count() <= chars {
            return self.0.clone();
        }
        let head: String = self.0.chars().take(chars).collect();
        format!("{head}...")
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(*****)")
    }
}

/// A validated Shopify shop domain.
///
/// Accepts `shop-name` or `shop-name.myshopify.com` and always stores the
/// bare shop name; the full domain is derived.
///
/// # Example
///
/// ```rust
/// use marketplace_bridge::ShopDomain;
///
/// let domain = ShopDomain::new("My-Store").unwrap();
/// assert_eq!(domain.shop_name(), "my-store");
/// assert_eq!(domain.full_domain(), "my-store.myshopify.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopDomain {
    shop_name: String,
}

impl ShopDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Creates a new validated shop domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] if the domain is invalid.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into().trim().to_lowercase();
        let shop_name = domain.strip_suffix(Self::SUFFIX).unwrap_or(&domain);

        let valid = !shop_name.is_empty()
            && !shop_name.starts_with('-')
            && !shop_name.ends_with('-')
            && shop_name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        if !valid {
            return Err(ConfigError::InvalidShopDomain { domain });
        }

        Ok(Self {
            shop_name: shop_name.to_string(),
        })
    }

    /// Returns the shop name, e.g. `my-store`.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.shop_name
    }

    /// Returns the full domain, e.g. `my-store.myshopify.com`.
    #[must_use]
    pub fn full_domain(&self) -> String {
        format!("{}{}", self.shop_name, Self::SUFFIX)
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.shop_name, Self::SUFFIX)
    }
}

impl Serialize for ShopDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full_domain())
    }
}

impl<'de> Deserialize<'de> for ShopDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// An absolute `http`/`https` base URL without a trailing slash.
///
/// Used for endpoint overrides, such as pointing a client at a local mock
/// server.
///
/// ```rust
/// use marketplace_bridge::BaseUrl;
///
/// let url = BaseUrl::new("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(url.as_ref(), "http://127.0.0.1:8080");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Validates and normalizes a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the scheme is not
    /// `http`/`https` or the host is empty.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let host = rest.split(['/', ':', '?', '#']).next().unwrap_or_default();
        if host.is_empty() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_rejects_blank_values() {
        assert!(matches!(
            Secret::new("", "client_secret"),
            Err(ConfigError::EmptyCredential {
                field: "client_secret"
            })
        ));
        assert!(Secret::new("   ", "client_secret").is_err());
    }

    #[test]
    fn test_secret_masks_value_in_debug() {
        let secret = Secret::new("super-secret-key", "client_secret").unwrap();
        let debug_output = format!("{secret:?}");
        assert_eq!(debug_output, "Secret(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_secret_preview() {
        let secret = Secret::new("abcdefghijklmnopqrstuvwxyz", "token").unwrap();
        assert_eq!(secret.preview(15), "abcdefghijklmno...");

        let short = Secret::new("abc", "token").unwrap();
        assert_eq!(short.preview(15), "abc");
    }

    #[test]
    fn test_shop_domain_normalizes_both_formats() {
        let short = ShopDomain::new("my-store").unwrap();
        let full = ShopDomain::new("my-store.myshopify.com").unwrap();
        assert_eq!(short, full);
        assert_eq!(short.full_domain(), "my-store.myshopify.com");
        assert_eq!(short.to_string(), "my-store.myshopify.com");
    }

    #[test]
    fn test_shop_domain_rejects_invalid_domains() {
        assert!(ShopDomain::new("").is_err());
        assert!(ShopDomain::new("my store").is_err());
        assert!(ShopDomain::new("my_store").is_err());
        assert!(ShopDomain::new("-my-store").is_err());
        assert!(ShopDomain::new("my-store-").is_err());
        assert!(ShopDomain::new("my-store.otherdomain.com").is_err());
        assert!(ShopDomain::new("MY-STORE").is_ok());
    }

    #[test]
    fn test_shop_domain_serde() {
        let domain = ShopDomain::new("my-store").unwrap();
        let json = serde_json::to_string(&domain).unwrap();
        assert_eq!(json, r#""my-store.myshopify.com""#);

        let restored: ShopDomain = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, domain);
    }

    #[test]
    fn test_base_url_validation() {
        assert_eq!(
            BaseUrl::new("https://sandbox.sellingpartnerapi-na.amazon.com/")
                .unwrap()
                .as_ref(),
            "https://sandbox.sellingpartnerapi-na.amazon.com"
        );
        assert!(BaseUrl::new("http://localhost:3000").is_ok());
        assert!(BaseUrl::new("ftp://example.com").is_err());
        assert!(BaseUrl::new("example.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
    }
}
