//! Configuration error types.
//!
//! Every configuration constructor returns `Result<T, ConfigError>` so that
//! a bad environment is reported before any network call is attempted.
//!
//! # Example
//!
//! ```rust
//! use marketplace_bridge::{ConfigError, ShopDomain};
//!
//! let result = ShopDomain::new("not a shop!");
//! assert!(matches!(result, Err(ConfigError::InvalidShopDomain { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("Missing environment variable '{name}'. Set it in the environment or in a .env file.")]
    MissingEnvVar {
        /// The variable name.
        name: &'static str,
    },

    /// A credential value was empty.
    #[error("Credential '{field}' cannot be empty.")]
    EmptyCredential {
        /// The credential field that was empty.
        field: &'static str,
    },

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// Shopify API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2023-10') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Marketplace code or ID is not known.
    #[error("Unknown marketplace '{value}'. Use a country code such as 'US' or 'AU', or a marketplace ID.")]
    UnknownMarketplace {
        /// The value that could not be resolved.
        value: String,
    },

    /// SP-API environment name is invalid.
    #[error("Invalid SP-API environment '{value}'. Expected 'sandbox' or 'production'.")]
    InvalidEnvironment {
        /// The value that was provided.
        value: String,
    },

    /// A required builder field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A base URL override is not an absolute http(s) URL.
    #[error("Invalid base URL '{url}'. Expected an absolute URL such as 'https://example.com'.")]
    InvalidBaseUrl {
        /// The URL that was provided.
        url: String,
    },
}
