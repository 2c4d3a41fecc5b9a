//! Configuration for the Amazon and Shopify clients.
//!
//! Configuration is built once at process start and passed explicitly to
//! client constructors. Each vendor has its own config struct and builder,
//! and a `from_env` constructor reading the variables below (a `.env` file in
//! the working directory is loaded first when present).
//!
//! | variable | required | default |
//! |---|---|---|
//! | `AMAZON_CLIENT_ID` | yes | |
//! | `AMAZON_CLIENT_SECRET` | yes | |
//! | `AMAZON_REFRESH_TOKEN` | yes | |
//! | `AMAZON_MERCHANT_ID` | no | `MERCHANT_ID` |
//! | `AMAZON_SP_API_ENV` | no | `sandbox` |
//! | `SHOPIFY_SHOP_DOMAIN` | yes | |
//! | `SHOPIFY_ACCESS_TOKEN` | yes | |
//! | `SHOPIFY_API_VERSION` | no | `2023-10` |
//!
//! # Example
//!
//! ```rust
//! use marketplace_bridge::{AmazonConfig, LwaCredentials, Marketplace, SpApiEnvironment};
//!
//! let config = AmazonConfig::builder()
//!     .credentials(LwaCredentials::new("amzn1.application-oa2-client.x", "secret", "Atzr|x"))
//!     .environment(SpApiEnvironment::Sandbox)
//!     .marketplace(Marketplace::Australia)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_base_url(), "https://sandbox.sellingpartnerapi-fe.amazon.com");
//! ```

mod newtypes;
mod version;

pub use newtypes::{BaseUrl, Secret, ShopDomain};
pub use version::ApiVersion;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::auth::LwaCredentials;
use crate::error::ConfigError;
use crate::sp_api::Marketplace;

/// Login-with-Amazon token endpoint.
pub const LWA_TOKEN_URL: &str = "https://api.amazon.com/auth/o2/token";

/// Merchant identifier written into feed headers when none is configured.
pub const DEFAULT_MERCHANT_ID: &str = "MERCHANT_ID";

/// Variables that must be present for a full run (both vendors).
pub const REQUIRED_ENV_VARS: [&str; 5] = [
    "AMAZON_CLIENT_ID",
    "AMAZON_CLIENT_SECRET",
    "AMAZON_REFRESH_TOKEN",
    "SHOPIFY_SHOP_DOMAIN",
    "SHOPIFY_ACCESS_TOKEN",
];

/// Which SP-API host family to talk to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpApiEnvironment {
    /// `sandbox.sellingpartnerapi-*.amazon.com`, static fixture responses.
    #[default]
    Sandbox,
    /// `sellingpartnerapi-*.amazon.com`, live seller data.
    Production,
}

impl fmt::Display for SpApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sandbox => f.write_str("sandbox"),
            Self::Production => f.write_str("production"),
        }
    }
}

impl FromStr for SpApiEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvironment {
                value: s.to_string(),
            }),
        }
    }
}

/// Loads `.env` from the working directory if present.
///
/// A missing file is not an error.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingEnvVar { name })
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Amazon SP-API configuration.
#[derive(Clone, Debug)]
pub struct AmazonConfig {
    credentials: LwaCredentials,
    environment: SpApiEnvironment,
    marketplace: Marketplace,
    merchant_id: String,
    token_url: BaseUrl,
    api_base_url: Option<BaseUrl>,
    timeout: Option<Duration>,
}

impl AmazonConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> AmazonConfigBuilder {
        AmazonConfigBuilder::default()
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] for the first missing required
    /// variable, or a parse error for an invalid optional one.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(process_env)
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// See [`AmazonConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let credentials = LwaCredentials::new(
            required(&lookup, "AMAZON_CLIENT_ID")?,
            required(&lookup, "AMAZON_CLIENT_SECRET")?,
            required(&lookup, "AMAZON_REFRESH_TOKEN")?,
        );

        let mut builder = Self::builder().credentials(credentials);
        if let Some(merchant_id) = optional(&lookup, "AMAZON_MERCHANT_ID") {
            builder = builder.merchant_id(merchant_id);
        }
        if let Some(environment) = optional(&lookup, "AMAZON_SP_API_ENV") {
            builder = builder.environment(environment.parse()?);
        }
        builder.build()
    }

    /// Returns the LWA credentials.
    #[must_use]
    pub const fn credentials(&self) -> &LwaCredentials {
        &self.credentials
    }

    /// Returns the SP-API environment.
    #[must_use]
    pub const fn environment(&self) -> SpApiEnvironment {
        self.environment
    }

    /// Returns the default marketplace.
    #[must_use]
    pub const fn marketplace(&self) -> Marketplace {
        self.marketplace
    }

    /// Returns the merchant identifier used in feed headers.
    #[must_use]
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Returns the LWA token endpoint.
    #[must_use]
    pub fn token_url(&self) -> &str {
        self.token_url.as_ref()
    }

    /// Returns the SP-API base URL: the override when set, otherwise the
    /// regional host of the configured marketplace and environment.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        self.api_base_url.as_ref().map_or_else(
            || {
                format!(
                    "https://{}",
                    self.marketplace.region().host(self.environment)
                )
            },
            ToString::to_string,
        )
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns a copy of this configuration targeting another environment.
    #[must_use]
    pub fn with_environment(mut self, environment: SpApiEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Returns a copy of this configuration targeting another marketplace.
    #[must_use]
    pub fn with_marketplace(mut self, marketplace: Marketplace) -> Self {
        self.marketplace = marketplace;
        self
    }
}

/// Builder for [`AmazonConfig`].
///
/// Defaults: sandbox environment, US marketplace, merchant ID
/// `MERCHANT_ID`, the public LWA token endpoint, and no timeout.
#[derive(Debug, Default)]
pub struct AmazonConfigBuilder {
    credentials: Option<LwaCredentials>,
    environment: Option<SpApiEnvironment>,
    marketplace: Option<Marketplace>,
    merchant_id: Option<String>,
    token_url: Option<String>,
    api_base_url: Option<String>,
    timeout: Option<Duration>,
}

impl AmazonConfigBuilder {
    /// Sets the LWA credentials (required).
    #[must_use]
    pub fn credentials(mut self, credentials: LwaCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the SP-API environment.
    #[must_use]
    pub const fn environment(mut self, environment: SpApiEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets the default marketplace.
    #[must_use]
    pub const fn marketplace(mut self, marketplace: Marketplace) -> Self {
        self.marketplace = Some(marketplace);
        self
    }

    /// Sets the merchant identifier used in feed headers.
    #[must_use]
    pub fn merchant_id(mut self, merchant_id: impl Into<String>) -> Self {
        self.merchant_id = Some(merchant_id.into());
        self
    }

    /// Overrides the LWA token endpoint.
    #[must_use]
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Overrides the SP-API base URL.
    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`AmazonConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] without credentials, or
    /// [`ConfigError::InvalidBaseUrl`] for a malformed override.
    pub fn build(self) -> Result<AmazonConfig, ConfigError> {
        let credentials = self.credentials.ok_or(ConfigError::MissingRequiredField {
            field: "credentials",
        })?;
        let token_url = BaseUrl::new(self.token_url.as_deref().unwrap_or(LWA_TOKEN_URL))?;
        let api_base_url = self.api_base_url.map(BaseUrl::new).transpose()?;

        Ok(AmazonConfig {
            credentials,
            environment: self.environment.unwrap_or_default(),
            marketplace: self.marketplace.unwrap_or_default(),
            merchant_id: self
                .merchant_id
                .unwrap_or_else(|| DEFAULT_MERCHANT_ID.to_string()),
            token_url,
            api_base_url,
            timeout: self.timeout,
        })
    }
}

/// Shopify Admin API configuration.
#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    shop: ShopDomain,
    access_token: Secret,
    api_version: ApiVersion,
    base_url: Option<BaseUrl>,
    timeout: Option<Duration>,
}

impl ShopifyConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::default()
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] for a missing required
    /// variable, or a validation error for a malformed value.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(process_env)
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ShopifyConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let shop = ShopDomain::new(required(&lookup, "SHOPIFY_SHOP_DOMAIN")?)?;
        let access_token = Secret::new(
            required(&lookup, "SHOPIFY_ACCESS_TOKEN")?,
            "SHOPIFY_ACCESS_TOKEN",
        )?;

        let mut builder = Self::builder().shop(shop).access_token(access_token);
        if let Some(version) = optional(&lookup, "SHOPIFY_API_VERSION") {
            builder = builder.api_version(version.parse()?);
        }
        builder.build()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the Admin API access token.
    #[must_use]
    pub const fn access_token(&self) -> &Secret {
        &self.access_token
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the Admin REST base URL,
    /// `https://{shop}.myshopify.com/admin/api/{version}` unless overridden.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        let host = self
            .base_url
            .as_ref()
            .map_or_else(|| format!("https://{}", self.shop), ToString::to_string);
        format!("{host}/admin/api/{}", self.api_version)
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for [`ShopifyConfig`].
#[derive(Debug, Default)]
pub struct ShopifyConfigBuilder {
    shop: Option<ShopDomain>,
    access_token: Option<Secret>,
    api_version: Option<ApiVersion>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ShopifyConfigBuilder {
    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the Admin API access token (required).
    #[must_use]
    pub fn access_token(mut self, token: Secret) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Overrides the scheme and host, keeping the `/admin/api/{version}` path.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ShopifyConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] when `shop` or
    /// `access_token` is not set.
    pub fn build(self) -> Result<ShopifyConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;
        let access_token = self.access_token.ok_or(ConfigError::MissingRequiredField {
            field: "access_token",
        })?;
        let base_url = self.base_url.map(BaseUrl::new).transpose()?;

        Ok(ShopifyConfig {
            shop,
            access_token,
            api_version: self.api_version.unwrap_or_default(),
            base_url,
            timeout: self.timeout,
        })
    }
}

/// Both vendors' configuration, for commands that talk to both.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Amazon SP-API settings.
    pub amazon: AmazonConfig,
    /// Shopify Admin API settings.
    pub shopify: ShopifyConfig,
}

impl AppConfig {
    /// Reads both configurations from the process environment.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(process_env)
    }

    /// Reads both configurations through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            amazon: AmazonConfig::from_lookup(&lookup)?,
            shopify: ShopifyConfig::from_lookup(&lookup)?,
        })
    }
}
