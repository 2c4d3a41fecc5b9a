//! # Marketplace Bridge
//!
//! Connects a Shopify store to Amazon Seller Central through the Selling
//! Partner API (SP-API): authenticated clients for both vendors, request
//! helpers for the SP-API resources a listing workflow touches, and an XML
//! feed assembler that turns a Shopify product into Amazon product,
//! inventory and price feeds.
//!
//! ## Overview
//!
//! - Type-safe configuration via [`AmazonConfig`] and [`ShopifyConfig`],
//!   built by hand or from the environment (`.env` supported)
//! - Login-with-Amazon token acquisition via [`LwaTokenProvider`]
//! - [`AmazonClient`] with a lazily fetched, cached access token
//! - [`ShopifyClient`] using a static Admin API access token
//! - SP-API helpers in [`sp_api`] and Shopify resources in [`shopify`]
//! - Product, inventory and price feeds in [`feeds`]
//! - The `mpbridge` command-line driver in [`cli`]
//!
//! ## Quick Start
//!
//! ```rust
//! use marketplace_bridge::{AmazonConfig, LwaCredentials, Marketplace, SpApiEnvironment};
//!
//! let config = AmazonConfig::builder()
//!     .credentials(LwaCredentials::new("client-id", "client-secret", "Atzr|refresh"))
//!     .marketplace(Marketplace::Australia)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.environment(), SpApiEnvironment::Sandbox);
//! assert_eq!(
//!     config.api_base_url(),
//!     "https://sandbox.sellingpartnerapi-fe.amazon.com"
//! );
//! ```
//!
//! ## Calling SP-API
//!
//! ```rust,ignore
//! use marketplace_bridge::{AmazonClient, AppConfig};
//!
//! let config = AppConfig::from_env()?;
//! let mut amazon = AmazonClient::new(&config.amazon)?;
//!
//! // The first request fetches the token; later ones reuse it.
//! let item = amazon
//!     .get_catalog_item("B08N5WRWNW", amazon.marketplace(), &["summaries"])
//!     .await?;
//! ```
//!
//! ## Building Feeds
//!
//! ```rust
//! use marketplace_bridge::feeds::{build_product_feed, ProductListing};
//!
//! let listing = ProductListing::new("BSH-A950S01", "Bosch Aerotwin A950S", "Bosch");
//! let xml = build_product_feed("MERCHANT_ID", &listing).unwrap();
//!
//! assert!(xml.contains("<SKU>BSH-A950S01</SKU>"));
//! ```
//!
//! ## Errors
//!
//! Each layer has its own `thiserror` enum: [`ConfigError`] for
//! configuration, [`AuthError`] for token acquisition, [`ApiError`] at the
//! client boundary (wrapping the other two), [`feeds::FeedError`] and
//! [`artifacts::ArtifactError`]. Nothing is retried.
//!
//! ## Logging
//!
//! The library logs through `tracing`: `debug` per request, `warn` on
//! failures, `info` when a token is acquired. The binary installs a
//! `tracing-subscriber` filtered by `RUST_LOG`.

pub mod artifacts;
pub mod auth;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod feeds;
pub mod shopify;
pub mod sp_api;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, LwaCredentials, LwaTokenProvider, Token};
pub use config::{
    AmazonConfig, AmazonConfigBuilder, ApiVersion, AppConfig, BaseUrl, Secret, ShopDomain,
    ShopifyConfig, ShopifyConfigBuilder, SpApiEnvironment,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{AmazonClient, ApiError, ApiRequest, ApiResponse, HttpMethod, ShopifyClient};

pub use sp_api::{Marketplace, Region};
