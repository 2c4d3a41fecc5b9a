//! Login-with-Amazon authentication for the Selling Partner API.
//!
//! SP-API calls carry a short-lived bearer token obtained by exchanging a
//! long-lived refresh token at the LWA token endpoint. This module provides:
//!
//! - [`LwaCredentials`]: the `client_id` / `client_secret` / `refresh_token`
//!   triple
//! - [`Token`]: the access token returned by LWA
//! - [`LwaTokenProvider`]: performs the `refresh_token` grant
//! - [`AuthError`]: failures during token acquisition
//!
//! Tokens are not refreshed automatically. A client fetches one token and
//! reuses it for the rest of the run.
//!
//! # Example
//!
//! ```rust,ignore
//! use marketplace_bridge::{LwaCredentials, LwaTokenProvider};
//!
//! let credentials = LwaCredentials::new(client_id, client_secret, refresh_token);
//! let provider = LwaTokenProvider::default();
//!
//! let token = provider.fetch_token(&credentials).await?;
//! println!("token valid for {}s", token.expires_in);
//! ```

mod credentials;
mod error;
mod lwa;
mod token;

pub use credentials::LwaCredentials;
pub use error::AuthError;
pub use lwa::LwaTokenProvider;
pub use token::Token;
