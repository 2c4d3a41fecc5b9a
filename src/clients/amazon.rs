//! SP-API client with a lazily acquired LWA token.

use crate::auth::{LwaCredentials, LwaTokenProvider, Token};
use crate::clients::errors::ApiError;
use crate::clients::http_client::{build_transport, HttpClient, VendorProfile};
use crate::clients::http_request::ApiRequest;
use crate::clients::http_response::ApiResponse;
use crate::config::{AmazonConfig, SpApiEnvironment};
use crate::sp_api::Marketplace;

/// Authenticated Selling Partner API client.
///
/// The first request without a cached token calls the
/// [`LwaTokenProvider`] once; the token is then reused for every later
/// request of the run. It is never refreshed. When acquisition fails the
/// request fails with [`ApiError::Auth`] and nothing is sent to the API.
///
/// Requests take `&mut self` because the token is cached in place; calls are
/// issued one after the other.
///
/// # Example
///
/// ```rust,ignore
/// use marketplace_bridge::{AmazonClient, AmazonConfig};
///
/// let mut client = AmazonClient::new(&AmazonConfig::from_env()?)?;
/// let participations = client.marketplace_participations().await?;
/// ```
#[derive(Debug)]
pub struct AmazonClient {
    http: HttpClient,
    token_provider: LwaTokenProvider,
    credentials: LwaCredentials,
    token: Option<Token>,
    environment: SpApiEnvironment,
    marketplace: Marketplace,
    merchant_id: String,
}

// Verify AmazonClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AmazonClient>();
};

impl AmazonClient {
    /// Creates a client from configuration. No network traffic happens here.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP transport cannot be built.
    pub fn new(config: &AmazonConfig) -> Result<Self, ApiError> {
        let transport = build_transport(config.timeout())?;
        let http = HttpClient::with_client(
            transport.clone(),
            VendorProfile::amazon(config.api_base_url()),
        );
        let token_provider = LwaTokenProvider::with_client(transport, config.token_url());

        Ok(Self {
            http,
            token_provider,
            credentials: config.credentials().clone(),
            token: None,
            environment: config.environment(),
            marketplace: config.marketplace(),
            merchant_id: config.merchant_id().to_string(),
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub(crate) const fn http(&self) -> &HttpClient {
        &self.http
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

    /// Returns the cached token, if one has been acquired.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Acquires the token now unless one is already cached.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] if the token provider fails.
    pub async fn authenticate(&mut self) -> Result<&Token, ApiError> {
        let token = match self.token.take() {
            Some(token) => token,
            None => self.token_provider.fetch_token(&self.credentials).await?,
        };
        Ok(self.token.insert(token))
    }

    /// Sends `request` and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// [`ApiError::Auth`] when no token can be obtained, otherwise the
    /// errors of [`HttpClient::send`].
    pub async fn request(&mut self, request: &ApiRequest) -> Result<serde_json::Value, ApiError> {
        Ok(self.send(request).await?.body)
    }

    /// Sends `request` and returns the full response.
    ///
    /// # Errors
    ///
    /// See [`AmazonClient::request`].
    pub async fn send(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        request.verify()?;
        let access_token = self.authenticate().await?.access_token.clone();
        self.http.send(request, &access_token).await
    }
}
