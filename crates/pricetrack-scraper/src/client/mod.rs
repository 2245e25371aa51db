//! HTTP client shared by the storefront lookups.
//!
//! The adapters themselves live next to the store they talk to
//! ([`crate::reliance`], [`crate::oppo`], [`crate::croma`]) as additional
//! `impl StoreClient` blocks.

mod origin;

use std::time::Duration;

use pricetrack_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::ScraperError;

pub(crate) use origin::extract_domain;

/// Path of the OPPO product-detail endpoint below the gateway base URL.
pub(crate) const OPPO_DETAIL_PATH: &str = "v2/api/rest/mall/product/detail/fetch";

/// HTTP client for storefront pages and store APIs.
///
/// Holds one `reqwest::Client` plus the endpoints of the two fixed APIs, so
/// tests can point them at a mock server.
pub struct StoreClient {
    pub(crate) client: Client,
    pub(crate) oppo_detail_url: Url,
    pub(crate) croma_inventory_url: Url,
    pub(crate) croma_subscription_key: Option<String>,
}

impl StoreClient {
    /// Creates a `StoreClient` against the production OPPO and Croma endpoints.
    ///
    /// `user_agent` is the default `User-Agent`; the OPPO lookup overrides it
    /// per request.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        Self::with_endpoints(
            timeout_secs,
            user_agent,
            pricetrack_core::config::DEFAULT_OPPO_GATEWAY_URL,
            pricetrack_core::config::DEFAULT_CROMA_INVENTORY_URL,
        )
    }

    /// Creates a `StoreClient` with custom API endpoints (for testing with wiremock).
    ///
    /// `oppo_gateway_url` is the gateway origin; the product-detail path is
    /// appended to it. `croma_inventory_url` is used as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if either endpoint does not parse,
    /// or [`ScraperError::Http`] if the client cannot be built.
    pub fn with_endpoints(
        timeout_secs: u64,
        user_agent: &str,
        oppo_gateway_url: &str,
        croma_inventory_url: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            oppo_detail_url: oppo_detail_url(oppo_gateway_url)?,
            croma_inventory_url: parse_endpoint(croma_inventory_url)?,
            croma_subscription_key: None,
        })
    }

    /// Builds a client from the application config, including the Croma
    /// subscription key when one is set.
    ///
    /// # Errors
    ///
    /// See [`Self::with_endpoints`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = Self::with_endpoints(
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            &config.oppo_gateway_url,
            &config.croma_inventory_url,
        )?;
        Ok(match &config.croma_subscription_key {
            Some(key) => client.with_croma_subscription_key(key),
            None => client,
        })
    }

    /// Sets the `oms-apim-subscription-key` sent with Croma inventory checks.
    #[must_use]
    pub fn with_croma_subscription_key(mut self, key: &str) -> Self {
        self.croma_subscription_key = Some(key.to_owned());
        self
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ScraperError> {
    Url::parse(raw).map_err(|e| ScraperError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Joins the product-detail path onto the gateway base, keeping any path
/// prefix the base already carries.
fn oppo_detail_url(gateway: &str) -> Result<Url, ScraperError> {
    let normalised = format!("{}/", gateway.trim_end_matches('/'));
    parse_endpoint(&normalised)?
        .join(OPPO_DETAIL_PATH)
        .map_err(|e| ScraperError::InvalidUrl {
            url: gateway.to_owned(),
            reason: e.to_string(),
        })
}
