//! Downloading `objects.inv` files.

use crate::error::{Result, RtfmError};
use std::time::Duration;
use url::Url;

/// Name of the inventory file published at the root of a Sphinx site.
pub const INVENTORY_FILE: &str = "objects.inv";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for fetching inventories.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
}

impl InventoryClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Build a client with the given timeout and user agent.
    pub fn with_settings(timeout: Duration, user_agent: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self::new(http))
    }

    /// The URL of the inventory for a directory-style base URL.
    pub fn inventory_url(base_url: &Url) -> Result<Url> {
        Ok(base_url.join(INVENTORY_FILE)?)
    }

    /// Fetch the raw inventory bytes for a site.
    ///
    /// Any non-2xx status is a [`RtfmError::Fetch`].
    pub async fn fetch(&self, base_url: &Url) -> Result<Vec<u8>> {
        let url = Self::inventory_url(base_url)?;
        tracing::debug!("Fetching inventory from {}", url);

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Inventory request to {} returned {}", url, status);
            return Err(RtfmError::Fetch(format!("{} returned {}", url, status)));
        }

        let bytes = response.bytes().await?;
        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

impl Default for InventoryClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}
