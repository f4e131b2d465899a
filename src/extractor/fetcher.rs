//! HTTP page capture: fetch a URL and hand the body to the extractor.

use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use crate::domain::PageSnapshot;
use crate::error::{AuditError, Result};
use crate::extractor::page_extractor::PageExtractor;

const FETCH_TIMEOUT_SECS: u64 = 20;
const USER_AGENT: &str = concat!("siteaudit/", env!("CARGO_PKG_VERSION"));

/// Fetches pages over HTTP(S) and turns them into snapshots.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AuditError::service("http", e.to_string()))?;
        Ok(Self { client })
    }

    /// Downloads `url` and captures a snapshot of the served HTML.
    pub async fn capture(&self, url: &str) -> Result<PageSnapshot> {
        let parsed = Url::parse(url).map_err(|e| AuditError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AuditError::InvalidUrl(format!("unsupported scheme: {}", url)));
        }

        info!("[FETCH] Downloading: {}", url);
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| AuditError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::network(format!("{} returned HTTP {}", url, status)));
        }

        let html = response.text().await.map_err(|e| AuditError::network(e.to_string()))?;
        debug!("[FETCH] Received {} bytes from {}", html.len(), url);

        Ok(PageExtractor::extract(url, &html))
    }
}
