// # HTTP IP Probe
//
// Implements `dyndns_core::IpProbe` over plain HTTP GET.
//
// Lookup services (e.g. api.ipify.org) answer with the caller's public IP
// as a bare text body. This crate fetches that body and nothing more —
// trimming, parsing and family validation live in `dyndns_core::discover`.
// One request per lookup, no retrying, no caching.

use async_trait::async_trait;
use dyndns_core::traits::IpProbe;
use dyndns_core::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Timeout for a single lookup request
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based public IP probe
#[derive(Debug)]
pub struct HttpIpProbe {
    client: reqwest::Client,
}

impl HttpIpProbe {
    /// Create a probe with the default timeout
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::ip_lookup(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl IpProbe for HttpIpProbe {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::ip_lookup(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::ip_lookup(format!(
                "{} returned HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::ip_lookup(format!("failed to read response from {}: {}", url, e)))
    }
}
