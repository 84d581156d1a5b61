// # DigitalOcean Record Transport
//
// Implements `dyndns_core::RecordApi` against the DigitalOcean API v2.
//
// This crate owns transport only: bearer authentication, URL construction,
// the `domain_records`/`links.pages.next` envelope, and HTTP status
// mapping. Whether a record needs updating is decided in `dyndns-core`;
// this crate performs exactly the calls it is asked to, once each, with no
// retrying and no caching between calls.
//
// ## API Reference
//
// - List records: GET `/v2/domains/:domain/records[?per_page=n]`
// - Update record: PUT `/v2/domains/:domain/records/:id` with the full
//   record object as the body (the provider replaces the representation)
//
// ## Security
//
// The API token never appears in logs or `Debug` output.

use async_trait::async_trait;
use dyndns_core::record::{RecordPage, RemoteRecord};
use dyndns_core::traits::RecordApi;
use dyndns_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// DigitalOcean API base URL
const DIGITALOCEAN_API_BASE: &str = "https://api.digitalocean.com/v2";

/// Timeout applied to every API request
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// DigitalOcean DNS record transport
pub struct DigitalOceanApi {
    /// API token; never logged
    api_key: String,

    /// Base URL, overridable for tests
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for DigitalOceanApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalOceanApi")
            .field("api_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DigitalOceanApi {
    /// Create a new transport for the given API token
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::config("DigitalOcean API token must not be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::provider("digitalocean", format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: DIGITALOCEAN_API_BASE.to_string(),
            client,
        })
    }

    /// Point the transport at a different base URL (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn records_url(&self, domain: &str, per_page: Option<u32>) -> String {
        let mut url = format!("{}/domains/{}/records", self.base_url, domain);
        if let Some(per_page) = per_page {
            url.push_str(&format!("?per_page={}", per_page));
        }
        url
    }

    async fn get_page(&self, url: &str) -> Result<RecordPage> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::provider("digitalocean", format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response".to_string());
            return Err(map_error(status, url, body));
        }

        let envelope: RecordListResponse = response
            .json()
            .await
            .map_err(|e| Error::provider("digitalocean", format!("failed to parse response: {}", e)))?;
        Ok(envelope.into_page())
    }
}

#[async_trait]
impl RecordApi for DigitalOceanApi {
    async fn list_records(&self, domain: &str, per_page: Option<u32>) -> Result<RecordPage> {
        self.get_page(&self.records_url(domain, per_page)).await
    }

    async fn fetch_page(&self, page_url: &str) -> Result<RecordPage> {
        self.get_page(page_url).await
    }

    async fn update_record(&self, domain: &str, record: &RemoteRecord) -> Result<String> {
        let url = format!("{}/domains/{}/records/{}", self.base_url, domain, record.id);
        debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_key)
            .json(record)
            .send()
            .await
            .map_err(|e| Error::provider("digitalocean", format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read response".to_string());
        if !status.is_success() {
            return Err(map_error(status, &url, body));
        }
        Ok(body)
    }
}

/// Map an unsuccessful HTTP status to an error
fn map_error(status: reqwest::StatusCode, url: &str, body: String) -> Error {
    match status.as_u16() {
        401 | 403 => Error::provider(
            "digitalocean",
            format!("authentication failed (status {}): check the API token", status),
        ),
        404 => Error::not_found(format!("{} (status 404)", url)),
        429 => Error::provider(
            "digitalocean",
            format!("rate limit exceeded (status {}): {}", status, body),
        ),
        500..=599 => Error::provider(
            "digitalocean",
            format!("server error (status {}): {}", status, body),
        ),
        _ => Error::provider(
            "digitalocean",
            format!("request failed (status {}): {}", status, body),
        ),
    }
}

/// Record listing envelope
#[derive(Debug, Deserialize)]
struct RecordListResponse {
    domain_records: Vec<RemoteRecord>,
    #[serde(default)]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    #[serde(default)]
    pages: Pages,
}

#[derive(Debug, Default, Deserialize)]
struct Pages {
    #[serde(default)]
    next: Option<String>,
}

impl RecordListResponse {
    fn into_page(self) -> RecordPage {
        RecordPage {
            records: self.domain_records,
            // the last page carries no link; an empty one means the same
            next: self.links.pages.next.filter(|url| !url.is_empty()),
        }
    }
}
