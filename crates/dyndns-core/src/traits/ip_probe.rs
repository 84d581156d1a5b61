// # IP Probe Trait
//
// A lookup endpoint answers a GET with the caller's public IP address as a
// plain-text body (no JSON envelope). The probe owns only the transport;
// trimming, parsing and family validation belong to the discovery policy in
// `crate::discover`.

use async_trait::async_trait;

/// Trait for fetching the body of a public-IP lookup endpoint
///
/// Implementations must be thread-safe. A single failed lookup is final for
/// the run; no retrying inside the implementation.
#[async_trait]
pub trait IpProbe: Send + Sync {
    /// Fetch the response body of `url`
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: the raw body, untrimmed
    /// - `Err(Error)`: transport failure or non-success status
    async fn fetch(&self, url: &str) -> Result<String, crate::Error>;
}
