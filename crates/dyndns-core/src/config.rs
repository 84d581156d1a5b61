//! Configuration types for the dyndns updater
//!
//! The configuration file is a single JSON document with camelCase keys:
//!
//! ```json
//! {
//!   "apiKey": "do_token",
//!   "pageSize": 100,
//!   "useIpv6": false,
//!   "allowIpv4InIpv6": false,
//!   "domains": [
//!     {
//!       "domain": "example.com",
//!       "records": [
//!         { "type": "A", "name": "home", "ttl": 300 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Every component takes the parts of this it needs as an explicit argument;
//! there is no global configuration state.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Provider API token
    pub api_key: String,

    /// Records per page when listing remote records. `None` or the provider
    /// default (20) sends no parameter; larger values are clamped to the
    /// provider maximum when the request is built.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Whether to discover an IPv4 address (default: true)
    #[serde(default)]
    pub use_ipv4: Option<bool>,

    /// Whether to discover an IPv6 address (default: true)
    #[serde(default)]
    pub use_ipv6: Option<bool>,

    /// Override for the IPv4 lookup endpoint
    #[serde(default)]
    pub ipv4_check_url: Option<String>,

    /// Override for the IPv6 lookup endpoint
    #[serde(default)]
    pub ipv6_check_url: Option<String>,

    /// When no IPv6 address is available, allow AAAA records to be written
    /// with the IPv4 address in v4-mapped IPv6 form
    #[serde(default)]
    pub allow_ipv4_in_ipv6: bool,

    /// Domains to reconcile, processed independently and in order
    pub domains: Vec<DomainConfig>,
}

impl Config {
    /// Load and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::config("apiKey must not be empty"));
        }
        if self.domains.is_empty() {
            return Err(Error::config("no domains configured"));
        }
        for domain in &self.domains {
            if domain.domain.is_empty() {
                return Err(Error::config("domain name must not be empty"));
            }
            if domain.records.is_empty() {
                return Err(Error::config(format!(
                    "domain {} has no records configured",
                    domain.domain
                )));
            }
        }
        Ok(())
    }
}

/// One domain and the records to keep pointed at the current address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Domain name as registered at the provider
    pub domain: String,

    /// Desired records, reconciled in configuration order
    pub records: Vec<DesiredRecord>,
}

/// Operator intent for one named record
///
/// The record type is kept as a free string on purpose: unsupported types
/// must reach the engine's type gate and produce a warning there instead of
/// failing deserialization for the whole file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesiredRecord {
    /// Provider record id for a future direct-update path. Setting this is
    /// currently rejected per record at reconcile time.
    #[serde(default)]
    pub id: Option<i64>,

    /// Record type ("A" or "AAAA")
    #[serde(rename = "type")]
    pub record_type: String,

    /// Record name (e.g. "home", "www", "@")
    pub name: String,

    /// Desired TTL in seconds. Values below 30 mean "do not manage the TTL".
    #[serde(default)]
    pub ttl: u32,
}
