//! Wire-shaped record types shared between the engine and the provider
//!
//! A write replaces the full record representation at the provider, so
//! `RemoteRecord` carries every provider field and must round-trip anything
//! the engine does not intentionally change. Optional fields serialize as
//! explicit `null` rather than being omitted, matching what the provider
//! returned.

use serde::{Deserialize, Serialize};

/// A DNS record as currently stored at the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecord {
    /// Provider-assigned record id
    pub id: i64,

    /// Record type ("A", "AAAA", "MX", ...)
    #[serde(rename = "type")]
    pub record_type: String,

    /// Record name relative to the domain
    pub name: String,

    /// Record payload; the address text for A/AAAA records
    pub data: String,

    /// Time-to-live in seconds
    pub ttl: u32,

    /// Priority (MX/SRV records), carried through unchanged
    #[serde(default)]
    pub priority: Option<u16>,

    /// Port (SRV records), carried through unchanged
    #[serde(default)]
    pub port: Option<u16>,

    /// Weight (SRV records), carried through unchanged
    #[serde(default)]
    pub weight: Option<u16>,

    /// Flags (CAA records), carried through unchanged
    #[serde(default)]
    pub flags: Option<u8>,

    /// Tag (CAA records), carried through unchanged
    #[serde(default)]
    pub tag: Option<String>,
}

/// One page of remote records plus the link to the next page, if any
#[derive(Debug, Clone, Default)]
pub struct RecordPage {
    /// Records in provider order
    pub records: Vec<RemoteRecord>,

    /// Absolute URL of the next page; `None` on the last page
    pub next: Option<String>,
}
