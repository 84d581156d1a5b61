// # dyndns-core
//
// Core library for the dyndns record updater.
//
// Each run is stateless: discover the caller's current public IPv4/IPv6
// addresses, fetch the provider's record set for every configured domain,
// decide which records actually need to change, and write only those.
//
// ## Architecture Overview
//
// - **IpProbe**: trait for fetching a plain-text IP from a lookup endpoint
// - **RecordApi**: trait for the provider's list/update record endpoints
// - **discover**: dual-stack IP discovery policy
// - **fetch**: paginated remote record aggregation
// - **reconcile**: pure decision logic (the only part with real edge cases)
// - **apply**: builds the full write payload for one decision
// - **run**: per-run orchestration across domains
//
// ## Design Principles
//
// 1. **Transport at the seams**: all HTTP lives behind `IpProbe`/`RecordApi`,
//    so every decision path is unit-testable without a network.
// 2. **Idempotency**: a write is only issued when the record would actually
//    change; re-running against an unchanged snapshot is a no-op.
// 3. **Severity at the caller**: per-record problems are skips, per-domain
//    problems abort only that domain, and only a run with no usable address
//    at all is fatal.

pub mod apply;
pub mod config;
pub mod discover;
pub mod error;
pub mod fetch;
pub mod reconcile;
pub mod record;
pub mod run;
pub mod traits;

// Re-export core types for convenience
pub use config::{Config, DesiredRecord, DomainConfig};
pub use discover::{ResolvedAddresses, discover};
pub use error::{Error, Result};
pub use fetch::fetch_all;
pub use reconcile::{MutationDecision, ReconcileOutcome, reconcile};
pub use record::{RecordPage, RemoteRecord};
pub use run::{DomainReport, RunSummary, run};
pub use traits::{IpProbe, RecordApi};
