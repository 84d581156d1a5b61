//! Run orchestration
//!
//! One run: discover addresses once, then reconcile each configured domain
//! sequentially and independently. A domain whose record fetch fails is
//! skipped with a warning; the other domains still get their turn. The only
//! state shared between domains is the read-only address set.

use crate::apply::apply;
use crate::config::{Config, DomainConfig};
use crate::discover::{ResolvedAddresses, discover};
use crate::error::Result;
use crate::fetch::fetch_all;
use crate::reconcile::reconcile;
use crate::traits::{IpProbe, RecordApi};
use tracing::{info, warn};

/// What happened to one domain during a run
#[derive(Debug, Clone)]
pub struct DomainReport {
    /// Domain name
    pub domain: String,
    /// Desired records configured for the domain
    pub considered: usize,
    /// Writes that succeeded
    pub updated: usize,
    /// Writes that failed (logged, not propagated)
    pub failed_writes: usize,
    /// True when the remote record fetch failed and the domain was skipped
    pub fetch_failed: bool,
}

/// Aggregated result of a whole run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Per-domain reports, in configuration order
    pub domains: Vec<DomainReport>,
}

impl RunSummary {
    /// Total successful writes across all domains
    pub fn total_updated(&self) -> usize {
        self.domains.iter().map(|d| d.updated).sum()
    }
}

/// Execute one full run
///
/// Fatal only when discovery leaves no usable address; everything below that
/// severity is logged and reflected in the summary.
pub async fn run(config: &Config, probe: &dyn IpProbe, api: &dyn RecordApi) -> Result<RunSummary> {
    let resolved = discover(config, probe).await?;

    let mut summary = RunSummary::default();
    for domain in &config.domains {
        info!("{}: reconciling {} record(s)", domain.domain, domain.records.len());
        summary
            .domains
            .push(run_domain(config, api, domain, &resolved).await);
    }
    Ok(summary)
}

/// Reconcile a single domain; never fails the run
async fn run_domain(
    config: &Config,
    api: &dyn RecordApi,
    domain: &DomainConfig,
    resolved: &ResolvedAddresses,
) -> DomainReport {
    let mut report = DomainReport {
        domain: domain.domain.clone(),
        considered: domain.records.len(),
        updated: 0,
        failed_writes: 0,
        fetch_failed: false,
    };

    let remote = match fetch_all(api, &domain.domain, config.page_size).await {
        Ok(records) => records,
        Err(e) => {
            warn!("{}: failed to fetch remote records, skipping domain: {}", domain.domain, e);
            report.fetch_failed = true;
            return report;
        }
    };
    if remote.is_empty() {
        // fetch_all already warned; nothing to reconcile against
        return report;
    }

    let outcome = reconcile(
        &domain.domain,
        &domain.records,
        &remote,
        resolved,
        config.allow_ipv4_in_ipv6,
    );

    for decision in &outcome.decisions {
        match apply(api, &domain.domain, &remote, decision).await {
            Ok(()) => report.updated += 1,
            Err(e) => {
                warn!(
                    "{}: failed to update record {}: {}",
                    domain.domain, decision.record_id, e
                );
                report.failed_writes += 1;
            }
        }
    }

    info!(
        "{}: {} of {} records updated",
        domain.domain, report.updated, report.considered
    );
    report
}
