//! Reconciliation engine
//!
//! Pure decision logic: given the desired records from configuration, the
//! remote snapshot and the addresses discovered for this run, compute the
//! exact set of writes that would bring the provider in line. No I/O happens
//! here, which is what makes every edge case unit-testable.
//!
//! ## Decision flow, per desired record
//!
//! 1. Only `A` and `AAAA` records are eligible; anything else is skipped.
//! 2. An `A` record without a discovered IPv4 address is skipped — there is
//!    nothing safe to write.
//! 3. A configured record id means the direct-update path, which is not
//!    supported yet; the record is rejected explicitly instead of silently
//!    falling back to name matching (a name match could hit the wrong
//!    record).
//! 4. The target address is chosen for the record's family. An `AAAA`
//!    without a discovered IPv6 address can fall back to the IPv4 address in
//!    v4-mapped form when the configuration allows it.
//! 5. Every remote record with the same `(name, type)` is considered — a
//!    round-robin set has several and all of them are updated.
//! 6. A mutation is only produced when the address text or the managed TTL
//!    actually differs (idempotence).
//!
//! A skip is never fatal; it is logged and counted, and reconciliation moves
//! on to the next desired record.

use crate::config::DesiredRecord;
use crate::discover::ResolvedAddresses;
use crate::record::RemoteRecord;
use std::fmt;
use std::net::Ipv6Addr;
use tracing::{debug, warn};

/// Desired TTLs below this are treated as "do not manage the TTL"
pub const MIN_MANAGED_TTL: u32 = 30;

/// One required remote write
///
/// Maps 1:1 to a single record update; `ttl` is `None` when the remote TTL
/// is to be left as it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationDecision {
    /// Id of the remote record to replace
    pub record_id: i64,
    /// New address text for the record's `data` field
    pub data: String,
    /// New TTL, only when the TTL policy says it changes
    pub ttl: Option<u32>,
}

/// Result of reconciling one domain
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    /// Required writes, in configuration-then-snapshot order
    pub decisions: Vec<MutationDecision>,
    /// Desired records examined
    pub considered_desired: usize,
    /// Size of the remote snapshot
    pub remote_records_seen: usize,
    /// Matched records that needed no change
    pub unchanged: usize,
    /// Desired records skipped at one of the gates
    pub skipped: usize,
}

/// Why a desired record produced no target address
#[derive(Debug, PartialEq, Eq)]
enum SkipReason {
    UnsupportedType(String),
    MissingIpv4,
    MissingIpv6,
    DirectIdUpdate(i64),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedType(t) => {
                write!(f, "unsupported record type `{}` (only A and AAAA)", t)
            }
            SkipReason::MissingIpv4 => {
                write!(f, "an A record cannot be updated without an IPv4 address")
            }
            SkipReason::MissingIpv6 => write!(
                f,
                "an AAAA record cannot be updated without an IPv6 address \
                 (IPv4-in-IPv6 fallback is disabled)"
            ),
            SkipReason::DirectIdUpdate(id) => {
                write!(f, "direct update of record id {} is not supported yet", id)
            }
        }
    }
}

/// Outcome of the per-record gates
enum RecordPlan {
    Target(String),
    Skip(SkipReason),
}

/// Compute the writes needed to bring `remote` in line with `desired`
pub fn reconcile(
    domain: &str,
    desired: &[DesiredRecord],
    remote: &[RemoteRecord],
    resolved: &ResolvedAddresses,
    allow_ipv4_in_ipv6: bool,
) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome {
        considered_desired: desired.len(),
        remote_records_seen: remote.len(),
        ..ReconcileOutcome::default()
    };

    for record in desired {
        let target = match plan_target(record, resolved, allow_ipv4_in_ipv6) {
            RecordPlan::Target(address) => address,
            RecordPlan::Skip(reason) => {
                warn!("{}: skipping `{}` `{}`: {}", domain, record.record_type, record.name, reason);
                outcome.skipped += 1;
                continue;
            }
        };

        debug!("{}: trying to update `{}` `{}`", domain, record.record_type, record.name);

        let mut matched = false;
        for current in remote
            .iter()
            .filter(|r| r.name == record.name && r.record_type == record.record_type)
        {
            matched = true;

            let manage_ttl = record.ttl >= MIN_MANAGED_TTL;
            let ttl_changed = manage_ttl && current.ttl != record.ttl;
            if current.data == target && !ttl_changed {
                debug!("{}: IP/TTL did not change for record {}", domain, current.id);
                outcome.unchanged += 1;
                continue;
            }

            outcome.decisions.push(MutationDecision {
                record_id: current.id,
                data: target.clone(),
                ttl: ttl_changed.then_some(record.ttl),
            });
        }

        if !matched {
            warn!(
                "{}: no remote record matches `{}` `{}`",
                domain, record.record_type, record.name
            );
        }
    }

    outcome
}

/// Run the gates and pick the target address for one desired record
fn plan_target(
    record: &DesiredRecord,
    resolved: &ResolvedAddresses,
    allow_ipv4_in_ipv6: bool,
) -> RecordPlan {
    if record.record_type != "A" && record.record_type != "AAAA" {
        return RecordPlan::Skip(SkipReason::UnsupportedType(record.record_type.clone()));
    }

    if record.record_type == "A" && resolved.ipv4.is_none() {
        return RecordPlan::Skip(SkipReason::MissingIpv4);
    }

    if let Some(id) = record.id {
        return RecordPlan::Skip(SkipReason::DirectIdUpdate(id));
    }

    if record.record_type == "A" {
        // checked non-empty by the gate above
        return match resolved.ipv4 {
            Some(ipv4) => RecordPlan::Target(ipv4.to_string()),
            None => RecordPlan::Skip(SkipReason::MissingIpv4),
        };
    }

    match (resolved.ipv6, resolved.ipv4) {
        (Some(ipv6), _) => RecordPlan::Target(ipv6_literal(ipv6)),
        (None, Some(ipv4)) if allow_ipv4_in_ipv6 => {
            RecordPlan::Target(ipv6_literal(ipv4.to_ipv6_mapped()))
        }
        _ => RecordPlan::Skip(SkipReason::MissingIpv6),
    }
}

/// Render an IPv6 address for an AAAA record
///
/// `Ipv6Addr::to_string` displays v4-mapped addresses in dotted-quad form
/// (`::ffff:203.0.113.9`), which is not acceptable as AAAA record data.
/// Mapped addresses are forced into hex-group notation instead.
fn ipv6_literal(address: Ipv6Addr) -> String {
    match address.to_ipv4_mapped() {
        Some(ipv4) => {
            let [a, b, c, d] = ipv4.octets();
            format!(
                "::ffff:{:x}:{:x}",
                u16::from_be_bytes([a, b]),
                u16::from_be_bytes([c, d])
            )
        }
        None => address.to_string(),
    }
}
