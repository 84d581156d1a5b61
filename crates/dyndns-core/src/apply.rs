//! Mutation applier
//!
//! A provider write replaces the whole record representation, so the payload
//! is the snapshot record with only `data` (and possibly `ttl`) overridden;
//! everything else is carried through untouched.

use crate::error::{Error, Result};
use crate::reconcile::MutationDecision;
use crate::record::RemoteRecord;
use crate::traits::RecordApi;
use tracing::info;

/// Execute one decision as a single remote write
///
/// `remote` must be the snapshot the decision was derived from. The
/// provider's response body is logged for diagnostics either way.
pub async fn apply(
    api: &dyn RecordApi,
    domain: &str,
    remote: &[RemoteRecord],
    decision: &MutationDecision,
) -> Result<()> {
    let current = remote
        .iter()
        .find(|r| r.id == decision.record_id)
        .ok_or_else(|| {
            Error::other(format!(
                "decision targets record id {} which is not in the snapshot",
                decision.record_id
            ))
        })?;

    let mut updated = current.clone();
    updated.data = decision.data.clone();
    if let Some(ttl) = decision.ttl {
        updated.ttl = ttl;
    }

    let body = api.update_record(domain, &updated).await?;
    info!("{}: update response for {}: {}", domain, updated.name, body);
    Ok(())
}
