//! Paginated remote record aggregation
//!
//! The provider lists records in pages, each carrying an absolute link to
//! the next page. This module owns the loop that follows those links and
//! concatenates the pages into one ordered sequence; the transport itself
//! lives behind [`RecordApi`].

use crate::error::Result;
use crate::record::RemoteRecord;
use crate::traits::RecordApi;
use tracing::{debug, warn};

/// Page size the provider uses when no parameter is sent
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size the provider accepts
const MAX_PAGE_SIZE: u32 = 200;

/// Page size to actually request, if any
///
/// Unset, zero, or the provider default send no parameter; anything else is
/// clamped to the provider maximum.
pub fn effective_page_size(configured: Option<u32>) -> Option<u32> {
    match configured {
        Some(size) if size > 0 && size != DEFAULT_PAGE_SIZE => Some(size.min(MAX_PAGE_SIZE)),
        _ => None,
    }
}

/// Fetch the complete record set for `domain`, following every page link
///
/// Records come back in provider page order; duplicates are not expected and
/// not de-duplicated. An empty result is a warning for the caller, not an
/// error.
pub async fn fetch_all(
    api: &dyn RecordApi,
    domain: &str,
    page_size: Option<u32>,
) -> Result<Vec<RemoteRecord>> {
    let mut records = Vec::new();

    let mut page = api
        .list_records(domain, effective_page_size(page_size))
        .await?;
    loop {
        records.extend(page.records);
        match page.next {
            Some(url) if !url.is_empty() => {
                debug!("{}: following next page {}", domain, url);
                page = api.fetch_page(&url).await?;
            }
            _ => break,
        }
    }

    if records.is_empty() {
        warn!("{}: no DNS records found at the provider", domain);
    } else {
        debug!("{}: {} DNS records found at the provider", domain, records.len());
    }
    Ok(records)
}
