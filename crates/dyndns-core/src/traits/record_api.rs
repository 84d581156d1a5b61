// # Record API Trait
//
// Defines the interface to the provider's DNS record endpoints.
//
// Implementations own authentication, URL construction and the JSON wire
// envelope, and nothing else. The pagination loop lives in `crate::fetch`,
// the decision logic in `crate::reconcile`, and payload construction in
// `crate::apply` — an implementation must not decide whether an update is
// needed, retry, or cache anything between calls.

use crate::record::{RecordPage, RemoteRecord};
use async_trait::async_trait;

/// Trait for the provider's record listing and update endpoints
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// Fetch the first page of records for `domain`
    ///
    /// # Parameters
    ///
    /// - `domain`: the domain name
    /// - `per_page`: page size to request, already clamped by the caller;
    ///   `None` means the provider default
    async fn list_records(&self, domain: &str, per_page: Option<u32>)
    -> Result<RecordPage, crate::Error>;

    /// Fetch a subsequent page via the `next` link of a previous page
    async fn fetch_page(&self, page_url: &str) -> Result<RecordPage, crate::Error>;

    /// Replace one record with `record` in full
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: the provider's response body, for diagnostics
    /// - `Err(Error)`: transport failure or non-2xx status
    async fn update_record(&self, domain: &str, record: &RemoteRecord)
    -> Result<String, crate::Error>;
}
