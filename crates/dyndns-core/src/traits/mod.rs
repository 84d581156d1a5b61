//! Transport seams
//!
//! The core never talks HTTP itself. These traits are implemented by the
//! transport crates (`dyndns-provider-digitalocean`, `dyndns-ip-http`) and
//! by in-memory fakes in the tests.

mod ip_probe;
mod record_api;

pub use ip_probe::IpProbe;
pub use record_api::RecordApi;
