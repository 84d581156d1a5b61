//! Dual-stack public IP discovery
//!
//! Each enabled address family is looked up independently against its
//! configured (or default) endpoint. A family that cannot be resolved is
//! recoverable — it is logged and marked absent — unless that leaves no
//! usable address at all, in which case the run must not touch any domain.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::traits::IpProbe;
use std::fmt::Display;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use tracing::{debug, warn};

/// Default IPv4 lookup endpoint
const DEFAULT_IPV4_CHECK_URL: &str = "https://api.ipify.org/?format=text";

/// Default IPv6 lookup endpoint
const DEFAULT_IPV6_CHECK_URL: &str = "https://api64.ipify.org/?format=text";

/// The addresses resolved for one run
///
/// Shared read-only across all domains; discarded when the run ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedAddresses {
    /// Current public IPv4 address, if discovered
    pub ipv4: Option<Ipv4Addr>,
    /// Current public IPv6 address, if discovered
    pub ipv6: Option<Ipv6Addr>,
}

impl ResolvedAddresses {
    /// True when no family resolved to an address
    pub fn is_empty(&self) -> bool {
        self.ipv4.is_none() && self.ipv6.is_none()
    }
}

/// Discover the caller's current public addresses
///
/// # Returns
///
/// - `Ok(ResolvedAddresses)`: at least one family resolved
/// - `Err(Error::NoAddressResolved)`: every enabled family came up empty
///   (or both families are disabled); the run must stop before any DNS write
pub async fn discover(config: &Config, probe: &dyn IpProbe) -> Result<ResolvedAddresses> {
    let mut resolved = ResolvedAddresses::default();

    if config.use_ipv4.unwrap_or(true) {
        let url = config
            .ipv4_check_url
            .as_deref()
            .unwrap_or(DEFAULT_IPV4_CHECK_URL);
        resolved.ipv4 = lookup_family::<Ipv4Addr>(probe, url, "IPv4").await;
    }

    if config.use_ipv6.unwrap_or(true) {
        let url = config
            .ipv6_check_url
            .as_deref()
            .unwrap_or(DEFAULT_IPV6_CHECK_URL);
        resolved.ipv6 = lookup_family::<Ipv6Addr>(probe, url, "IPv6").await;
    }

    if resolved.is_empty() {
        return Err(Error::NoAddressResolved);
    }
    Ok(resolved)
}

/// Look up one address family; any failure yields "absent" for that family
async fn lookup_family<A>(probe: &dyn IpProbe, url: &str, family: &str) -> Option<A>
where
    A: FromStr + Display,
{
    debug!("checking {} address with URL: {}", family, url);

    let body = match probe.fetch(url).await {
        Ok(body) => body,
        Err(e) => {
            warn!("{} lookup at {} failed: {}", family, url, e);
            return None;
        }
    };

    let text = body.trim();
    if text.is_empty() {
        warn!(
            "no {} address found; consider disabling {} checks in the configuration",
            family, family
        );
        return None;
    }

    match text.parse::<A>() {
        Ok(address) => {
            debug!("discovered {} address `{}`", family, address);
            Some(address)
        }
        Err(_) => {
            warn!("unable to parse `{}` as an {} address", text, family);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Probe answering from a fixed url -> body table, recording every call
    struct FixedProbe {
        responses: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl FixedProbe {
        fn new(responses: &[(&str, &str)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(u, b)| (u.to_string(), b.to_string()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IpProbe for FixedProbe {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.calls.lock().unwrap().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| Error::ip_lookup(format!("unreachable endpoint {}", url)))
        }
    }

    fn config_with_urls() -> Config {
        serde_json::from_str(
            r#"{
                "apiKey": "token",
                "ipv4CheckUrl": "http://v4.test",
                "ipv6CheckUrl": "http://v6.test",
                "domains": [
                    { "domain": "example.com",
                      "records": [{ "type": "A", "name": "home" }] }
                ]
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn resolves_both_families() {
        let probe = FixedProbe::new(&[("http://v4.test", "203.0.113.9\n"), (
            "http://v6.test",
            "2001:db8::1",
        )]);
        let resolved = discover(&config_with_urls(), &probe).await.unwrap();
        assert_eq!(resolved.ipv4, Some(Ipv4Addr::new(203, 0, 113, 9)));
        assert_eq!(resolved.ipv6, Some("2001:db8::1".parse().unwrap()));
    }

    #[tokio::test]
    async fn garbage_ipv4_is_absent_not_fatal() {
        let probe = FixedProbe::new(&[("http://v4.test", "<html>busted</html>"), (
            "http://v6.test",
            "2001:db8::1",
        )]);
        let resolved = discover(&config_with_urls(), &probe).await.unwrap();
        assert_eq!(resolved.ipv4, None);
        assert!(resolved.ipv6.is_some());
    }

    #[tokio::test]
    async fn ipv4_literal_from_ipv6_endpoint_is_absent() {
        // a dual-stack lookup host may answer the v6 endpoint over v4
        let probe = FixedProbe::new(&[("http://v4.test", "203.0.113.9"), (
            "http://v6.test",
            "203.0.113.9",
        )]);
        let resolved = discover(&config_with_urls(), &probe).await.unwrap();
        assert_eq!(resolved.ipv6, None);
    }

    #[tokio::test]
    async fn empty_bodies_everywhere_are_fatal() {
        let probe = FixedProbe::new(&[("http://v4.test", ""), ("http://v6.test", "  \n")]);
        let err = discover(&config_with_urls(), &probe).await.unwrap_err();
        assert!(matches!(err, Error::NoAddressResolved));
    }

    #[tokio::test]
    async fn transport_failures_everywhere_are_fatal() {
        let probe = FixedProbe::new(&[]);
        let err = discover(&config_with_urls(), &probe).await.unwrap_err();
        assert!(matches!(err, Error::NoAddressResolved));
    }

    #[tokio::test]
    async fn disabled_family_is_never_queried() {
        let mut config = config_with_urls();
        config.use_ipv6 = Some(false);
        let probe = FixedProbe::new(&[("http://v4.test", "203.0.113.9")]);
        let resolved = discover(&config, &probe).await.unwrap();
        assert_eq!(resolved.ipv6, None);
        assert_eq!(probe.calls(), vec!["http://v4.test".to_string()]);
    }

    #[tokio::test]
    async fn both_families_disabled_is_fatal() {
        let mut config = config_with_urls();
        config.use_ipv4 = Some(false);
        config.use_ipv6 = Some(false);
        let probe = FixedProbe::new(&[("http://v4.test", "203.0.113.9")]);
        let err = discover(&config, &probe).await.unwrap_err();
        assert!(matches!(err, Error::NoAddressResolved));
        assert!(probe.calls().is_empty());
    }
}
