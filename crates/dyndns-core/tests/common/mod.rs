//! Shared test doubles for the dyndns-core integration tests
//!
//! `ScriptedApi` serves a scripted set of record pages per domain and
//! records every write it receives; `FixedProbe` answers IP lookups from a
//! static table. Neither touches the network.

// not every helper is used by every test binary
#![allow(dead_code)]

use async_trait::async_trait;
use dyndns_core::record::{RecordPage, RemoteRecord};
use dyndns_core::traits::{IpProbe, RecordApi};
use dyndns_core::{Config, Error};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Scripted in-memory provider
#[derive(Default)]
pub struct ScriptedApi {
    first_pages: HashMap<String, RecordPage>,
    next_pages: HashMap<String, RecordPage>,
    fail_domains: HashSet<String>,
    fail_record_ids: HashSet<i64>,
    pub per_page_seen: Mutex<Vec<Option<u32>>>,
    pub put_calls: Mutex<Vec<(String, RemoteRecord)>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the record pages returned for `domain`, wiring next links
    /// between consecutive pages
    pub fn with_domain(mut self, domain: &str, pages: Vec<Vec<RemoteRecord>>) -> Self {
        let mut built: Vec<RecordPage> = Vec::new();
        let count = pages.len();
        for (index, records) in pages.into_iter().enumerate() {
            let next = (index + 1 < count)
                .then(|| format!("scripted://{}/records?page={}", domain, index + 2));
            built.push(RecordPage { records, next });
        }
        let mut iter = built.into_iter();
        if let Some(first) = iter.next() {
            self.first_pages.insert(domain.to_string(), first);
        }
        for (index, page) in iter.enumerate() {
            let url = format!("scripted://{}/records?page={}", domain, index + 2);
            self.next_pages.insert(url, page);
        }
        self
    }

    /// Make every list request for `domain` fail
    pub fn failing_domain(mut self, domain: &str) -> Self {
        self.fail_domains.insert(domain.to_string());
        self
    }

    /// Make writes against the given record id fail
    pub fn failing_record(mut self, id: i64) -> Self {
        self.fail_record_ids.insert(id);
        self
    }

    pub fn put_records(&self) -> Vec<RemoteRecord> {
        self.put_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }
}

#[async_trait]
impl RecordApi for ScriptedApi {
    async fn list_records(&self, domain: &str, per_page: Option<u32>) -> Result<RecordPage, Error> {
        self.per_page_seen.lock().unwrap().push(per_page);
        if self.fail_domains.contains(domain) {
            return Err(Error::provider("scripted", format!("listing {} refused", domain)));
        }
        self.first_pages
            .get(domain)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("domain {}", domain)))
    }

    async fn fetch_page(&self, page_url: &str) -> Result<RecordPage, Error> {
        self.next_pages
            .get(page_url)
            .cloned()
            .ok_or_else(|| Error::provider("scripted", format!("unknown page {}", page_url)))
    }

    async fn update_record(&self, domain: &str, record: &RemoteRecord) -> Result<String, Error> {
        if self.fail_record_ids.contains(&record.id) {
            return Err(Error::provider(
                "scripted",
                format!("write to record {} refused", record.id),
            ));
        }
        self.put_calls
            .lock()
            .unwrap()
            .push((domain.to_string(), record.clone()));
        Ok(format!("{{\"domain_record\":{{\"id\":{}}}}}", record.id))
    }
}

/// Probe answering from a fixed url -> body table
#[derive(Default)]
pub struct FixedProbe {
    responses: HashMap<String, String>,
}

impl FixedProbe {
    pub fn new(responses: &[(&str, &str)]) -> Self {
        Self {
            responses: responses
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl IpProbe for FixedProbe {
    async fn fetch(&self, url: &str) -> Result<String, Error> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| Error::ip_lookup(format!("unreachable endpoint {}", url)))
    }
}

/// An A record as it would come back from the provider
pub fn a_record(id: i64, name: &str, data: &str, ttl: u32) -> RemoteRecord {
    RemoteRecord {
        id,
        record_type: "A".to_string(),
        name: name.to_string(),
        data: data.to_string(),
        ttl,
        priority: None,
        port: None,
        weight: None,
        flags: None,
        tag: None,
    }
}

/// Minimal config with fixed lookup endpoints and one A record per domain
pub fn config_for(domains: &[&str]) -> Config {
    let domains = domains
        .iter()
        .map(|d| {
            format!(
                r#"{{ "domain": "{}", "records": [{{ "type": "A", "name": "home", "ttl": 300 }}] }}"#,
                d
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    serde_json::from_str(&format!(
        r#"{{
            "apiKey": "token",
            "useIpv6": false,
            "ipv4CheckUrl": "http://v4.test",
            "domains": [{}]
        }}"#,
        domains
    ))
    .unwrap()
}
