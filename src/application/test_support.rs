//! Scripted [`ShortyApi`] for tests that need to control when responses land.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::client::ShortyApi;
use crate::domain::entities::{LinkStats, LinkSummary, ShortenRequest, ShortenResult};
use crate::error::ClientError;

/// Responses are queued up front; a call whose key has a gate waits for it.
///
/// Keys are `links#N` / `shorten#N` (1-based call number) and `stats:CODE`.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    links: Mutex<VecDeque<Result<Vec<LinkSummary>, ClientError>>>,
    shorten: Mutex<VecDeque<Result<ShortenResult, ClientError>>>,
    stats: Mutex<HashMap<String, Result<LinkStats, ClientError>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn push_links(&self, response: Result<Vec<LinkSummary>, ClientError>) {
        self.links.lock().unwrap().push_back(response);
    }

    pub fn push_shorten(&self, response: Result<ShortenResult, ClientError>) {
        self.shorten.lock().unwrap().push_back(response);
    }

    pub fn set_stats(&self, code: &str, response: Result<LinkStats, ClientError>) {
        self.stats.lock().unwrap().insert(code.to_string(), response);
    }

    /// Holds calls with `key` until the returned handle is notified.
    pub fn gate(&self, key: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(key.to_string(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Yields until a call with `key` has been recorded.
    pub async fn wait_for_call(&self, key: &str) {
        while !self.calls().iter().any(|c| c == key) {
            tokio::task::yield_now().await;
        }
    }

    fn record(&self, key: String) {
        self.calls.lock().unwrap().push(key);
    }

    async fn hold(&self, key: &str) {
        let gate = self.gates.lock().unwrap().get(key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl ShortyApi for ScriptedApi {
    async fn list_links(&self) -> Result<Vec<LinkSummary>, ClientError> {
        let n = self.call_count("links#") + 1;
        let key = format!("links#{n}");
        self.record(key.clone());
        let response = self
            .links
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()));
        self.hold(&key).await;
        response
    }

    async fn get_stats(&self, code: &str) -> Result<LinkStats, ClientError> {
        let key = format!("stats:{code}");
        self.record(key.clone());
        let response = self
            .stats
            .lock()
            .unwrap()
            .get(code)
            .cloned()
            .unwrap_or_else(|| Err(ClientError::http(404, "")));
        self.hold(&key).await;
        response
    }

    async fn create_short_link(
        &self,
        _request: &ShortenRequest,
    ) -> Result<ShortenResult, ClientError> {
        let n = self.call_count("shorten#") + 1;
        let key = format!("shorten#{n}");
        self.record(key.clone());
        let response = self
            .shorten
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::http(500, "")));
        self.hold(&key).await;
        response
    }
}

pub(crate) fn link(code: &str) -> LinkSummary {
    LinkSummary::new(
        code,
        format!("https://example.com/{code}"),
        format!("http://localhost:8080/{code}"),
        0,
        0,
    )
}

pub(crate) fn stats(code: &str, clicks: u64) -> LinkStats {
    LinkStats {
        code: code.to_string(),
        original_url: format!("https://example.com/{code}"),
        clicks,
        unique_visitors: clicks,
        expires_at: None,
        countries: HashMap::new(),
    }
}

pub(crate) fn shortened(code: &str) -> ShortenResult {
    ShortenResult {
        code: code.to_string(),
        short_url: format!("http://localhost:8080/{code}"),
        qr_image: None,
    }
}
