#![allow(dead_code)]

//! In-process stub of the remote shortener API.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{Value, json};
use shorty_client::application::{CompletionPolicy, Orchestrator};
use shorty_client::prelude::HttpApiClient;

/// One queued response.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Canned {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self::text(status, "")
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as the stub received it. `uri` keeps the raw percent-encoding.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: String,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Default)]
struct Inner {
    responses: HashMap<String, VecDeque<Canned>>,
    requests: Vec<Recorded>,
}

/// Responses are queued per route key: `list`, `shorten` or `stats:CODE`.
#[derive(Clone, Default)]
pub struct StubApi {
    inner: Arc<Mutex<Inner>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_list(&self, response: Canned) -> &Self {
        self.enqueue("list".to_string(), response)
    }

    pub fn on_shorten(&self, response: Canned) -> &Self {
        self.enqueue("shorten".to_string(), response)
    }

    pub fn on_stats(&self, code: &str, response: Canned) -> &Self {
        self.enqueue(format!("stats:{code}"), response)
    }

    fn enqueue(&self, key: String, response: Canned) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .responses
            .entry(key)
            .or_default()
            .push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.uri).collect()
    }

    /// Binds an ephemeral port, serves in the background, returns the base URL.
    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/api/urls", get(list_links))
            .route("/api/urls/{code}/stats", get(get_stats))
            .route("/api/shorten", post(shorten))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    async fn respond(&self, key: String, method: Method, uri: Uri, body: Bytes) -> Response {
        let canned = {
            let mut inner = self.inner.lock().unwrap();
            inner.requests.push(Recorded {
                method,
                uri: uri.to_string(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
            inner
                .responses
                .get_mut(&key)
                .and_then(|queue| queue.pop_front())
        };

        let Some(canned) = canned else {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("no response queued for {key}"))
                .into_response();
        };

        if !canned.delay.is_zero() {
            tokio::time::sleep(canned.delay).await;
        }

        let status = StatusCode::from_u16(canned.status).unwrap();
        (status, [(header::CONTENT_TYPE, "application/json")], canned.body).into_response()
    }
}

async fn list_links(State(stub): State<StubApi>, method: Method, uri: Uri, body: Bytes) -> Response {
    stub.respond("list".to_string(), method, uri, body).await
}

async fn get_stats(
    State(stub): State<StubApi>,
    Path(code): Path<String>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    stub.respond(format!("stats:{code}"), method, uri, body).await
}

async fn shorten(State(stub): State<StubApi>, method: Method, uri: Uri, body: Bytes) -> Response {
    stub.respond("shorten".to_string(), method, uri, body).await
}

pub fn client(base_url: &str) -> HttpApiClient {
    HttpApiClient::new(base_url, Duration::from_secs(5)).unwrap()
}

pub fn orchestrator(base_url: &str, policy: CompletionPolicy) -> Orchestrator<HttpApiClient> {
    Orchestrator::with_policy(Arc::new(client(base_url)), policy)
}

pub fn link_item(code: &str) -> Value {
    json!({
        "code": code,
        "short_url": format!("https://host/{code}"),
        "original": format!("https://example.com/{code}"),
        "created_at": "2026-01-01T09:30:00Z",
        "clicks": 3,
        "unique_visitors": 2
    })
}

pub fn stats_body(original: &str, clicks: u64) -> Value {
    json!({
        "original": original,
        "clicks": clicks,
        "unique_visitors": clicks,
        "countries": { "RO": clicks }
    })
}
