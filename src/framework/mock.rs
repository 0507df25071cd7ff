//! # Mock Transport
//!
//! Utilities for testing clients and views without a network.
//!
//! Use [`MockTransport::new`] to get a transport, queue answers with
//! [`MockTransport::expect_get`], and call [`MockTransport::verify`] at the end.
//! The fixture builders ([`character_json`], [`location_json`], [`page_json`]) produce
//! payloads shaped like the real API.

use crate::framework::error::TransportError;
use crate::framework::transport::Transport;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use url::Url;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

type Answer = Result<Value, TransportError>;

#[derive(Default)]
struct MockState {
    expectations: HashMap<String, VecDeque<Answer>>,
    requests: Vec<String>,
}

/// A mock transport with per-URL expectation queues.
///
/// Expectations are matched by the full URL string, so concurrent requests
/// (e.g. reference resolution) are answered correctly regardless of poll order.
/// A request with no queued answer panics, failing the test.
///
/// # Example
/// ```ignore
/// let mock = MockTransport::new();
/// mock.expect_get("https://api.test/character/1").return_ok(character_json(1, "Rick Sanchez", "Alive"));
///
/// let client = EntityClient::new(mock.clone(), base_url);
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a new mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a GET for `url`.
    pub fn expect_get(&self, url: impl Into<String>) -> GetExpectationBuilder {
        GetExpectationBuilder {
            url: url.into(),
            state: self.state.clone(),
        }
    }

    /// Every URL requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    /// How many times `url` has been requested.
    pub fn request_count(&self, url: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.as_str() == url)
            .count()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        let remaining: usize = state.expectations.values().map(VecDeque::len).sum();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &Url) -> Result<Value, TransportError> {
        let mut state = self.state.lock().unwrap();
        let key = url.to_string();
        state.requests.push(key.clone());
        let answer = state
            .expectations
            .get_mut(&key)
            .and_then(VecDeque::pop_front);
        drop(state); // Release lock before returning

        match answer {
            Some(answer) => answer,
            None => panic!("Unexpected request: {}", key),
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder {
    url: String,
    state: Arc<Mutex<MockState>>,
}

impl GetExpectationBuilder {
    /// Sets the expectation to return a JSON document.
    pub fn return_ok(self, body: Value) {
        self.push(Ok(body));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, answer: Answer) {
        let mut state = self.state.lock().unwrap();
        state
            .expectations
            .entry(self.url)
            .or_default()
            .push_back(answer);
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

/// Base URL used by the fixtures. Always ends in `/`.
pub const MOCK_BASE: &str = "https://api.test/api/";

/// A character payload with a navigable origin and two episodes.
pub fn character_json(id: u32, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": status,
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": { "name": "Earth (C-137)", "url": format!("{MOCK_BASE}location/1") },
        "location": { "name": "Citadel of Ricks", "url": format!("{MOCK_BASE}location/3") },
        "image": format!("{MOCK_BASE}character/avatar/{id}.jpeg"),
        "episode": [
            format!("{MOCK_BASE}episode/1"),
            format!("{MOCK_BASE}episode/2"),
        ],
        "url": format!("{MOCK_BASE}character/{id}"),
        "created": "2017-11-04T18:48:46.250Z"
    })
}

/// A location payload whose residents point at `resident_ids`.
pub fn location_json(id: u32, name: &str, resident_ids: &[u32]) -> Value {
    let residents: Vec<String> = resident_ids
        .iter()
        .map(|rid| format!("{MOCK_BASE}character/{rid}"))
        .collect();
    json!({
        "id": id,
        "name": name,
        "type": "Planet",
        "dimension": "Dimension C-137",
        "residents": residents,
        "url": format!("{MOCK_BASE}location/{id}"),
        "created": "2017-11-10T12:42:04.162Z"
    })
}

/// A collection page envelope as returned by `GET /{collection}?page=N`.
pub fn page_json(results: Vec<Value>, count: u32, pages: u32) -> Value {
    json!({
        "info": { "count": count, "pages": pages, "next": null, "prev": null },
        "results": results
    })
}
