//! Scripted search API for integration tests.
//!
//! Every call is recorded and parked on a oneshot channel until the test
//! releases it, so responses can be delivered in any order.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tunegrid::{ApiResponse, SearchApi, TrackId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    Lookup(TrackId),
}

#[derive(Default)]
pub struct ScriptedApi {
    calls: Mutex<Vec<Call>>,
    parked: Mutex<Vec<Option<oneshot::Sender<ApiResponse>>>>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, Call::Lookup(_))).count()
    }

    /// Yields until at least `n` calls have been recorded.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls.lock().unwrap().len() < n {
            tokio::task::yield_now().await;
        }
    }

    /// Releases call number `index` (0-based) with `response`.
    pub fn respond(&self, index: usize, response: ApiResponse) {
        let sender = self.parked.lock().unwrap()[index]
            .take()
            .expect("call already answered");
        let _ = sender.send(response);
    }

    async fn park(&self, call: Call) -> ApiResponse {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().unwrap().push(call);
        self.parked.lock().unwrap().push(Some(tx));
        rx.await
            .unwrap_or_else(|_| ApiResponse::failure(0, "response dropped"))
    }
}

#[async_trait]
impl SearchApi for ScriptedApi {
    async fn search_tracks(&self, term: &str) -> ApiResponse {
        self.park(Call::Search(term.to_string())).await
    }

    async fn get_track_details(&self, track_id: TrackId) -> ApiResponse {
        self.park(Call::Lookup(track_id)).await
    }
}

pub fn dhairya() -> Value {
    json!({
        "trackId": 1650765257,
        "trackName": "Dhairya",
        "artistName": "Sajjan Raj Vaidya",
        "collectionName": "Dhairya - Single",
        "primaryGenreName": "Indian Pop",
        "releaseDate": "2023-01-20T12:00:00Z",
        "trackPrice": 0.99,
        "currency": "USD",
        "country": "USA"
    })
}

pub fn grid_response(items: Vec<Value>) -> ApiResponse {
    ApiResponse::success(200, json!({ "resultCount": items.len(), "results": items }))
}

pub fn song(track_id: TrackId, name: &str) -> Value {
    json!({ "trackId": track_id, "trackName": name, "artistName": "Artist" })
}

pub fn lookup_response(detail: Value) -> ApiResponse {
    ApiResponse::success(200, json!({ "resultCount": 1, "results": [detail] }))
}

pub fn server_error() -> ApiResponse {
    ApiResponse { ok: false, status: 500, data: Value::Null }
}
