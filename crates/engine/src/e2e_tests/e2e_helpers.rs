//! Router harness shared by the E2E tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use gangnpc_domain::FactionCatalog;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::api::http::routes;
use crate::app::App;
use crate::infrastructure::sqlite::SqliteDatabase;

/// A fully wired engine over an in-memory database.
pub struct TestEngine {
    router: Router,
    // Keeps the in-memory database alive for the test's duration
    _db: SqliteDatabase,
}

impl TestEngine {
    pub async fn start() -> Self {
        let db = SqliteDatabase::connect(":memory:")
            .await
            .expect("in-memory database");
        let app = Arc::new(App::new(&db, FactionCatalog::builtin()));
        Self {
            router: routes().with_state(app),
            _db: db,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Spawn and return the created NPC documents, asserting success.
    pub async fn spawn(&self, body: Value) -> Vec<Value> {
        let (status, value) = self.post("/api/npc/spawn", body).await;
        assert_eq!(status, StatusCode::OK, "spawn failed: {value}");
        value.as_array().cloned().expect("spawn returns a list")
    }

    /// Spawn one NPC for `faction` owned by `owners` (comma-separated).
    pub async fn spawn_owned(&self, faction: &str, owners: &str) -> Value {
        let mut spawned = self
            .spawn(json!({
                "faction": faction,
                "position": { "x": 0.0, "y": 0.0, "z": 0.0 },
                "owner_ids": owners,
            }))
            .await;
        spawned.remove(0)
    }

    pub async fn create_group(&self, body: Value) -> Value {
        let (status, value) = self.post("/api/advanced-groups", body).await;
        assert_eq!(status, StatusCode::OK, "create group failed: {value}");
        value
    }
}

/// The `id` field of a JSON document.
pub fn id_of(doc: &Value) -> String {
    doc["id"].as_str().expect("document has an id").to_string()
}
