#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use attendance_api::config::{ServerConfig, StoreConfig};
use attendance_api::router::build_app_router;
use attendance_api::state::AppState;
use attendance_core::store::{MemoryStore, StoreError, TabularStore};
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout with a 10-second store deadline, and the
/// repository's `static/` directory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_timeout_secs: 10,
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../static"),
        store: StoreConfig::Memory,
    }
}

/// Build the full application router around the given store, with the same
/// middleware stack production uses.
pub fn build_test_app(store: Arc<dyn TabularStore>) -> Router {
    build_test_app_with_config(store, test_config())
}

/// Like [`build_test_app`], with caller-chosen timeouts or paths.
pub fn build_test_app_with_config(store: Arc<dyn TabularStore>, config: ServerConfig) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        store,
    };
    build_app_router(state, &config)
}

/// A store whose every append fails, for exercising the store error path.
pub struct UnreachableStore;

#[async_trait]
impl TabularStore for UnreachableStore {
    async fn append_rows(&self, _rows: &[Vec<String>]) -> Result<(), StoreError> {
        Err(StoreError::Request("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "unreachable"
    }
}

/// A store that answers only after `delay`, then keeps the rows in memory.
pub struct SlowStore {
    pub delay: Duration,
    pub inner: MemoryStore,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl TabularStore for SlowStore {
    async fn append_rows(&self, rows: &[Vec<String>]) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.append_rows(rows).await
    }

    fn name(&self) -> &str {
        "slow"
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
