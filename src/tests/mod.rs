//! Unit and integration tests for Albumshelf.
//!
//! ## Test Modules
//!
//! - **schema_tests**: album view projection, field merge, casting and validation
//! - **store_tests**: store operations against an in-memory database
//! - **api_tests**: the `/api/v1/albums` HTTP surface end to end
//! - **error_tests**: the log/classify/fallback error chain
//! - **config_tests**: configuration layering and validation
//! - **db_tests**: schema initialization
//! - **health_api_tests**: greeting, probes, metrics and version endpoints
//!
//! Run a single module with e.g. `cargo test api_tests`.

pub mod error_tests;
pub mod health_api_tests;

use axum::{body::Body, http::Request, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::{app, config::AppConfig, state::AppState};

/// Single-connection in-memory database with the schema applied.
///
/// The connection must never be recycled, otherwise the database vanishes with it.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    crate::db::init_db(&pool).await.unwrap();
    pool
}

pub async fn test_state() -> AppState {
    AppState::new(memory_pool().await, AppConfig::default())
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (app::build_app(state.clone()), state)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_bytes(response: axum::response::Response) -> axum::body::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
