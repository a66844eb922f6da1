use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

pub fn mount(router: Router<AppState>, _state: &AppState) -> Router<AppState> {
    router
        .route("/", get(hello))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/metrics/prometheus", get(metrics_prometheus))
        .route("/version", get(version))
}

pub async fn hello() -> impl IntoResponse {
    "Hello World!"
}

// Health check endpoint - lightweight, no store access
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness probe: checks store connectivity with timeout protection
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let ping = state.store.ping();
    match tokio::time::timeout(std::time::Duration::from_secs(5), ping).await {
        Ok(Ok(())) => (StatusCode::OK, "ready").into_response(),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e)).into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout").into_response(),
    }
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

// Prometheus-compatible text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let body = format!(
        "# HELP albumshelf_albums_created Total albums created\n# TYPE albumshelf_albums_created counter\nalbumshelf_albums_created {}\n\
# HELP albumshelf_albums_updated Total albums updated\n# TYPE albumshelf_albums_updated counter\nalbumshelf_albums_updated {}\n\
# HELP albumshelf_albums_removed Total albums removed\n# TYPE albumshelf_albums_removed counter\nalbumshelf_albums_removed {}\n\
# HELP albumshelf_uptime_seconds Uptime seconds\n# TYPE albumshelf_uptime_seconds gauge\nalbumshelf_uptime_seconds {}\n",
        m.albums_created, m.albums_updated, m.albums_removed, m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
