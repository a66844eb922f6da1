//! HTTP routes for the Albumshelf API.
//!
//! Every route group exposes a `mount` function; [`MOUNTS`] is the complete list
//! applied at startup.
//!
//! - `albums`: the album resource under `/api/v1/albums`
//! - `health`: greeting, liveness/readiness probes, metrics and version info

use axum::Router;

use crate::state::AppState;

pub mod albums;
pub mod health;

/// Registers a group of routes on the application router.
pub type Mount = fn(Router<AppState>, &AppState) -> Router<AppState>;

pub const MOUNTS: &[Mount] = &[health::mount, albums::mount];

/// Builds the router from [`MOUNTS`] and binds the state.
pub fn router(state: AppState) -> Router {
    let router = MOUNTS.iter().fold(Router::new(), |router, mount| mount(router, &state));
    router.with_state(state)
}
