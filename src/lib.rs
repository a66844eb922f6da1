//! # Albumshelf Backend Library
//!
//! REST API for a collection of music albums, persisted in SQLite.
//!
//! ## Architecture
//!
//! The application is built using:
//! - **Axum**: HTTP server, routing and middleware
//! - **SQLx**: Asynchronous SQLite access
//! - **Tokio**: Async runtime
//! - **Serde**: JSON bodies and album views
//!
//! ## Core Components
//!
//! - [`schema`]: Album record, client view, per-field merge and validation
//! - [`store`]: Create/read/update/delete against the albums collection
//! - [`routes`]: HTTP handlers, the `{album_id}` resolver and the mount list
//! - [`error`]: Error variants and the log/classify/fallback response chain
//! - [`app`]: Router assembly with CORS, tracing and body limits
//! - [`config`]: Layered configuration (defaults, files, environment)
//! - [`db`]: Connection setup and schema initialization
//! - [`metrics`]: Album lifecycle counters
//! - [`state`]: Shared application state

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod schema;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;
