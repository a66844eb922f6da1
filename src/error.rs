//! Application errors and the chain that turns them into HTTP responses.
//!
//! Handlers never build error responses themselves. They return an [`AppError`] and its
//! [`IntoResponse`] impl runs three stages in order:
//!
//! 1. [`log_error`] observes every error.
//! 2. [`classify`] answers the kinds it knows (unknown entity, validation, malformed body)
//!    and forwards everything else unchanged.
//! 3. [`fallback`] answers whatever is left with a fixed 500 body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use crate::schema::{ValidationErrors, RESOURCE};
use crate::store::StoreError;

/// Body of every response produced by the fallback stage.
pub const FALLBACK_MESSAGE: &str = "something failed";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A path parameter referenced an entity that does not exist.
    #[error("Unknown {resource} {id}")]
    UnknownEntity { resource: &'static str, id: String },
    /// Required-field or type constraints were violated on create/update.
    #[error("{0}")]
    Validation(ValidationErrors),
    /// The request body was not a JSON object.
    #[error("{0}")]
    MalformedBody(#[from] JsonRejection),
    /// Anything else: store connectivity, corrupt rows, bugs.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Error name as reported in response bodies.
    pub fn name(&self) -> &'static str {
        match self {
            AppError::UnknownEntity { .. } => "UnknownEntityError",
            AppError::Validation(_) => "ValidationError",
            AppError::MalformedBody(_) => "MalformedBodyError",
            AppError::Other(_) => "Error",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => AppError::UnknownEntity { resource: RESOURCE, id },
            StoreError::Validation(errors) => AppError::Validation(errors),
            StoreError::Database(e) => AppError::Other(anyhow::Error::new(e).context("album store")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log_error(&self);
        match classify(self) {
            Ok(res) => res,
            Err(unhandled) => fallback(unhandled),
        }
    }
}

/// Log stage. Unclassified errors are logged with their full cause chain since the
/// client only ever sees the fallback body for them.
pub fn log_error(err: &AppError) {
    match err {
        AppError::Other(cause) => tracing::error!("Unhandled error: {:?}", cause),
        other => tracing::debug!("{}: {}", other.name(), other),
    }
}

/// Classification stage: `Ok` is a terminal response, `Err` passes the error on.
pub fn classify(err: AppError) -> Result<Response, AppError> {
    match err {
        AppError::UnknownEntity { .. } => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "name": err.name(), "message": err.to_string() })),
        )
            .into_response()),
        AppError::Validation(ref errors) => {
            let fields: Map<String, Value> = errors
                .iter()
                .map(|v| (v.path.to_string(), Value::String(v.message.clone())))
                .collect();
            Ok((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "name": err.name(),
                    "message": err.to_string(),
                    "errors": fields,
                })),
            )
                .into_response())
        }
        AppError::MalformedBody(ref rejection) => Ok((
            rejection.status(),
            Json(json!({ "name": err.name(), "message": rejection.body_text() })),
        )
            .into_response()),
        other => Err(other),
    }
}

/// Fallback stage. The error detail is deliberately not part of the response.
pub fn fallback(_err: AppError) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": FALLBACK_MESSAGE }))).into_response()
}

/// A type alias for `Result<T, AppError>`, used throughout the application.
pub type AppResult<T> = Result<T, AppError>;
