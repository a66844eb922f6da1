#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::json;

    use crate::error::{classify, fallback, AppError, FALLBACK_MESSAGE};
    use crate::schema::{AlbumDraft, AlbumFields, ValidationErrors};
    use crate::store::StoreError;
    use crate::tests::body_json;

    fn missing_artist() -> ValidationErrors {
        let mut body = serde_json::Map::new();
        body.insert("title".into(), json!("Kid A"));
        AlbumDraft::default().apply(AlbumFields::from(body)).validate().unwrap_err()
    }

    #[test]
    fn test_app_error_display() {
        let error = AppError::UnknownEntity { resource: "Album", id: "abc".to_string() };
        assert_eq!(error.to_string(), "Unknown Album abc");
        assert_eq!(error.name(), "UnknownEntityError");

        let error = AppError::Validation(missing_artist());
        assert_eq!(error.to_string(), "Album validation failed: artist: Path `artist` is required.");
        assert_eq!(error.name(), "ValidationError");
    }

    #[test]
    fn test_from_store_error() {
        let error: AppError = StoreError::NotFound { id: "42".to_string() }.into();
        match error {
            AppError::UnknownEntity { resource, id } => {
                assert_eq!(resource, "Album");
                assert_eq!(id, "42");
            }
            other => panic!("Expected UnknownEntity, got {:?}", other),
        }

        let error: AppError = StoreError::Validation(missing_artist()).into();
        assert!(matches!(error, AppError::Validation(ref e) if e.contains("artist")));

        let error: AppError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(error, AppError::Other(_)));
    }

    #[tokio::test]
    async fn test_unknown_entity_response() {
        let response =
            AppError::UnknownEntity { resource: "Album", id: "abc".to_string() }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "name": "UnknownEntityError", "message": "Unknown Album abc" })
        );
    }

    #[tokio::test]
    async fn test_validation_response() {
        let response = AppError::Validation(missing_artist()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "name": "ValidationError",
                "message": "Album validation failed: artist: Path `artist` is required.",
                "errors": { "artist": "Path `artist` is required." }
            })
        );
    }

    #[tokio::test]
    async fn test_unclassified_errors_hide_detail() {
        let error = AppError::Other(anyhow::anyhow!("connection refused to secret-host:5432"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "message": FALLBACK_MESSAGE }));
    }

    #[test]
    fn test_classify_forwards_unknown_kinds() {
        let forwarded = classify(AppError::Other(anyhow::anyhow!("boom"))).unwrap_err();
        assert_eq!(forwarded.to_string(), "boom");

        let handled = classify(AppError::UnknownEntity { resource: "Album", id: "x".into() });
        assert!(handled.is_ok());
    }

    #[tokio::test]
    async fn test_fallback_ignores_error_kind() {
        let response = fallback(AppError::UnknownEntity { resource: "Album", id: "x".into() });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "message": "something failed" }));
    }
}
