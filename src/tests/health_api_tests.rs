#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::tests::{body_bytes, body_json, empty_request, json_request, test_app};

    #[tokio::test]
    async fn test_hello_root() {
        let (app, _) = test_app().await;
        let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&body_bytes(response).await[..], b"Hello World!");
    }

    #[tokio::test]
    async fn test_healthz_endpoint() {
        let (app, _) = test_app().await;
        let response = app.oneshot(empty_request("GET", "/healthz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&body_bytes(response).await[..], b"ok");
    }

    #[tokio::test]
    async fn test_readyz_endpoint() {
        let (app, _) = test_app().await;
        let response = app.oneshot(empty_request("GET", "/readyz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readyz_reports_closed_store() {
        let (app, state) = test_app().await;
        state.store.pool().close().await;

        let response = app.oneshot(empty_request("GET", "/readyz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_version_endpoint() {
        let (app, _) = test_app().await;
        let response = app.oneshot(empty_request("GET", "/version")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["name"], "albumshelf");
        assert!(body.get("version").is_some());
        assert!(body.get("build").is_some());
    }

    #[tokio::test]
    async fn test_metrics_count_album_writes() {
        let (app, _) = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/albums",
                &json!({ "title": "Mezzanine", "artist": "Massive Attack" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        // rejected writes are not counted
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/albums", &json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.clone().oneshot(empty_request("GET", "/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["albums_created"], 1);
        assert_eq!(body["albums_updated"], 0);
        assert_eq!(body["albums_removed"], 0);
        assert!(body.get("uptime_seconds").is_some());
    }

    #[tokio::test]
    async fn test_metrics_prometheus() {
        let (app, _) = test_app().await;
        let response = app.oneshot(empty_request("GET", "/metrics/prometheus")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        let text = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
        assert!(text.contains("albumshelf_albums_created 0"));
        assert!(text.contains("# TYPE albumshelf_uptime_seconds gauge"));
    }
}
