pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::parsing::handlers::handle_parse;
use crate::reconcile::handlers::handle_reconcile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/reconcile", post(handle_reconcile))
        .route("/api/v1/resumes/parse", post(handle_parse))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::CompletionProvider;
    use crate::parsing::orchestrator::mock::MockProvider;
    use crate::parsing::ResumeParser;
    use crate::reconcile::vocabulary::Vocabulary;
    use crate::reconcile::Reconciler;

    fn app(providers: Vec<Arc<dyn CompletionProvider>>) -> Router {
        let vocabulary = Arc::new(Vocabulary::default());
        build_router(AppState {
            reconciler: Arc::new(Reconciler::new(vocabulary.clone())),
            parser: Arc::new(ResumeParser::new(
                providers,
                Duration::from_secs(5),
                vocabulary,
            )),
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(vec![])
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_reconcile_text_only() {
        let (status, body) = post_json(
            app(vec![]),
            "/api/v1/resumes/reconcile",
            json!({"rawText": "Jane Smith\njane.smith@co.com\n9876543210\nSkills: Python, React"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["personalInfo"]["fullName"], "Jane Smith");
        assert_eq!(body["validation"]["isValid"], true);
        assert_eq!(body["metadata"]["sourcesUsed"]["rawText"], true);
        assert_eq!(body["metadata"]["sourcesUsed"]["provider"], false);
        assert!(body["metadata"].get("providerId").is_none());
        assert!(body["metadata"]["requestId"].is_string());
    }

    #[tokio::test]
    async fn test_reconcile_blank_text_is_validation_error() {
        let (status, body) = post_json(
            app(vec![]),
            "/api/v1/resumes/reconcile",
            json!({"rawText": "   ", "providerOutput": {"name": "Jane"}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_reconcile_runs_generative_path_without_provider_output() {
        let provider = MockProvider::replying(
            "mock",
            r#"{"personalInformation": {"fullName": "Jane Smith", "location": "Pune"}}"#,
        );
        let (status, body) = post_json(
            app(vec![Arc::new(provider)]),
            "/api/v1/resumes/reconcile",
            json!({"rawText": "Jane Smith\njane@co.com"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metadata"]["providerId"], "mock");
        assert_eq!(body["metadata"]["sourcesUsed"]["provider"], true);
        assert_eq!(body["profile"]["personalInfo"]["location"], "Pune");
    }

    #[tokio::test]
    async fn test_reconcile_skips_providers_when_disabled() {
        let provider = MockProvider::replying("mock", r#"{"location": "Pune"}"#);
        let (_, body) = post_json(
            app(vec![Arc::new(provider)]),
            "/api/v1/resumes/reconcile",
            json!({"rawText": "Jane Smith", "useProviders": false}),
        )
        .await;
        assert!(body["metadata"].get("providerId").is_none());
        assert_eq!(body["profile"]["personalInfo"]["location"], "");
    }

    #[tokio::test]
    async fn test_parse_falls_back_without_providers() {
        let (status, body) = post_json(
            app(vec![]),
            "/api/v1/resumes/parse",
            json!({"rawText": "Jane Smith\njane@co.com\nPython developer"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["providerId"], "fallback");
        assert_eq!(body["record"]["atsScore"], 30);
        assert!(body["confidence"].as_u64().unwrap() <= 30);
        assert_eq!(body["record"]["personalInfo"]["fullName"], "Jane Smith");
    }
}
