//! Router-level tests for the text endpoints.
//!
//! Requests go through the full middleware stack via `oneshot`, with a
//! recording mock standing in for Gemini.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use textgen_service::services::providers::mock::MockTextProvider;
use textgen_service::services::providers::{GenerationParams, ProviderError};
use textgen_service::startup::{build_router, AppState};
use tower::util::ServiceExt;

fn app(provider: Arc<MockTextProvider>) -> Router {
    build_router(AppState::new(provider))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// ============================================================================
// POST /generate-text
// ============================================================================

#[tokio::test]
async fn generate_text_returns_model_output() {
    let provider = Arc::new(MockTextProvider::returning("Leaves fall gently down"));

    let (status, body) = send(
        app(provider.clone()),
        post_json(
            "/generate-text",
            json!({ "prompt": "Write a haiku about autumn" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "text": "Leaves fall gently down", "status": "success" })
    );

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].prompt, "Write a haiku about autumn");
    assert_eq!(calls[0].params, GenerationParams::creative());
}

#[tokio::test]
async fn generate_text_accepts_any_non_empty_prompt() {
    for prompt in [" ", "a", "多言語のプロンプト", "line one\nline two"] {
        let provider = Arc::new(MockTextProvider::echoing());

        let (status, body) = send(
            app(provider.clone()),
            post_json("/generate-text", json!({ "prompt": prompt })),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "prompt {:?}", prompt);
        assert_eq!(body["status"], "success");
        assert_eq!(body["text"], format!("Mock response for: {}", prompt));
        assert_eq!(provider.call_count(), 1);
    }
}

#[tokio::test]
async fn generate_text_rejects_missing_or_empty_prompt() {
    for payload in [
        json!({}),
        json!({ "prompt": "" }),
        json!({ "prompt": null }),
        json!({ "text": "wrong field" }),
    ] {
        let provider = Arc::new(MockTextProvider::echoing());

        let (status, body) = send(
            app(provider.clone()),
            post_json("/generate-text", payload.clone()),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body, json!({ "error": "Prompt is required" }));
        assert_eq!(provider.call_count(), 0);
    }
}

#[tokio::test]
async fn generate_text_surfaces_upstream_failure() {
    let provider = Arc::new(MockTextProvider::failing(ProviderError::ApiError(
        "429 Resource has been exhausted (e.g. check quota).".to_string(),
    )));

    let (status, body) = send(
        app(provider),
        post_json("/generate-text", json!({ "prompt": "hello" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "error": "429 Resource has been exhausted (e.g. check quota).",
            "status": "error"
        })
    );
}

// ============================================================================
// POST /analyze
// ============================================================================

#[tokio::test]
async fn analyze_returns_analysis_and_builds_fixed_prompt() {
    let provider = Arc::new(MockTextProvider::returning("Mostly positive sentiment"));

    let (status, body) = send(
        app(provider.clone()),
        post_json("/analyze", json!({ "text": "The release went smoothly." })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "analysis": "Mostly positive sentiment", "status": "success" })
    );

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].prompt,
        "Analyze the following text and provide key insights: The release went smoothly."
    );
    assert!(calls[0].params.is_empty());
}

#[tokio::test]
async fn analyze_embeds_text_verbatim() {
    let text = "  {braces} and \"quotes\"\n";
    let provider = Arc::new(MockTextProvider::echoing());

    let (status, _) = send(
        app(provider.clone()),
        post_json("/analyze", json!({ "text": text })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        provider.calls()[0].prompt,
        format!("Analyze the following text and provide key insights: {}", text)
    );
}

#[tokio::test]
async fn analyze_rejects_missing_or_empty_text() {
    for payload in [json!({ "text": "" }), json!({}), json!({ "text": null })] {
        let provider = Arc::new(MockTextProvider::echoing());

        let (status, body) = send(app(provider.clone()), post_json("/analyze", payload.clone())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body, json!({ "error": "Text is required" }));
        assert_eq!(provider.call_count(), 0);
    }
}

#[tokio::test]
async fn analyze_surfaces_upstream_failure() {
    let provider = Arc::new(MockTextProvider::failing(ProviderError::NetworkError(
        "error sending request".to_string(),
    )));

    let (status, body) = send(
        app(provider),
        post_json("/analyze", json!({ "text": "anything" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "error sending request");
}

// ============================================================================
// Malformed bodies, CORS, routing
// ============================================================================

#[tokio::test]
async fn malformed_json_is_rejected_without_model_call() {
    let provider = Arc::new(MockTextProvider::echoing());
    let request = Request::builder()
        .method("POST")
        .uri("/generate-text")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app(provider.clone()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body["error"].is_string());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn missing_content_type_is_unsupported_media_type() {
    let provider = Arc::new(MockTextProvider::echoing());
    let request = Request::builder()
        .method("POST")
        .uri("/analyze")
        .body(Body::from(r#"{"text":"hi"}"#))
        .unwrap();

    let (status, _) = send(app(provider.clone()), request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let provider = Arc::new(MockTextProvider::echoing());
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/generate-text")
        .header(header::ORIGIN, "https://example.org")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app(provider).oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn responses_carry_request_id() {
    let provider = Arc::new(MockTextProvider::echoing());
    let mut request = post_json("/generate-text", json!({ "prompt": "hi" }));
    request
        .headers_mut()
        .insert("x-request-id", "trace-me".parse().unwrap());

    let response = app(provider).oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn get_on_generate_text_is_method_not_allowed() {
    let provider = Arc::new(MockTextProvider::echoing());
    let request = Request::builder()
        .uri("/generate-text")
        .body(Body::empty())
        .unwrap();

    let response = app(provider.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(provider.call_count(), 0);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_reports_service() {
    let provider = Arc::new(MockTextProvider::echoing());
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = send(app(provider), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "textgen-service");
}

#[tokio::test]
async fn readiness_follows_provider_health() {
    let healthy = Arc::new(MockTextProvider::echoing());
    let request = Request::builder().uri("/ready").body(Body::empty()).unwrap();
    let response = app(healthy).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let broken = Arc::new(MockTextProvider::failing(ProviderError::ApiError(
        "403 API key not valid".to_string(),
    )));
    let request = Request::builder().uri("/ready").body(Body::empty()).unwrap();
    let response = app(broken).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
