// ABOUTME: Integration tests for the Gemini text provider against an in-process mock API
// ABOUTME: Checks request shape, error mapping, and plan generation wired through server resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use fitplan_server::errors::ErrorCode;
use fitplan_server::llm::{CompletionRequest, GeminiProvider, LlmProvider};
use fitplan_server::plans::fallback_plan;
use fitplan_server::resources::ServerResources;
use fitplan_server::routes::PlanResponse;
use fitplan_server::server::build_router;
use helpers::axum_test::AxumTestRequest;
use helpers::fixtures::{alex_request, test_config};
use serde_json::{json, Value};

// ============================================================================
// Mock Gemini API
// ============================================================================

#[derive(Clone, Default)]
struct Captured {
    calls: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

impl Captured {
    fn last(&self) -> (String, Option<String>, Value) {
        self.calls.lock().unwrap().last().cloned().unwrap()
    }
}

async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn answer(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

/// Mock that records each call and answers with `text`
async fn spawn_answering(text: String) -> (String, Captured) {
    let captured = Captured::default();
    let router = Router::new()
        .route(
            "/models/:call",
            post(
                |State((captured, text)): State<(Captured, String)>,
                 Path(call): Path<String>,
                 headers: HeaderMap,
                 Json(body): Json<Value>| async move {
                    let key = headers
                        .get("x-goog-api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(ToOwned::to_owned);
                    captured.calls.lock().unwrap().push((call, key, body));
                    Json(answer(&text))
                },
            ),
        )
        .with_state((captured.clone(), text));
    (spawn_upstream(router).await, captured)
}

async fn spawn_status(status: StatusCode, body: Value) -> String {
    let router = Router::new().route(
        "/models/:call",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)).into_response() }
        }),
    );
    spawn_upstream(router).await
}

// ============================================================================
// Provider Requests
// ============================================================================

#[tokio::test]
async fn test_request_shape_and_answer() {
    let (base, captured) = spawn_answering("Keep going!".to_owned()).await;
    let provider = GeminiProvider::new("mock-key")
        .with_base_url(format!("{base}/"))
        .with_model("gemini-2.5-flash");

    let request = CompletionRequest::new("Motivate me")
        .with_temperature(0.7)
        .with_sampling(40, 0.95)
        .with_max_tokens(8192);

    let response = provider.complete(&request).await.unwrap();
    assert_eq!(response.content, "Keep going!");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));

    let (call, key, body) = captured.last();
    assert_eq!(call, "gemini-2.5-flash:generateContent");
    assert_eq!(key.as_deref(), Some("mock-key"));
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Motivate me");
    assert_eq!(body["contents"].as_array().unwrap().len(), 1);
    assert!(body.get("systemInstruction").is_none());
    assert_eq!(body["generationConfig"]["topK"], 40);
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
}

#[tokio::test]
async fn test_configured_model_without_sampling() {
    let (base, captured) = spawn_answering("ok".to_owned()).await;
    let provider = GeminiProvider::new("mock-key")
        .with_base_url(base)
        .with_model("gemini-custom");

    let response = provider.complete(&CompletionRequest::new("hi")).await.unwrap();
    assert_eq!(response.model, "gemini-custom");

    let (call, _, body) = captured.last();
    assert_eq!(call, "gemini-custom:generateContent");
    assert!(body.get("generationConfig").is_none());
}

#[tokio::test]
async fn test_quota_error_maps_to_rate_limited() {
    let base = spawn_status(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "Resource has been exhausted"}}),
    )
    .await;
    let provider = GeminiProvider::new("mock-key").with_base_url(base);

    let error = provider
        .complete(&CompletionRequest::new("hi"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalRateLimited);
    assert!(error.message.contains("Resource has been exhausted"));
}

#[tokio::test]
async fn test_server_error_maps_to_external_service() {
    let base = spawn_status(StatusCode::INTERNAL_SERVER_ERROR, json!({"oops": true})).await;
    let provider = GeminiProvider::new("mock-key").with_base_url(base);

    let error = provider
        .complete(&CompletionRequest::new("hi"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_empty_candidates_is_an_error() {
    let base = spawn_status(StatusCode::OK, json!({"candidates": []})).await;
    let provider = GeminiProvider::new("mock-key").with_base_url(base);

    let result = provider
        .complete(&CompletionRequest::new("hi"))
        .await;
    assert!(result.is_err());
}

// ============================================================================
// Plan Generation End to End
// ============================================================================

fn resources_against(base: &str) -> Arc<ServerResources> {
    let mut config = test_config(Some("mock-key"));
    config.gemini.base_url = base.to_owned();
    Arc::new(ServerResources::new(config))
}

#[tokio::test]
async fn test_plan_generated_from_mock_model() {
    let mut plan = fallback_plan(&alex_request().validate().unwrap());
    plan.motivation = "From the mock model".to_owned();
    let (base, captured) = spawn_answering(serde_json::to_string(&plan).unwrap()).await;

    let response = AxumTestRequest::post("/api/generate-plan")
        .json(&alex_request())
        .send(build_router(resources_against(&base)))
        .await;

    assert_eq!(response.status(), 200);
    let body: PlanResponse = response.json();
    assert_eq!(body.plan, plan);

    let (call, key, sent) = captured.last();
    assert_eq!(call, "gemini-2.5-flash:generateContent");
    assert_eq!(key.as_deref(), Some("mock-key"));
    let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("- Name: Alex"));
}

#[tokio::test]
async fn test_plan_falls_back_when_model_rate_limited() {
    let base = spawn_status(StatusCode::TOO_MANY_REQUESTS, json!({})).await;

    let response = AxumTestRequest::post("/api/generate-plan")
        .json(&alex_request())
        .send(build_router(resources_against(&base)))
        .await;

    assert_eq!(response.status(), 200);
    let body: PlanResponse = response.json();
    assert_eq!(body.plan, fallback_plan(&alex_request().validate().unwrap()));
}
