// ABOUTME: HTTP integration tests for the plan generation route
// ABOUTME: Covers model answers, every fallback path, input validation, and missing configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use fitplan_server::models::{FitnessPlan, UserProfileRequest};
use fitplan_server::plans::fallback_plan;
use fitplan_server::routes::PlanResponse;
use helpers::axum_test::AxumTestRequest;
use helpers::fixtures::{alex_request, app_with_llm, app_without_key, ScriptedLlm};
use serde_json::{json, Value};

async fn generate(app: axum::Router, body: &UserProfileRequest) -> FitnessPlan {
    let response = AxumTestRequest::post("/api/generate-plan")
        .json(body)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let body: PlanResponse = response.json();
    assert!(body.success);
    body.plan
}

fn model_plan() -> FitnessPlan {
    let mut plan = fallback_plan(&alex_request().validate().unwrap());
    plan.motivation = "Plan written by the model".to_owned();
    plan.workout_plan.weekly_schedule[0].exercises[0].name = "Model Squats".to_owned();
    plan
}

// ============================================================================
// Fallback Paths
// ============================================================================

#[tokio::test]
async fn test_alex_with_unreachable_model_gets_fallback_plan() {
    let llm = ScriptedLlm::failing();
    let plan = generate(app_with_llm(llm.clone()), &alex_request()).await;

    assert_eq!(llm.calls(), 1);
    assert_eq!(plan.diet_plan.daily_calories, 1800);
    assert_eq!(plan.diet_plan.daily_meals[0].day, "Monday");
    assert_eq!(
        plan.diet_plan.daily_meals[0].breakfast.name,
        "Oatmeal with Berries"
    );
    assert_eq!(plan.workout_plan.weekly_schedule.len(), 7);
    assert_eq!(plan.diet_plan.daily_meals.len(), 7);
}

#[tokio::test]
async fn test_non_json_answer_equals_fallback_exactly() {
    let llm = ScriptedLlm::replying("Sorry, I can't help with that today.");
    let plan = generate(app_with_llm(llm), &alex_request()).await;

    let expected = fallback_plan(&alex_request().validate().unwrap());
    assert_eq!(plan, expected);
    assert_eq!(
        serde_json::to_string(&plan).unwrap(),
        serde_json::to_string(&expected).unwrap()
    );
}

#[tokio::test]
async fn test_null_diet_plan_falls_back() {
    let mut answer = serde_json::to_value(model_plan()).unwrap();
    answer["dietPlan"] = Value::Null;
    let llm = ScriptedLlm::replying(answer.to_string());

    let plan = generate(app_with_llm(llm), &alex_request()).await;
    assert_eq!(plan, fallback_plan(&alex_request().validate().unwrap()));
}

#[tokio::test]
async fn test_short_week_falls_back() {
    let mut short = model_plan();
    short.workout_plan.weekly_schedule.truncate(3);
    let llm = ScriptedLlm::replying(serde_json::to_string(&short).unwrap());

    let plan = generate(app_with_llm(llm), &alex_request()).await;
    assert_eq!(plan.workout_plan.weekly_schedule.len(), 7);
    assert_ne!(plan.motivation, "Plan written by the model");
}

// ============================================================================
// Model Answers
// ============================================================================

#[tokio::test]
async fn test_fenced_model_answer_is_used() {
    let answer = format!(
        "Here is your plan:\n```json\n{}\n```\nEnjoy!",
        serde_json::to_string_pretty(&model_plan()).unwrap()
    );
    let llm = ScriptedLlm::replying(answer);

    let plan = generate(app_with_llm(llm), &alex_request()).await;
    assert_eq!(plan, model_plan());
}

#[tokio::test]
async fn test_prompt_carries_profile_and_sampling() {
    let llm = ScriptedLlm::replying("not json");
    let mut request = alex_request();
    request.medical_history = Some("Mild asthma".to_owned());
    request.water_intake = Some(2.5);
    generate(app_with_llm(llm.clone()), &request).await;

    let sent = llm.last_request().unwrap();
    assert_eq!(sent.temperature, Some(0.7));
    assert_eq!(sent.top_k, Some(40));
    assert_eq!(sent.top_p, Some(0.95));
    assert_eq!(sent.max_tokens, Some(8192));

    let prompt = &sent.prompt;
    assert!(prompt.contains("- Name: Alex"));
    assert!(prompt.contains("- Fitness Goal: weight-loss"));
    assert!(prompt.contains("- Medical History: Mild asthma"));
    assert!(prompt.contains("- Water Intake: 2.5L/day"));
    assert!(!prompt.contains("- Stress Level"));
    assert!(prompt.contains("\"workoutPlan\""));
}

// ============================================================================
// Validation and Configuration
// ============================================================================

#[tokio::test]
async fn test_missing_fields_rejected_without_calling_model() {
    let llm = ScriptedLlm::replying("unused");
    let mut request = alex_request();
    request.weight = Some(0.0);
    request.fitness_goal = None;

    let response = AxumTestRequest::post("/api/generate-plan")
        .json(&request)
        .send(app_with_llm(llm.clone()))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("weight"));
    assert!(message.contains("fitnessGoal"));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn test_unknown_choice_rejected() {
    let mut request = alex_request();
    request.workout_location = Some("moon-base".to_owned());

    let response = AxumTestRequest::post("/api/generate-plan")
        .json(&request)
        .send(app_with_llm(ScriptedLlm::replying("unused")))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let response = AxumTestRequest::post("/api/generate-plan")
        .raw_json("{\"name\": \"Alex\",")
        .send(app_with_llm(ScriptedLlm::replying("unused")))
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::post("/api/generate-plan")
        .json(&json!({"name": "Alex", "age": "thirty"}))
        .send(app_with_llm(ScriptedLlm::replying("unused")))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_missing_gemini_key_is_server_error() {
    let response = AxumTestRequest::post("/api/generate-plan")
        .json(&alex_request())
        .send(app_without_key())
        .await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFIG_MISSING");
}

#[tokio::test]
async fn test_invalid_profile_reported_before_missing_key() {
    let response = AxumTestRequest::post("/api/generate-plan")
        .json(&json!({}))
        .send(app_without_key())
        .await;
    assert_eq!(response.status(), 400);
}
