// ABOUTME: Integration tests for the API client and local store against a live in-process server
// ABOUTME: Covers plan requests, error mapping, quotes, speech fallback, and saved sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fitplan_providers::ImageKind;
use fitplan_server::client::{ApiClient, LocalStore};
use fitplan_server::errors::ErrorCode;
use fitplan_server::resources::ServerResources;
use fitplan_server::server;
use fitplan_server::speech::{
    ConsoleSynthesizer, SpeechAdapter, SpeechOptions, SpeechOutcome, SpeechPlayer, SpeechRoute,
};
use helpers::fixtures::{alex_request, test_config, ScriptedLlm, CLOSED_UPSTREAM};
use tempfile::TempDir;

// ============================================================================
// Fixtures
// ============================================================================

async fn spawn_server(resources: ServerResources) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve(listener, Arc::new(resources)));
    ApiClient::new(format!("http://{addr}/")).unwrap()
}

async fn client_with_llm(reply: &str) -> ApiClient {
    let config = test_config(Some("test-gemini-key"));
    let images = fitplan_providers::ImageProviderChain::from_config(&config.images);
    spawn_server(ServerResources::with_parts(
        config,
        Some(ScriptedLlm::replying(reply)),
        images,
    ))
    .await
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// API Client
// ============================================================================

#[tokio::test]
async fn test_client_trims_trailing_slash() {
    let client = ApiClient::new("http://localhost:8081///").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8081");
}

#[tokio::test]
async fn test_generate_plan_round_trip() {
    let client = client_with_llm("not json at all").await;

    let plan = client.generate_plan(&alex_request()).await.unwrap();
    assert_eq!(plan.diet_plan.daily_calories, 1800);
    assert_eq!(plan.workout_plan.weekly_schedule.len(), 7);
}

#[tokio::test]
async fn test_server_errors_keep_their_code() {
    let client = client_with_llm("unused").await;
    let mut request = alex_request();
    request.name = None;

    let error = client.generate_plan(&request).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);
    assert!(error.message.contains("name"));
}

#[tokio::test]
async fn test_missing_key_surfaces_config_error() {
    let client = spawn_server(ServerResources::new(test_config(None))).await;

    let error = client.generate_plan(&alex_request()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigMissing);
}

#[tokio::test]
async fn test_quote_image_and_speech() {
    let client = client_with_llm("\"Small steps, every day.\"").await;

    assert_eq!(
        client.motivational_quote().await.unwrap(),
        "Small steps, every day."
    );

    let image = client
        .generate_image("healthy breakfast", ImageKind::Meal)
        .await
        .unwrap();
    assert!(image.is_fallback());

    let speech = client
        .text_to_speech("Day 1", "Zephyr", "en-US")
        .await
        .unwrap();
    assert!(speech.success);
    assert!(speech.audio_url.is_none());
}

#[tokio::test]
async fn test_unreachable_server() {
    let client = ApiClient::new(CLOSED_UPSTREAM).unwrap();
    let error = client.motivational_quote().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
}

// ============================================================================
// Speech Through the Server
// ============================================================================

#[tokio::test]
async fn test_speech_adapter_falls_back_to_local_voice() {
    let client = client_with_llm("unused").await;
    let out = SharedBuf::default();
    let synthesizer =
        ConsoleSynthesizer::new(Box::new(out.clone())).with_word_duration(Duration::ZERO);
    let adapter = SpeechAdapter::new(
        Some(Arc::new(client)),
        SpeechPlayer::new(Arc::new(synthesizer)),
    );

    let route = adapter
        .speak("Day 1, Monday. Push-ups.", SpeechOptions::default())
        .await
        .unwrap();

    assert_eq!(route, SpeechRoute::Local(SpeechOutcome::Completed));
    assert!(out.contents().contains("Push-ups."));
}

// ============================================================================
// Local Store
// ============================================================================

#[tokio::test]
async fn test_generated_session_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let client = client_with_llm("not json").await;
    let request = alex_request();
    let profile = request.clone().validate().unwrap();
    let plan = client.generate_plan(&request).await.unwrap();

    let mut store = LocalStore::open_in(Some(dir.path())).unwrap();
    store.save_session(&profile, &plan).unwrap();

    let reopened = LocalStore::open_in(Some(dir.path())).unwrap();
    let session = reopened.load_session().unwrap().unwrap();
    assert_eq!(session.profile, profile);
    assert_eq!(session.plan, plan);

    let mut reopened = reopened;
    reopened.reset().unwrap();
    let after_reset = LocalStore::open_in(Some(dir.path())).unwrap();
    assert!(after_reset.load_session().unwrap().is_none());
}
