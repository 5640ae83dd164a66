// ABOUTME: Server fixtures for integration tests: configuration, resources, and a scripted text model
// ABOUTME: Points every upstream at a closed local port so nothing leaves the machine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use fitplan_providers::{ImageProviderChain, ImageProvidersConfig, ProviderEndpoint};
use fitplan_server::config::environment::{
    Environment, GeminiConfig, HttpClientConfig, ServerConfig,
};
use fitplan_server::errors::{AppError, ErrorCode};
use fitplan_server::llm::{Completion, CompletionRequest, LlmProvider};
use fitplan_server::models::UserProfileRequest;
use fitplan_server::resources::ServerResources;
use fitplan_server::server::build_router;

/// Nothing listens on the discard port, so connections are refused at once
pub const CLOSED_UPSTREAM: &str = "http://127.0.0.1:9";

/// Text model that answers every request the same way
pub struct ScriptedLlm {
    reply: Result<String, String>,
    calls: AtomicU32,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl ScriptedLlm {
    /// Model that answers with `text`
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.into()),
            calls: AtomicU32::new(0),
            last_request: Mutex::new(None),
        })
    }

    /// Model that is unreachable
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err("connection refused".to_owned()),
            calls: AtomicU32::new(0),
            last_request: Mutex::new(None),
        })
    }

    /// Number of completed calls
    #[allow(dead_code)]
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most recent request
    #[allow(dead_code)]
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.reply {
            Ok(text) => Ok(Completion {
                content: text.clone(),
                model: "scripted-model".to_owned(),
                finish_reason: Some("STOP".to_owned()),
            }),
            Err(message) => Err(AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                message.clone(),
            )),
        }
    }
}

/// Configuration with every upstream closed and Pollinations disabled
pub fn test_config(gemini_key: Option<&str>) -> ServerConfig {
    fitplan_server::logging::init_test_logging();
    let gemini_key = gemini_key.map(ToOwned::to_owned);
    ServerConfig {
        host: "127.0.0.1".to_owned(),
        http_port: 0,
        environment: Environment::Testing,
        gemini: GeminiConfig {
            api_key: gemini_key.clone(),
            text_model: "gemini-2.5-flash".to_owned(),
            base_url: CLOSED_UPSTREAM.to_owned(),
        },
        images: ImageProvidersConfig {
            gemini: ProviderEndpoint::new(CLOSED_UPSTREAM).with_key(gemini_key),
            gemini_retry_delay: Duration::from_millis(1),
            stability: ProviderEndpoint::new(CLOSED_UPSTREAM),
            getimg: ProviderEndpoint::new(CLOSED_UPSTREAM),
            pollinations: ProviderEndpoint::new(CLOSED_UPSTREAM),
            pollinations_enabled: false,
            deepai: ProviderEndpoint::new(CLOSED_UPSTREAM),
            replicate: ProviderEndpoint::new(CLOSED_UPSTREAM),
            dalle: ProviderEndpoint::new(CLOSED_UPSTREAM),
            ..ImageProvidersConfig::default()
        },
        http_client: HttpClientConfig {
            timeout_secs: 5,
            connect_timeout_secs: 1,
        },
        request_timeout: Duration::from_secs(30),
        cors_allowed_origins: vec!["*".to_owned()],
    }
}

/// Router with a configured Gemini key and `llm` standing in for the model
pub fn app_with_llm(llm: Arc<dyn LlmProvider>) -> Router {
    let config = test_config(Some("test-gemini-key"));
    let images = ImageProviderChain::from_config(&config.images);
    build_router(Arc::new(ServerResources::with_parts(
        config,
        Some(llm),
        images,
    )))
}

/// Router without any Gemini key
pub fn app_without_key() -> Router {
    build_router(Arc::new(ServerResources::new(test_config(None))))
}

/// Alex: weight loss, beginner, home without equipment, vegetarian
pub fn alex_request() -> UserProfileRequest {
    UserProfileRequest {
        name: Some("Alex".to_owned()),
        age: Some(30.0),
        gender: Some("female".to_owned()),
        height: Some(170.0),
        weight: Some(70.0),
        fitness_goal: Some("weight-loss".to_owned()),
        fitness_level: Some("beginner".to_owned()),
        workout_location: Some("home-no-equipment".to_owned()),
        dietary_preference: Some("vegetarian".to_owned()),
        ..UserProfileRequest::default()
    }
}
