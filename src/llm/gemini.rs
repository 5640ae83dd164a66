// ABOUTME: Google Gemini text model provider for plan and quote generation
// ABOUTME: Calls generateContent with camelCase sampling parameters and maps API errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of [`LlmProvider`] for Google's Gemini models.
//!
//! ## Configuration
//!
//! The API key comes from `GEMINI_API_KEY` (or `GOOGLE_GEMINI_API_KEY`) via
//! [`crate::config::ServerConfig`]. `GEMINI_BASE_URL` points the provider at a
//! gateway or a local mock.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{Completion, CompletionRequest, LlmProvider};
use crate::constants::generation::DEFAULT_TEXT_MODEL;
use crate::errors::{AppError, ErrorCode};

/// Plan generation can take a while for 8k-token answers
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini text provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a provider with an API key against the public endpoint
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: fitplan_providers::shared_client().clone(),
            base_url: fitplan_providers::image::defaults::GEMINI_BASE_URL.to_owned(),
            model: DEFAULT_TEXT_MODEL.to_owned(),
        }
    }

    /// Use another API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Model to call
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_request(request: &CompletionRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![TextPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: request.has_sampling().then(|| GenerationConfig {
                temperature: request.temperature,
                top_k: request.top_k,
                top_p: request.top_p,
                max_output_tokens: request.max_tokens,
            }),
        }
    }

    /// Concatenate the text parts of the first candidate
    fn extract_content(response: &GeminiResponse) -> Result<String, AppError> {
        let content = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .ok_or_else(|| AppError::external_service("Gemini", "No content in response"))?;

        Ok(content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect::<String>())
    }

    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("Gemini quota exceeded: {message}"),
            ),
            _ => AppError::external_service("Gemini", format!("HTTP {status}: {message}")),
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, AppError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&Self::build_request(request))
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("Gemini request failed: {e}"),
                )
                .with_source(e)
            })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::external_service("Gemini", format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response");
            AppError::external_service("Gemini", format!("Failed to parse response: {e}"))
        })?;

        if let Some(error) = gemini_response.error.as_ref() {
            return Err(AppError::external_service("Gemini", error.message.clone()));
        }

        let content = Self::extract_content(&gemini_response)?;
        let finish_reason = gemini_response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.clone());

        debug!(chars = content.len(), "Received Gemini response");

        Ok(Completion {
            content,
            model: self.model.clone(),
            finish_reason,
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_parameters_serialize_camel_case() {
        let request = CompletionRequest::new("hi")
            .with_temperature(0.7)
            .with_sampling(40, 0.95)
            .with_max_tokens(8192);
        let json = serde_json::to_value(GeminiProvider::build_request(&request)).unwrap();

        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_rate_limit_maps_to_rate_limited_code() {
        let body = r#"{"error": {"message": "Quota exceeded"}}"#;
        let error = GeminiProvider::map_api_error(429, body);
        assert_eq!(error.code, ErrorCode::ExternalRateLimited);
        assert!(error.message.contains("Quota exceeded"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = GeminiProvider::new("secret-key");
        assert!(!format!("{provider:?}").contains("secret-key"));
    }
}
