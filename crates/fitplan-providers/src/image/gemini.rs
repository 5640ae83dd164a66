// ABOUTME: Gemini image model provider returning inline base64 PNG data
// ABOUTME: Retries once after a fixed delay when the API answers HTTP 429
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::{
    prompts, require_key, send_json, GeneratedImage, ImageProvider, ImageRequest, ProviderEndpoint,
};
use crate::http_client::shared_client;
use crate::provider_error::{ImageProviderError, ImageProviderResult};

const PROVIDER: &str = "Gemini";
const METHOD: &str = "gemini";
const RETRY_METHOD: &str = "gemini-retry";
const TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: Option<String>,
}

impl GenerateContentResponse {
    /// First inline image payload of the first candidate
    fn into_image_data(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.inline_data.and_then(|inline| inline.data))
            .find(|data| !data.is_empty())
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Gemini image generation
#[derive(Debug, Clone)]
pub struct GeminiImageProvider {
    client: Client,
    endpoint: ProviderEndpoint,
    model: String,
    retry_delay: Duration,
}

impl GeminiImageProvider {
    /// Create a provider for `model` at `endpoint`
    #[must_use]
    pub fn new(endpoint: ProviderEndpoint, model: impl Into<String>, retry_delay: Duration) -> Self {
        Self {
            client: shared_client().clone(),
            endpoint,
            model: model.into(),
            retry_delay,
        }
    }

    async fn request_once(
        &self,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> ImageProviderResult<String> {
        let url = self
            .endpoint
            .url(&format!("/models/{}:generateContent", self.model));

        let request = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .timeout(TIMEOUT)
            .json(body);

        let response: GenerateContentResponse = send_json(PROVIDER, request).await?;
        response
            .into_image_data()
            .ok_or(ImageProviderError::NoImage { provider: PROVIDER })
    }
}

#[async_trait]
impl ImageProvider for GeminiImageProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn method(&self) -> &'static str {
        METHOD
    }

    fn is_configured(&self) -> bool {
        self.endpoint.has_key()
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn attempt(&self, request: &ImageRequest) -> ImageProviderResult<GeneratedImage> {
        let api_key = require_key(PROVIDER, &self.endpoint)?;
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![TextPart {
                    text: prompts::gemini(request),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.8,
                top_k: 40,
                top_p: 0.95,
            },
        };

        match self.request_once(&api_key, &body).await {
            Ok(data) => {
                debug!(size = data.len(), "Gemini image generated");
                Ok(GeneratedImage::from_base64_png(&data, METHOD))
            }
            Err(ImageProviderError::RateLimited { .. }) => {
                warn!(delay = ?self.retry_delay, "Gemini rate limited, retrying once");
                tokio::time::sleep(self.retry_delay).await;
                let data = self.request_once(&api_key, &body).await?;
                Ok(GeneratedImage::from_base64_png(&data, RETRY_METHOD))
            }
            Err(e) => Err(e),
        }
    }
}
