// ABOUTME: Stability AI SDXL text-to-image provider
// ABOUTME: Returns the first base64 artifact as a PNG data URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{
    prompts, require_key, send_json, GeneratedImage, ImageProvider, ImageRequest, ProviderEndpoint,
};
use crate::http_client::shared_client;
use crate::provider_error::{ImageProviderError, ImageProviderResult};

const PROVIDER: &str = "Stability AI";
const METHOD: &str = "stability-ai";
const ENGINE_PATH: &str = "/v1/generation/stable-diffusion-xl-1024-v1-0/text-to-image";
const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct TextToImageRequest {
    text_prompts: Vec<TextPrompt>,
    cfg_scale: u32,
    height: u32,
    width: u32,
    steps: u32,
    samples: u32,
}

#[derive(Debug, Serialize)]
struct TextPrompt {
    text: String,
    weight: u32,
}

#[derive(Debug, Deserialize)]
struct TextToImageResponse {
    #[serde(default)]
    artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    base64: Option<String>,
}

/// Stability AI stable diffusion XL
#[derive(Debug, Clone)]
pub struct StabilityProvider {
    client: Client,
    endpoint: ProviderEndpoint,
}

impl StabilityProvider {
    /// Create a provider for `endpoint`
    #[must_use]
    pub fn new(endpoint: ProviderEndpoint) -> Self {
        Self {
            client: shared_client().clone(),
            endpoint,
        }
    }
}

#[async_trait]
impl ImageProvider for StabilityProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn method(&self) -> &'static str {
        METHOD
    }

    fn is_configured(&self) -> bool {
        self.endpoint.has_key()
    }

    #[instrument(skip(self, request))]
    async fn attempt(&self, request: &ImageRequest) -> ImageProviderResult<GeneratedImage> {
        let api_key = require_key(PROVIDER, &self.endpoint)?;
        let body = TextToImageRequest {
            text_prompts: vec![TextPrompt {
                text: prompts::stability(request),
                weight: 1,
            }],
            cfg_scale: 7,
            height: 1024,
            width: 1024,
            steps: 30,
            samples: 1,
        };

        let http_request = self
            .client
            .post(self.endpoint.url(ENGINE_PATH))
            .bearer_auth(api_key)
            .header("Accept", "application/json")
            .timeout(TIMEOUT)
            .json(&body);

        let response: TextToImageResponse = send_json(PROVIDER, http_request).await?;
        response
            .artifacts
            .into_iter()
            .next()
            .and_then(|artifact| artifact.base64)
            .filter(|data| !data.is_empty())
            .map(|data| GeneratedImage::from_base64_png(&data, METHOD))
            .ok_or(ImageProviderError::NoImage { provider: PROVIDER })
    }
}
