// ABOUTME: OpenAI DALL-E 3 image generation provider
// ABOUTME: Last external step before the stock photo fallback
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

const PROVIDER: &str = "DALL-E";
const METHOD: &str = "dalle";
const GENERATIONS_PATH: &str = "/v1/images/generations";
const TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: String,
    size: &'a str,
    quality: &'a str,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedData>,
}

#[derive(Debug, Deserialize)]
struct GeneratedData {
    url: Option<String>,
}

/// `OpenAI` DALL-E 3
#[derive(Debug, Clone)]
pub struct DalleProvider {
    client: Client,
    endpoint: ProviderEndpoint,
}

impl DalleProvider {
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
impl ImageProvider for DalleProvider {
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
        let body = GenerationRequest {
            model: "dall-e-3",
            prompt: prompts::dalle(request),
            size: "512x512",
            quality: "standard",
            n: 1,
        };

        let http_request = self
            .client
            .post(self.endpoint.url(GENERATIONS_PATH))
            .bearer_auth(api_key)
            .timeout(TIMEOUT)
            .json(&body);

        let response: GenerationResponse = send_json(PROVIDER, http_request).await?;
        response
            .data
            .into_iter()
            .next()
            .and_then(|item| item.url)
            .filter(|url| !url.is_empty())
            .map(|image_url| GeneratedImage {
                image_url,
                method: METHOD,
            })
            .ok_or(ImageProviderError::NoImage { provider: PROVIDER })
    }
}
