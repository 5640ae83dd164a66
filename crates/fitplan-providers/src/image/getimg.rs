// ABOUTME: Getimg.ai stable diffusion provider
// ABOUTME: Requests a hosted image URL rather than inline bytes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{
    first_non_empty, prompts, require_key, send_json, GeneratedImage, ImageProvider, ImageRequest,
    ProviderEndpoint,
};
use crate::http_client::shared_client;
use crate::provider_error::{ImageProviderError, ImageProviderResult};

const PROVIDER: &str = "Getimg.ai";
const METHOD: &str = "getimg-ai";
const TEXT_TO_IMAGE_PATH: &str = "/v1/stable-diffusion/text-to-image";
const TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Serialize)]
struct TextToImageRequest<'a> {
    prompt: String,
    model: &'a str,
    size: &'a str,
    output_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TextToImageResponse {
    url: Option<String>,
    image: Option<String>,
}

/// Getimg.ai text-to-image
#[derive(Debug, Clone)]
pub struct GetimgProvider {
    client: Client,
    endpoint: ProviderEndpoint,
}

impl GetimgProvider {
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
impl ImageProvider for GetimgProvider {
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
            prompt: prompts::standard(request),
            model: "stable-diffusion-v1-5",
            size: "512x512",
            output_format: "url",
        };

        let http_request = self
            .client
            .post(self.endpoint.url(TEXT_TO_IMAGE_PATH))
            .bearer_auth(api_key)
            .timeout(TIMEOUT)
            .json(&body);

        let response: TextToImageResponse = send_json(PROVIDER, http_request).await?;
        first_non_empty([response.url, response.image])
            .map(|image_url| GeneratedImage {
                image_url,
                method: METHOD,
            })
            .ok_or(ImageProviderError::NoImage { provider: PROVIDER })
    }
}
