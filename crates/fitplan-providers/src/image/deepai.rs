// ABOUTME: DeepAI text2img provider
// ABOUTME: Authenticates with the Api-Key header and returns the hosted output URL
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

const PROVIDER: &str = "DeepAI";
const METHOD: &str = "deepai";
const TEXT2IMG_PATH: &str = "/api/text2img";
const TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Serialize)]
struct Text2ImgRequest {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Text2ImgResponse {
    output_url: Option<String>,
    url: Option<String>,
}

/// `DeepAI` text-to-image
#[derive(Debug, Clone)]
pub struct DeepAiProvider {
    client: Client,
    endpoint: ProviderEndpoint,
}

impl DeepAiProvider {
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
impl ImageProvider for DeepAiProvider {
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

        let http_request = self
            .client
            .post(self.endpoint.url(TEXT2IMG_PATH))
            .header("Api-Key", api_key)
            .timeout(TIMEOUT)
            .json(&Text2ImgRequest {
                text: prompts::standard(request),
            });

        let response: Text2ImgResponse = send_json(PROVIDER, http_request).await?;
        first_non_empty([response.output_url, response.url])
            .map(|image_url| GeneratedImage {
                image_url,
                method: METHOD,
            })
            .ok_or(ImageProviderError::NoImage { provider: PROVIDER })
    }
}
