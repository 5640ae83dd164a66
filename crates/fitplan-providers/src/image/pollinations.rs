// ABOUTME: Pollinations keyless image provider
// ABOUTME: Builds a render-on-fetch URL locally without any network call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::{prompts, GeneratedImage, ImageProvider, ImageRequest, ProviderEndpoint};
use crate::provider_error::{ImageProviderError, ImageProviderResult};

const PROVIDER: &str = "Pollinations";
const METHOD: &str = "pollinations-ai";

/// Pollinations URL builder
///
/// The image is rendered by Pollinations when the client fetches the URL, so
/// the attempt itself always succeeds while the provider is enabled.
#[derive(Debug, Clone)]
pub struct PollinationsProvider {
    endpoint: ProviderEndpoint,
    enabled: bool,
}

impl PollinationsProvider {
    /// Create a provider for `endpoint`
    #[must_use]
    pub const fn new(endpoint: ProviderEndpoint, enabled: bool) -> Self {
        Self { endpoint, enabled }
    }

    /// Image URL for `request` with the given cache-busting seed
    #[must_use]
    pub fn image_url(&self, request: &ImageRequest, seed: i64) -> String {
        let encoded = urlencoding::encode(&prompts::pollinations(request)).into_owned();
        self.endpoint.url(&format!(
            "/prompt/{encoded}?width=512&height=512&nologo=true&seed={seed}"
        ))
    }
}

#[async_trait]
impl ImageProvider for PollinationsProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn method(&self) -> &'static str {
        METHOD
    }

    fn is_configured(&self) -> bool {
        self.enabled
    }

    async fn attempt(&self, request: &ImageRequest) -> ImageProviderResult<GeneratedImage> {
        if !self.enabled {
            return Err(ImageProviderError::Disabled { provider: PROVIDER });
        }
        let image_url = self.image_url(request, Utc::now().timestamp_millis());
        debug!(url_len = image_url.len(), "Pollinations URL built");
        Ok(GeneratedImage {
            image_url,
            method: METHOD,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageKind;

    #[test]
    fn test_url_is_percent_encoded() {
        let provider = PollinationsProvider::new(
            ProviderEndpoint::new("https://image.pollinations.ai"),
            true,
        );
        let url = provider.image_url(&ImageRequest::new("Push-ups", ImageKind::Exercise), 42);
        assert!(url.starts_with(
            "https://image.pollinations.ai/prompt/professional%20fitness%20photograph%2C%20Push-ups"
        ));
        assert!(url.ends_with("?width=512&height=512&nologo=true&seed=42"));
    }
}
