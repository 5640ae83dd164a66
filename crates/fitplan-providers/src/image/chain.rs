// ABOUTME: Ordered image provider chain that never fails
// ABOUTME: Tries each configured provider, logs and swallows errors, then falls back to stock photos
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use super::{
    DalleProvider, DeepAiProvider, GeminiImageProvider, GeneratedImage, GetimgProvider,
    ImageKind, ImageProvider, ImageProvidersConfig, ImageRequest, PollinationsProvider,
    ReplicateProvider, StabilityProvider, StockImage, StockImageSelector,
};

/// Method tag reported when a stock photo is returned
pub const STOCK_METHOD: &str = "enhanced-fallback";

const ALL_FAILED: &str = "All AI image generation methods failed";

const TIMED_OUT: &str = "AI image generation timed out";

/// Image response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOutcome {
    /// Always true
    pub success: bool,
    /// Image URL or `data:` URL
    pub image_url: String,
    /// Human-readable description
    pub description: String,
    /// Which provider produced the image
    pub method: String,
    /// Echoed prompt on generated images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Echoed type on generated images
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ImageKind>,
    /// Set on generated images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<bool>,
    /// Set on stock photos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    /// Variety index used for stock photos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<u32>,
    /// Why the stock photo was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageOutcome {
    /// Outcome for an image produced by a provider
    #[must_use]
    pub fn generated(request: &ImageRequest, image: GeneratedImage) -> Self {
        Self {
            success: true,
            image_url: image.image_url,
            description: format!("AI-generated {}: {}", request.kind.subject(), request.prompt),
            method: image.method.to_owned(),
            prompt: Some(request.prompt.clone()),
            kind: Some(request.kind),
            generated: Some(true),
            fallback: None,
            variety: None,
            error: None,
        }
    }

    /// Outcome for a stock photo
    #[must_use]
    pub fn stock(image: StockImage, error: impl Into<String>) -> Self {
        Self {
            success: true,
            image_url: image.url,
            description: image.description,
            method: STOCK_METHOD.to_owned(),
            prompt: None,
            kind: None,
            generated: None,
            fallback: Some(true),
            variety: Some(image.variety),
            error: Some(error.into()),
        }
    }

    /// Whether a stock photo was returned
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback.unwrap_or(false)
    }
}

/// Providers tried in order, then stock photos
pub struct ImageProviderChain {
    providers: Vec<Box<dyn ImageProvider>>,
    stock: StockImageSelector,
    budget: Duration,
}

impl ImageProviderChain {
    /// Chain over explicit providers
    #[must_use]
    pub fn new(providers: Vec<Box<dyn ImageProvider>>) -> Self {
        Self {
            providers,
            stock: StockImageSelector::new(),
            budget: Duration::from_secs(super::defaults::CHAIN_BUDGET_SECS),
        }
    }

    /// Limit the time spent on providers; the shorter of both budgets wins
    #[must_use]
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = self.budget.min(budget);
        self
    }

    /// Time allowed for providers before the stock photo is used
    #[must_use]
    pub const fn budget(&self) -> Duration {
        self.budget
    }

    /// Standard seven-step chain
    #[must_use]
    pub fn from_config(config: &ImageProvidersConfig) -> Self {
        Self::new(vec![
            Box::new(GeminiImageProvider::new(
                config.gemini.clone(),
                config.gemini_model.clone(),
                config.gemini_retry_delay,
            )),
            Box::new(StabilityProvider::new(config.stability.clone())),
            Box::new(GetimgProvider::new(config.getimg.clone())),
            Box::new(PollinationsProvider::new(
                config.pollinations.clone(),
                config.pollinations_enabled,
            )),
            Box::new(DeepAiProvider::new(config.deepai.clone())),
            Box::new(ReplicateProvider::new(
                config.replicate.clone(),
                config.replicate_poll_interval,
                config.replicate_max_polls,
            )),
            Box::new(DalleProvider::new(config.dalle.clone())),
        ])
        .with_budget(config.chain_budget)
    }

    /// Method tags of providers that would be tried, in order
    #[must_use]
    pub fn active_methods(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .filter(|provider| provider.is_configured())
            .map(|provider| provider.method())
            .collect()
    }

    /// Produce an image for `request`
    ///
    /// Never fails: the last resort is a keyword-matched stock photo, also
    /// used when the providers exceed the chain budget.
    #[instrument(skip(self, request), fields(kind = %request.kind))]
    pub async fn generate(&self, request: &ImageRequest) -> ImageOutcome {
        let error = match timeout(self.budget, self.try_providers(request)).await {
            Ok(Some(outcome)) => return outcome,
            Ok(None) => ALL_FAILED,
            Err(_) => {
                warn!(budget_ms = self.budget.as_millis(), "Image providers exceeded budget");
                TIMED_OUT
            }
        };

        let image = self.stock.select(&request.prompt, request.kind);
        info!(
            category = image.category,
            variety = image.variety,
            "All image providers failed, using stock photo"
        );
        ImageOutcome::stock(image, error)
    }

    async fn try_providers(&self, request: &ImageRequest) -> Option<ImageOutcome> {
        for provider in &self.providers {
            if !provider.is_configured() {
                debug!(provider = provider.name(), "Skipping unconfigured image provider");
                continue;
            }

            match provider.attempt(request).await {
                Ok(image) => {
                    info!(provider = provider.name(), method = image.method, "Image generated");
                    return Some(ImageOutcome::generated(request, image));
                }
                Err(e) if e.is_skip() => {
                    debug!(provider = provider.name(), reason = %e, "Image provider skipped");
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "Image provider failed");
                }
            }
        }
        None
    }
}
