// ABOUTME: Image provider contract, request and result types, and provider configuration
// ABOUTME: Hosts the seven provider strategies, the fallback chain, and stock photo selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Image Providers
//!
//! ## Key Concepts
//!
//! - **`ImageProvider`**: one external image service behind a uniform
//!   `attempt` call
//! - **`ImageProviderChain`**: tries providers in order and falls back to
//!   [`StockImageSelector`]
//! - **`ProviderEndpoint`**: base URL plus optional API key; placeholder keys
//!   are treated as absent

mod chain;
mod dalle;
mod deepai;
mod gemini;
mod getimg;
mod pollinations;
/// Prompt templates per provider
pub mod prompts;
mod replicate;
mod stability;
mod stock;

pub use chain::{ImageOutcome, ImageProviderChain};
pub use dalle::DalleProvider;
pub use deepai::DeepAiProvider;
pub use gemini::GeminiImageProvider;
pub use getimg::GetimgProvider;
pub use pollinations::PollinationsProvider;
pub use replicate::ReplicateProvider;
pub use stability::StabilityProvider;
pub use stock::{StockImage, StockImageSelector};

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::provider_error::{ImageProviderError, ImageProviderResult};

/// Keys shipped in sample configuration that must never be sent upstream
const PLACEHOLDER_KEYS: &[&str] = &[
    "demo-key",
    "REPLACE_WITH_YOUR_KEY",
    "sk-REPLACE_WITH_YOUR_KEY",
    "quickstart-QUdJIGlzIGNvbWluZy4uLi4K",
];

/// Longest error body kept in a [`ImageProviderError::Status`]
const MAX_ERROR_BODY_CHARS: usize = 300;

// ============================================================================
// Request / Result Types
// ============================================================================

/// What the image should depict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// A person performing an exercise
    #[default]
    Exercise,
    /// A plated meal
    Meal,
}

impl ImageKind {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exercise => "exercise",
            Self::Meal => "meal",
        }
    }

    /// Parse a wire string
    #[must_use]
    pub fn parse_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "exercise" => Some(Self::Exercise),
            "meal" => Some(Self::Meal),
            _ => None,
        }
    }

    /// Phrase used in generated image descriptions
    #[must_use]
    pub const fn subject(&self) -> &'static str {
        match self {
            Self::Exercise => "exercise demonstration",
            Self::Meal => "meal visualization",
        }
    }
}

impl Display for ImageKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// One image request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Exercise or meal name as typed by the user
    pub prompt: String,
    /// Subject category
    pub kind: ImageKind,
}

impl ImageRequest {
    /// Create a request
    #[must_use]
    pub fn new(prompt: impl Into<String>, kind: ImageKind) -> Self {
        Self {
            prompt: prompt.into(),
            kind,
        }
    }
}

/// Image produced by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Remote URL or `data:` URL
    pub image_url: String,
    /// Method tag reported to the client
    pub method: &'static str,
}

impl GeneratedImage {
    /// Wrap base64 PNG bytes in a `data:` URL
    #[must_use]
    pub fn from_base64_png(data: &str, method: &'static str) -> Self {
        Self {
            image_url: format!("data:image/png;base64,{data}"),
            method,
        }
    }
}

// ============================================================================
// Provider Trait
// ============================================================================

/// One external image generation service
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Human-readable provider name for logs
    fn name(&self) -> &'static str;

    /// Method tag reported on success
    fn method(&self) -> &'static str;

    /// Whether the provider has what it needs to make a call
    fn is_configured(&self) -> bool;

    /// Try to produce one image
    async fn attempt(&self, request: &ImageRequest) -> ImageProviderResult<GeneratedImage>;
}

// ============================================================================
// Configuration
// ============================================================================

/// Base URL and API key for one provider
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Usable API key, if any
    pub api_key: Option<String>,
}

impl ProviderEndpoint {
    /// Endpoint without a key
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: None,
        }
    }

    /// Attach a key, dropping blanks and known placeholders
    #[must_use]
    pub fn with_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !is_placeholder_key(key));
        self
    }

    /// Join the base URL and a path starting with `/`
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Whether a usable key is present
    #[must_use]
    pub const fn has_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Debug for ProviderEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ProviderEndpoint")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Whether a key is blank or a sample placeholder
#[must_use]
pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    key.is_empty() || PLACEHOLDER_KEYS.contains(&key)
}

/// Settings for every provider in the chain
#[derive(Debug, Clone)]
pub struct ImageProvidersConfig {
    /// Gemini generative language API
    pub gemini: ProviderEndpoint,
    /// Gemini image model name
    pub gemini_model: String,
    /// Wait before the single retry after HTTP 429
    pub gemini_retry_delay: Duration,
    /// Stability AI
    pub stability: ProviderEndpoint,
    /// Getimg.ai
    pub getimg: ProviderEndpoint,
    /// Pollinations image URL host
    pub pollinations: ProviderEndpoint,
    /// Whether the keyless Pollinations step runs
    pub pollinations_enabled: bool,
    /// DeepAI
    pub deepai: ProviderEndpoint,
    /// Replicate
    pub replicate: ProviderEndpoint,
    /// Delay between Replicate status polls
    pub replicate_poll_interval: Duration,
    /// Maximum Replicate status polls
    pub replicate_max_polls: u32,
    /// `OpenAI` images API
    pub dalle: ProviderEndpoint,
    /// Time allowed for the whole chain before the stock photo is used
    pub chain_budget: Duration,
}

/// Default public endpoints
pub mod defaults {
    /// Gemini generative language API
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Stability AI
    pub const STABILITY_BASE_URL: &str = "https://api.stability.ai";
    /// Getimg.ai
    pub const GETIMG_BASE_URL: &str = "https://api.getimg.ai";
    /// Pollinations
    pub const POLLINATIONS_BASE_URL: &str = "https://image.pollinations.ai";
    /// `DeepAI`
    pub const DEEPAI_BASE_URL: &str = "https://api.deepai.org";
    /// Replicate
    pub const REPLICATE_BASE_URL: &str = "https://api.replicate.com";
    /// `OpenAI`
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
    /// Gemini 429 retry delay in milliseconds
    pub const GEMINI_RETRY_DELAY_MS: u64 = 2_000;
    /// Replicate poll interval in milliseconds
    pub const REPLICATE_POLL_INTERVAL_MS: u64 = 1_000;
    /// Replicate poll budget
    pub const REPLICATE_MAX_POLLS: u32 = 30;
    /// Whole-chain budget in seconds
    pub const CHAIN_BUDGET_SECS: u64 = 150;
}

impl Default for ImageProvidersConfig {
    fn default() -> Self {
        Self {
            gemini: ProviderEndpoint::new(defaults::GEMINI_BASE_URL),
            gemini_model: fitplan_core::constants::generation::DEFAULT_IMAGE_MODEL.to_owned(),
            gemini_retry_delay: Duration::from_millis(defaults::GEMINI_RETRY_DELAY_MS),
            stability: ProviderEndpoint::new(defaults::STABILITY_BASE_URL),
            getimg: ProviderEndpoint::new(defaults::GETIMG_BASE_URL),
            pollinations: ProviderEndpoint::new(defaults::POLLINATIONS_BASE_URL),
            pollinations_enabled: true,
            deepai: ProviderEndpoint::new(defaults::DEEPAI_BASE_URL),
            replicate: ProviderEndpoint::new(defaults::REPLICATE_BASE_URL),
            replicate_poll_interval: Duration::from_millis(defaults::REPLICATE_POLL_INTERVAL_MS),
            replicate_max_polls: defaults::REPLICATE_MAX_POLLS,
            dalle: ProviderEndpoint::new(defaults::OPENAI_BASE_URL),
            chain_budget: Duration::from_secs(defaults::CHAIN_BUDGET_SECS),
        }
    }
}

// ============================================================================
// HTTP helpers
// ============================================================================

/// Send a request and decode a JSON body, mapping failures per provider
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> ImageProviderResult<T> {
    let response = request
        .send()
        .await
        .map_err(|source| ImageProviderError::Transport { provider, source })?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ImageProviderError::RateLimited { provider });
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ImageProviderError::Status {
            provider,
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| ImageProviderError::Transport { provider, source })?;
    serde_json::from_str(&body).map_err(|e| ImageProviderError::Decode {
        provider,
        reason: e.to_string(),
    })
}

/// Require a usable key or report the provider as not configured
pub(crate) fn require_key(
    provider: &'static str,
    endpoint: &ProviderEndpoint,
) -> ImageProviderResult<String> {
    endpoint
        .api_key
        .clone()
        .ok_or(ImageProviderError::NotConfigured { provider })
}

/// First non-empty string among candidates
pub(crate) fn first_non_empty(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}
