// ABOUTME: Shared resource container handed to every HTTP route
// ABOUTME: Holds configuration, the text model provider, the plan generator, and the image chain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared behind an `Arc`. Without a Gemini key the
//! text provider is absent: plan and image routes answer 500 and the quote
//! route serves its static fallback.

// NOTE: All `.clone()` calls in this file are Safe - they are Arc clones used
// to share one provider between the plan generator and the quote route.

use std::sync::Arc;
use std::time::Duration;

use fitplan_providers::ImageProviderChain;
use tracing::info;

use crate::config::environment::ServerConfig;
use crate::llm::GeminiProvider;
use crate::llm::LlmProvider;
use crate::plans::PlanGenerator;

/// Headroom left inside the request timeout for the stock photo answer
const IMAGE_RESPONSE_MARGIN: Duration = Duration::from_millis(500);

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Text model provider, absent without a Gemini key
    pub llm: Option<Arc<dyn LlmProvider>>,
    /// Plan generator over [`Self::llm`]
    pub plan_generator: Option<PlanGenerator>,
    /// Image provider chain
    pub images: Arc<ImageProviderChain>,
}

impl ServerResources {
    /// Build resources from configuration, creating the Gemini text provider
    /// when a key is configured
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let llm = config.gemini.api_key.as_ref().map(|key| {
            Arc::new(
                GeminiProvider::new(key.clone())
                    .with_base_url(&config.gemini.base_url)
                    .with_model(&config.gemini.text_model),
            ) as Arc<dyn LlmProvider>
        });
        let images = ImageProviderChain::from_config(&config.images);
        Self::with_parts(config, llm, images)
    }

    /// Build resources around an explicit text provider and image chain
    #[must_use]
    pub fn with_parts(
        config: ServerConfig,
        llm: Option<Arc<dyn LlmProvider>>,
        images: ImageProviderChain,
    ) -> Self {
        let plan_generator = llm.clone().map(PlanGenerator::new);
        let images = images.with_budget(
            config
                .request_timeout
                .saturating_sub(IMAGE_RESPONSE_MARGIN),
        );

        info!(
            text_model = llm.as_ref().map_or("none", |provider| provider.model()),
            image_methods = ?images.active_methods(),
            image_budget_ms = images.budget().as_millis(),
            "Server resources ready"
        );

        Self {
            config: Arc::new(config),
            llm,
            plan_generator,
            images: Arc::new(images),
        }
    }
}
