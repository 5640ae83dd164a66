// ABOUTME: Text model abstraction used for plan and quote generation
// ABOUTME: Defines the provider contract, the prompt request, and sampling parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! Plan and quote generation only need single-shot completions, so the
//! contract is one async `complete` call. Tests substitute their own
//! implementation to script model output.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitplan_server::llm::{CompletionRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = CompletionRequest::new("Say hello").with_temperature(0.7);
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod gemini;
pub mod prompts;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ============================================================================
// Request/Response Types
// ============================================================================

/// A single-turn prompt with optional sampling parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Prompt text sent as the user turn
    pub prompt: String,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Top-k sampling
    pub top_k: Option<u32>,
    /// Nucleus sampling
    pub top_p: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Request for `prompt` with provider-default sampling
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set top-k and top-p sampling
    #[must_use]
    pub const fn with_sampling(mut self, top_k: u32, top_p: f32) -> Self {
        self.top_k = Some(top_k);
        self.top_p = Some(top_p);
        self
    }

    /// Set the maximum tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Whether any sampling parameter was set
    #[must_use]
    pub const fn has_sampling(&self) -> bool {
        self.temperature.is_some()
            || self.top_k.is_some()
            || self.top_p.is_some()
            || self.max_tokens.is_some()
    }
}

/// Text produced by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text
    pub content: String,
    /// Model that answered
    pub model: String,
    /// Finish reason reported by the provider
    pub finish_reason: Option<String>,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Text model provider
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Model every request is sent to
    fn model(&self) -> &str;

    /// Perform a completion
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, AppError>;
}
