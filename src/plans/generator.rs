// ABOUTME: Requests a weekly plan from the text model and validates the answer
// ABOUTME: Never fails: model errors and unusable answers yield the deterministic fallback plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument, warn};

use super::fallback::fallback_plan;
use super::validator::{parse_or_default, PlanRejection};
use crate::constants::generation::{
    PLAN_MAX_OUTPUT_TOKENS, PLAN_TEMPERATURE, PLAN_TOP_K, PLAN_TOP_P,
};
use crate::llm::prompts::plan_prompt;
use crate::llm::{CompletionRequest, LlmProvider};
use crate::logging::AppLogger;
use crate::models::{FitnessPlan, UserProfile};

/// Where a returned plan came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    /// Parsed from the model answer
    Model,
    /// Built by the fallback template
    Fallback,
}

impl PlanSource {
    /// Label used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Fallback => "fallback",
        }
    }
}

/// A plan with its provenance
#[derive(Debug)]
pub struct GeneratedPlan {
    /// The plan to return
    pub plan: FitnessPlan,
    /// Model or fallback
    pub source: PlanSource,
    /// Why the model answer was not used
    pub rejection: Option<PlanRejection>,
}

/// Plan requester over any text model
#[derive(Clone)]
pub struct PlanGenerator {
    llm: Arc<dyn LlmProvider>,
}

impl PlanGenerator {
    /// Generator using the provider's default model
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    fn request_for(profile: &UserProfile) -> CompletionRequest {
        CompletionRequest::new(plan_prompt(profile))
            .with_temperature(PLAN_TEMPERATURE)
            .with_sampling(PLAN_TOP_K, PLAN_TOP_P)
            .with_max_tokens(PLAN_MAX_OUTPUT_TOKENS)
    }

    /// Produce a plan for `profile`
    #[instrument(skip(self, profile), fields(provider = self.llm.name()))]
    pub async fn generate(&self, profile: &UserProfile) -> GeneratedPlan {
        let started = Instant::now();

        let generated = match self.llm.complete(&Self::request_for(profile)).await {
            Ok(response) => {
                debug!(
                    preview = %response.content.chars().take(500).collect::<String>(),
                    "Model answered plan request"
                );
                let (plan, rejection) =
                    parse_or_default(&response.content, || fallback_plan(profile));
                if let Some(reason) = &rejection {
                    warn!(reason = %reason, "Model plan rejected, using fallback plan");
                }
                GeneratedPlan {
                    plan,
                    source: if rejection.is_some() {
                        PlanSource::Fallback
                    } else {
                        PlanSource::Model
                    },
                    rejection,
                }
            }
            Err(e) => {
                warn!(error = %e, "Plan request failed, using fallback plan");
                GeneratedPlan {
                    plan: fallback_plan(profile),
                    source: PlanSource::Fallback,
                    rejection: Some(PlanRejection::ModelUnavailable(e.message)),
                }
            }
        };

        let reason = generated.rejection.as_ref().map(ToString::to_string);
        AppLogger::log_plan_outcome(
            &profile.name,
            generated.source.as_str(),
            reason.as_deref(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        generated
    }
}
