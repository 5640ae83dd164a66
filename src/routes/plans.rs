// ABOUTME: Plan generation route turning a submitted profile into a seven-day plan
// ABOUTME: Validates the profile, requires a Gemini key, and never fails once the model is called
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan generation routes
//!
//! Input errors are answered with 400 and a missing Gemini key with 500.
//! Past those checks the handler always returns a plan: model failures and
//! unusable model output are replaced by the deterministic fallback plan.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::json::ApiJson;
use crate::errors::AppError;
use crate::models::{FitnessPlan, UserProfileRequest};
use crate::resources::ServerResources;

/// `POST /api/generate-plan` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Always true
    pub success: bool,
    /// Generated or fallback plan
    pub plan: FitnessPlan,
}

/// Plan routes
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/generate-plan", post(Self::handle_generate_plan))
            .with_state(resources)
    }

    /// Handle plan generation
    async fn handle_generate_plan(
        State(resources): State<Arc<ServerResources>>,
        ApiJson(request): ApiJson<UserProfileRequest>,
    ) -> Result<Json<PlanResponse>, AppError> {
        let profile = request.validate()?;

        let generator = resources
            .plan_generator
            .as_ref()
            .ok_or_else(|| AppError::config_missing("Gemini API key not configured"))?;

        info!(user = %profile.name, goal = %profile.fitness_goal, "Generating fitness plan");
        let generated = generator.generate(&profile).await;

        Ok(Json(PlanResponse {
            success: true,
            plan: generated.plan,
        }))
    }
}
