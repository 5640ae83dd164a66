// ABOUTME: Image generation route for exercise and meal illustrations
// ABOUTME: Runs the provider chain, which always ends in a stock photo, after validating input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Image generation routes
//!
//! The response is always 200 once the request is accepted. Which provider
//! answered is reported in `method`; `enhanced-fallback` marks a stock photo.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, routing::post, Json, Router};
use fitplan_providers::{ImageKind, ImageOutcome, ImageRequest};
use serde::{Deserialize, Serialize};

use super::json::ApiJson;
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// `POST /api/generate-image` request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    /// What to depict
    #[serde(default)]
    pub prompt: Option<String>,
    /// `exercise` (default); any other value is treated as `meal`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ImageGenerationRequest {
    /// Validate into a provider request
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for a blank prompt
    pub fn validate(self) -> Result<ImageRequest, AppError> {
        let prompt = self
            .prompt
            .map(|prompt| prompt.trim().to_owned())
            .filter(|prompt| !prompt.is_empty())
            .ok_or_else(|| AppError::missing_fields("Prompt is required"))?;

        let kind = match self.kind.as_deref().map(str::trim) {
            None | Some("") => ImageKind::default(),
            Some(kind) => ImageKind::parse_str(kind).unwrap_or(ImageKind::Meal),
        };

        Ok(ImageRequest::new(prompt, kind))
    }
}

/// Image routes
pub struct ImageRoutes;

impl ImageRoutes {
    /// Create all image routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/generate-image", post(Self::handle_generate_image))
            .with_state(resources)
    }

    /// Handle image generation
    async fn handle_generate_image(
        State(resources): State<Arc<ServerResources>>,
        ApiJson(request): ApiJson<ImageGenerationRequest>,
    ) -> Result<Json<ImageOutcome>, AppError> {
        let request = request.validate()?;

        if !resources.config.gemini.is_configured() {
            return Err(AppError::config_missing("Gemini API key not configured"));
        }

        let started = Instant::now();
        let outcome = resources.images.generate(&request).await;
        AppLogger::log_image_outcome(
            request.kind.as_str(),
            &outcome.method,
            outcome.is_fallback(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );

        Ok(Json(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn request(prompt: Option<&str>, kind: Option<&str>) -> ImageGenerationRequest {
        ImageGenerationRequest {
            prompt: prompt.map(ToOwned::to_owned),
            kind: kind.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn test_type_defaults_to_exercise() {
        let validated = request(Some(" push-ups "), None).validate().unwrap();
        assert_eq!(validated.prompt, "push-ups");
        assert_eq!(validated.kind, ImageKind::Exercise);
    }

    #[test]
    fn test_blank_prompt_rejected() {
        let err = request(Some("   "), Some("meal")).validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
    }

    #[test]
    fn test_unknown_type_treated_as_meal() {
        let validated = request(Some("trail mix"), Some("snack")).validate().unwrap();
        assert_eq!(validated.kind, ImageKind::Meal);
        let validated = request(Some("lunges"), Some(" Exercise ")).validate().unwrap();
        assert_eq!(validated.kind, ImageKind::Exercise);
    }
}
