// ABOUTME: Advisory text-to-speech route that validates and echoes its input
// ABOUTME: Returns no audio, telling clients to synthesize speech locally
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::json::ApiJson;
use crate::constants::speech::{CLIENT_FALLBACK_MESSAGE, DEFAULT_LANGUAGE, DEFAULT_VOICE};
use crate::errors::AppError;

/// `POST /api/text-to-speech` request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Text to speak
    #[serde(default)]
    pub text: Option<String>,
    /// Voice name, `Zephyr` when absent
    #[serde(default)]
    pub voice: Option<String>,
    /// BCP 47 language tag, `en-US` when absent
    #[serde(default)]
    pub language: Option<String>,
}

/// `POST /api/text-to-speech` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponse {
    /// Always true
    pub success: bool,
    /// Audio location; always null since synthesis happens on the client
    pub audio_url: Option<String>,
    /// Echoed text
    pub text: String,
    /// Resolved voice
    pub voice: String,
    /// Resolved language
    pub language: String,
    /// Advice for the client
    pub message: String,
}

/// Speech routes
pub struct SpeechRoutes;

impl SpeechRoutes {
    /// Create all speech routes
    pub fn routes() -> Router {
        Router::new().route("/api/text-to-speech", post(Self::handle_text_to_speech))
    }

    async fn handle_text_to_speech(
        ApiJson(request): ApiJson<SpeechRequest>,
    ) -> Result<Json<SpeechResponse>, AppError> {
        let text = request
            .text
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AppError::missing_fields("Text is required"))?;

        let pick = |value: Option<String>, default: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        Ok(Json(SpeechResponse {
            success: true,
            audio_url: None,
            text,
            voice: pick(request.voice, DEFAULT_VOICE),
            language: pick(request.language, DEFAULT_LANGUAGE),
            message: CLIENT_FALLBACK_MESSAGE.to_owned(),
        }))
    }
}
