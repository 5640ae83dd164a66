// ABOUTME: HTTP client for the FitPlan API used by the terminal client
// ABOUTME: Decodes success bodies and turns error bodies back into AppError values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use fitplan_providers::{ImageKind, ImageOutcome};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
use crate::models::{FitnessPlan, UserProfileRequest};
use crate::routes::{
    ImageGenerationRequest, PlanResponse, QuoteResponse, SpeechRequest, SpeechResponse,
};
use crate::speech::RemoteSpeech;

/// Server address used when neither a flag nor `FITPLAN_SERVER_URL` names one
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8081";

/// Client-side timeout, above the server's own request timeout
const CLIENT_TIMEOUT: Duration = Duration::from_secs(200);

/// FitPlan API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Client for the server at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(CLIENT_TIMEOUT)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// Client for `server_url`, else `FITPLAN_SERVER_URL`, else localhost
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn from_env(server_url: Option<String>) -> AppResult<Self> {
        let base_url = server_url
            .or_else(|| env::var("FITPLAN_SERVER_URL").ok())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_owned());
        Self::new(base_url)
    }

    /// Server base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate a plan for `profile`
    ///
    /// # Errors
    ///
    /// Returns the server's error for invalid profiles or missing
    /// configuration, or an error if the server is unreachable
    #[instrument(skip(self, profile))]
    pub async fn generate_plan(&self, profile: &UserProfileRequest) -> AppResult<FitnessPlan> {
        let response: PlanResponse = self.post("/api/generate-plan", profile).await?;
        Ok(response.plan)
    }

    /// Generate an image for an exercise or meal
    ///
    /// # Errors
    ///
    /// Returns the server's error for a blank prompt or missing
    /// configuration, or an error if the server is unreachable
    #[instrument(skip(self))]
    pub async fn generate_image(&self, prompt: &str, kind: ImageKind) -> AppResult<ImageOutcome> {
        let request = ImageGenerationRequest {
            prompt: Some(prompt.to_owned()),
            kind: Some(kind.as_str().to_owned()),
        };
        self.post("/api/generate-image", &request).await
    }

    /// Fetch a motivational quote
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable
    pub async fn motivational_quote(&self) -> AppResult<String> {
        let response: QuoteResponse = self.get("/api/motivational-quote").await?;
        Ok(response.quote)
    }

    /// Ask the server to prepare speech for `text`
    ///
    /// # Errors
    ///
    /// Returns the server's error for blank text, or an error if the server
    /// is unreachable
    pub async fn text_to_speech(
        &self,
        text: &str,
        voice: &str,
        language: &str,
    ) -> AppResult<SpeechResponse> {
        let request = SpeechRequest {
            text: Some(text.to_owned()),
            voice: Some(voice.to_owned()),
            language: Some(language.to_owned()),
        };
        self.post("/api/text-to-speech", &request).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .map_err(|e| self.unreachable(&e))?;
        Self::decode(response).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| self.unreachable(&e))?;
        Self::decode(response).await
    }

    fn unreachable(&self, error: &reqwest::Error) -> AppError {
        AppError::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("FitPlan server unreachable at {}: {error}", self.base_url),
        )
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::external_service("FitPlan server", format!("Failed to read response: {e}"))
        })?;
        debug!(status = status.as_u16(), bytes = body.len(), "FitPlan server answered");

        if status.is_success() {
            return serde_json::from_str(&body).map_err(AppError::from);
        }

        Err(serde_json::from_str::<ErrorResponse>(&body).map_or_else(
            |_| {
                AppError::external_service(
                    "FitPlan server",
                    format!("HTTP {status}: {}", body.chars().take(300).collect::<String>()),
                )
            },
            |error| AppError::new(error.error.code, error.error.message),
        ))
    }
}

#[async_trait]
impl RemoteSpeech for ApiClient {
    async fn audio_for(
        &self,
        text: &str,
        voice: &str,
        language: &str,
    ) -> Result<Option<String>, AppError> {
        Ok(self.text_to_speech(text, voice, language).await?.audio_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:9000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_explicit_url_wins() {
        let client = ApiClient::from_env(Some("http://fitplan.test".to_owned())).unwrap();
        assert_eq!(client.base_url(), "http://fitplan.test");
    }
}
