// ABOUTME: Replicate stable diffusion provider with bounded status polling
// ABOUTME: Submits a prediction job, then polls until it succeeds, fails, or runs out of budget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::{
    prompts, require_key, send_json, GeneratedImage, ImageProvider, ImageRequest, ProviderEndpoint,
};
use crate::http_client::shared_client;
use crate::provider_error::{ImageProviderError, ImageProviderResult};

const PROVIDER: &str = "Replicate";
const METHOD: &str = "replicate";
const PREDICTIONS_PATH: &str = "/v1/predictions";
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);
const MODEL_VERSION: &str =
    "stability-ai/stable-diffusion:db21e45d3f7023abc2a46ee38a23973f6dce16bb082a930b0c49861f96d1e5bf";

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    version: &'a str,
    input: PredictionInput,
}

#[derive(Debug, Serialize)]
struct PredictionInput {
    prompt: String,
    width: u32,
    height: u32,
    num_outputs: u32,
    guidance_scale: f32,
    num_inference_steps: u32,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    id: Option<String>,
    status: Option<String>,
    output: Option<Vec<String>>,
}

/// Lifecycle state reported by the predictions API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobStatus {
    Pending,
    Succeeded,
    Failed,
    Other,
}

impl JobStatus {
    fn of(prediction: &Prediction) -> Self {
        match prediction.status.as_deref() {
            Some("starting" | "processing") => Self::Pending,
            Some("succeeded") => Self::Succeeded,
            Some("failed" | "canceled") => Self::Failed,
            _ => Self::Other,
        }
    }
}

impl Prediction {
    fn first_output(&self) -> Option<String> {
        self.output
            .as_ref()
            .and_then(|output| output.first())
            .filter(|url| !url.is_empty())
            .cloned()
    }
}

/// Replicate predictions API
#[derive(Debug, Clone)]
pub struct ReplicateProvider {
    client: Client,
    endpoint: ProviderEndpoint,
    poll_interval: Duration,
    max_polls: u32,
}

impl ReplicateProvider {
    /// Create a provider polling every `poll_interval`, at most `max_polls` times
    #[must_use]
    pub fn new(endpoint: ProviderEndpoint, poll_interval: Duration, max_polls: u32) -> Self {
        Self {
            client: shared_client().clone(),
            endpoint,
            poll_interval,
            max_polls,
        }
    }

    async fn submit(&self, api_key: &str, request: &ImageRequest) -> ImageProviderResult<Prediction> {
        let body = PredictionRequest {
            version: MODEL_VERSION,
            input: PredictionInput {
                prompt: prompts::replicate(request),
                width: 512,
                height: 512,
                num_outputs: 1,
                guidance_scale: 7.5,
                num_inference_steps: 50,
            },
        };

        let http_request = self
            .client
            .post(self.endpoint.url(PREDICTIONS_PATH))
            .header("Authorization", format!("Token {api_key}"))
            .timeout(SUBMIT_TIMEOUT)
            .json(&body);

        send_json(PROVIDER, http_request).await
    }

    async fn fetch(&self, api_key: &str, id: &str) -> ImageProviderResult<Prediction> {
        let http_request = self
            .client
            .get(self.endpoint.url(&format!("{PREDICTIONS_PATH}/{id}")))
            .header("Authorization", format!("Token {api_key}"));

        send_json(PROVIDER, http_request).await
    }

    fn finished(prediction: &Prediction) -> Option<ImageProviderResult<GeneratedImage>> {
        match JobStatus::of(prediction) {
            JobStatus::Succeeded => prediction.first_output().map(|image_url| {
                Ok(GeneratedImage {
                    image_url,
                    method: METHOD,
                })
            }),
            JobStatus::Failed => Some(Err(ImageProviderError::JobFailed { provider: PROVIDER })),
            JobStatus::Pending | JobStatus::Other => None,
        }
    }
}

#[async_trait]
impl ImageProvider for ReplicateProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn method(&self) -> &'static str {
        METHOD
    }

    fn is_configured(&self) -> bool {
        self.endpoint.has_key()
    }

    #[instrument(skip(self, request), fields(max_polls = self.max_polls))]
    async fn attempt(&self, request: &ImageRequest) -> ImageProviderResult<GeneratedImage> {
        let api_key = require_key(PROVIDER, &self.endpoint)?;
        let submitted = self.submit(&api_key, request).await?;

        if let Some(result) = Self::finished(&submitted) {
            return result;
        }
        let Some(id) = submitted.id.clone().filter(|id| !id.is_empty()) else {
            return Err(ImageProviderError::NoImage { provider: PROVIDER });
        };
        debug!(prediction_id = %id, "Replicate job submitted");

        let mut status = JobStatus::of(&submitted);
        let mut attempts = 0;
        while status == JobStatus::Pending {
            if attempts >= self.max_polls {
                return Err(ImageProviderError::PollExhausted {
                    provider: PROVIDER,
                    attempts,
                });
            }
            tokio::time::sleep(self.poll_interval).await;
            attempts += 1;

            match self.fetch(&api_key, &id).await {
                Ok(prediction) => {
                    if let Some(result) = Self::finished(&prediction) {
                        return result;
                    }
                    status = JobStatus::of(&prediction);
                }
                Err(e) => warn!(error = %e, attempt = attempts, "Replicate status poll failed"),
            }
        }

        Err(ImageProviderError::NoImage { provider: PROVIDER })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(status: &str, output: Option<Vec<&str>>) -> Prediction {
        Prediction {
            id: Some("abc".to_owned()),
            status: Some(status.to_owned()),
            output: output.map(|o| o.into_iter().map(str::to_owned).collect()),
        }
    }

    #[test]
    fn test_finished_on_success_with_output() {
        let result = ReplicateProvider::finished(&prediction("succeeded", Some(vec!["https://x/1.png"])));
        assert_eq!(result.unwrap().unwrap().image_url, "https://x/1.png");
    }

    #[test]
    fn test_pending_is_not_finished() {
        assert!(ReplicateProvider::finished(&prediction("processing", None)).is_none());
    }

    #[test]
    fn test_failed_job_is_error() {
        let result = ReplicateProvider::finished(&prediction("failed", None)).unwrap();
        assert!(matches!(result, Err(ImageProviderError::JobFailed { .. })));
    }
}
