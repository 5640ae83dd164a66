// ABOUTME: Environment configuration for the FitPlan server
// ABOUTME: Parses ports, AI provider keys and endpoints, timeouts, and CORS origins from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env::{self, VarError};
use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use fitplan_providers::image::{defaults, is_placeholder_key};
use fitplan_providers::{ImageProvidersConfig, ProviderEndpoint};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::generation::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default server-wide request timeout
///
/// Plan generation waits on a model answer of up to 8k tokens and the image
/// chain may poll Replicate for 30 s, so this stays generous.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 180;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Gemini text model settings
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key, absent when unset or a placeholder
    pub api_key: Option<String>,
    /// Model used for plans and quotes
    pub text_model: String,
    /// API base URL
    pub base_url: String,
}

impl GeminiConfig {
    /// Whether a usable key is configured
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("text_model", &self.text_model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Outbound HTTP client timeouts
#[derive(Debug, Clone, Copy)]
pub struct HttpClientConfig {
    /// Overall request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Text model settings
    pub gemini: GeminiConfig,
    /// Image provider chain settings
    pub images: ImageProvidersConfig,
    /// Outbound HTTP client timeouts
    pub http_client: HttpClientConfig,
    /// Server-wide request timeout
    pub request_timeout: Duration,
    /// Allowed CORS origins, `*` for any
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable does not parse
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let port = env::var("HTTP_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| DEFAULT_HTTP_PORT.to_string());

        let gemini_key = api_key(&["GEMINI_API_KEY", "GOOGLE_GEMINI_API_KEY"]);
        let gemini_base_url = env_var_or("GEMINI_BASE_URL", defaults::GEMINI_BASE_URL)?;

        let images = ImageProvidersConfig {
            gemini: ProviderEndpoint::new(&gemini_base_url).with_key(gemini_key.clone()),
            gemini_model: env_var_or("GEMINI_IMAGE_MODEL", DEFAULT_IMAGE_MODEL)?,
            gemini_retry_delay: Duration::from_millis(
                env_var_or(
                    "GEMINI_RETRY_DELAY_MS",
                    &defaults::GEMINI_RETRY_DELAY_MS.to_string(),
                )?
                .parse()
                .context("Invalid GEMINI_RETRY_DELAY_MS value")?,
            ),
            stability: endpoint("STABILITY", defaults::STABILITY_BASE_URL)?,
            getimg: endpoint("GETIMG", defaults::GETIMG_BASE_URL)?,
            pollinations: ProviderEndpoint::new(env_var_or(
                "POLLINATIONS_BASE_URL",
                defaults::POLLINATIONS_BASE_URL,
            )?),
            pollinations_enabled: env_var_or("POLLINATIONS_ENABLED", "true")?
                .parse()
                .context("Invalid POLLINATIONS_ENABLED value")?,
            deepai: endpoint("DEEPAI", defaults::DEEPAI_BASE_URL)?,
            replicate: endpoint("REPLICATE", defaults::REPLICATE_BASE_URL)?,
            replicate_poll_interval: Duration::from_millis(
                env_var_or(
                    "REPLICATE_POLL_INTERVAL_MS",
                    &defaults::REPLICATE_POLL_INTERVAL_MS.to_string(),
                )?
                .parse()
                .context("Invalid REPLICATE_POLL_INTERVAL_MS value")?,
            ),
            replicate_max_polls: env_var_or(
                "REPLICATE_MAX_POLLS",
                &defaults::REPLICATE_MAX_POLLS.to_string(),
            )?
            .parse()
            .context("Invalid REPLICATE_MAX_POLLS value")?,
            dalle: ProviderEndpoint::new(env_var_or("OPENAI_BASE_URL", defaults::OPENAI_BASE_URL)?)
                .with_key(api_key(&["OPENAI_API_KEY"])),
            chain_budget: Duration::from_secs(
                env_var_or(
                    "IMAGE_CHAIN_BUDGET_SECS",
                    &defaults::CHAIN_BUDGET_SECS.to_string(),
                )?
                .parse()
                .context("Invalid IMAGE_CHAIN_BUDGET_SECS value")?,
            ),
        };

        let config = Self {
            host: env_var_or("HOST", "0.0.0.0")?,
            http_port: port.parse().context("Invalid HTTP_PORT value")?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )?),
            gemini: GeminiConfig {
                api_key: gemini_key,
                text_model: env_var_or("GEMINI_TEXT_MODEL", DEFAULT_TEXT_MODEL)?,
                base_url: gemini_base_url,
            },
            images,
            http_client: HttpClientConfig {
                timeout_secs: env_var_or("HTTP_CLIENT_TIMEOUT_SECS", "60")?
                    .parse()
                    .context("Invalid HTTP_CLIENT_TIMEOUT_SECS value")?,
                connect_timeout_secs: env_var_or("HTTP_CLIENT_CONNECT_TIMEOUT_SECS", "10")?
                    .parse()
                    .context("Invalid HTTP_CLIENT_CONNECT_TIMEOUT_SECS value")?,
            },
            request_timeout: Duration::from_secs(
                env_var_or(
                    "REQUEST_TIMEOUT_SECS",
                    &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
                )?
                .parse()
                .context("Invalid REQUEST_TIMEOUT_SECS value")?,
            ),
            cors_allowed_origins: parse_origins(&env_var_or("CORS_ALLOWED_ORIGINS", "*")?),
        };

        config.validate();
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Warn about settings that leave features degraded
    fn validate(&self) {
        if !self.gemini.is_configured() {
            warn!("GEMINI_API_KEY is not set: plan and image endpoints will answer 500");
        }
        if self.environment.is_production() && self.cors_allowed_origins == ["*"] {
            warn!("CORS allows any origin in production");
        }
    }

    /// Socket address string for binding
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let enabled = |on: bool| if on { "Enabled" } else { "Disabled" };
        format!(
            "FitPlan Server Configuration:\n\
             - Address: {}\n\
             - Environment: {}\n\
             - Gemini: {} ({})\n\
             - Stability AI: {}\n\
             - Getimg.ai: {}\n\
             - Pollinations: {}\n\
             - DeepAI: {}\n\
             - Replicate: {}\n\
             - DALL-E: {}\n\
             - Request Timeout: {}s\n\
             - CORS Origins: {}",
            self.bind_address(),
            self.environment,
            enabled(self.gemini.is_configured()),
            self.gemini.text_model,
            enabled(self.images.stability.has_key()),
            enabled(self.images.getimg.has_key()),
            enabled(self.images.pollinations_enabled),
            enabled(self.images.deepai.has_key()),
            enabled(self.images.replicate.has_key()),
            enabled(self.images.dalle.has_key()),
            self.request_timeout.as_secs(),
            self.cors_allowed_origins.join(", "),
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Ok(default.to_owned()),
        Err(VarError::NotUnicode(_)) => Err(anyhow!("{key} is not valid unicode")),
    }
}

/// First non-placeholder value among `keys`
fn api_key(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .map(|value| value.trim().to_owned())
        .find(|value| !is_placeholder_key(value))
}

/// Endpoint for `{PREFIX}_BASE_URL` keyed by `{PREFIX}_API_KEY`
fn endpoint(prefix: &str, default_base_url: &str) -> Result<ProviderEndpoint> {
    let base_url = env_var_or(&format!("{prefix}_BASE_URL"), default_base_url)?;
    Ok(ProviderEndpoint::new(base_url).with_key(api_key(&[&format!("{prefix}_API_KEY")])))
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("http://localhost:3000, https://fitplan.app,"),
            vec!["http://localhost:3000", "https://fitplan.app"]
        );
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    fn test_gemini_debug_redacts_key() {
        let config = GeminiConfig {
            api_key: Some("AIza-secret".to_owned()),
            text_model: DEFAULT_TEXT_MODEL.to_owned(),
            base_url: defaults::GEMINI_BASE_URL.to_owned(),
        };
        assert!(!format!("{config:?}").contains("AIza-secret"));
    }
}
