// ABOUTME: Error type for a single image provider attempt
// ABOUTME: Never crosses the chain boundary, where every variant is logged and swallowed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Why one provider failed to produce an image
#[derive(Debug, Error)]
pub enum ImageProviderError {
    /// No usable API key (absent or a known placeholder)
    #[error("{provider} API key not configured")]
    NotConfigured {
        /// Provider name
        provider: &'static str,
    },

    /// Provider switched off by configuration
    #[error("{provider} is disabled")]
    Disabled {
        /// Provider name
        provider: &'static str,
    },

    /// HTTP 429 from the provider
    #[error("{provider} rate limit exceeded")]
    RateLimited {
        /// Provider name
        provider: &'static str,
    },

    /// Any other non-success HTTP status
    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        /// Provider name
        provider: &'static str,
        /// HTTP status code
        status: u16,
        /// Truncated response body
        body: String,
    },

    /// Connection, timeout, or body read failure
    #[error("{provider} request failed: {source}")]
    Transport {
        /// Provider name
        provider: &'static str,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not the expected JSON
    #[error("{provider} response could not be decoded: {reason}")]
    Decode {
        /// Provider name
        provider: &'static str,
        /// Decoder message
        reason: String,
    },

    /// Successful response without any image in it
    #[error("{provider} response contained no image")]
    NoImage {
        /// Provider name
        provider: &'static str,
    },

    /// Asynchronous job reported failure
    #[error("{provider} generation failed")]
    JobFailed {
        /// Provider name
        provider: &'static str,
    },

    /// Asynchronous job still pending after the poll budget
    #[error("{provider} generation still pending after {attempts} polls")]
    PollExhausted {
        /// Provider name
        provider: &'static str,
        /// Polls performed
        attempts: u32,
    },
}

impl ImageProviderError {
    /// Whether the provider was skipped without any network call
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::NotConfigured { .. } | Self::Disabled { .. })
    }
}

/// Result alias for provider attempts
pub type ImageProviderResult<T> = Result<T, ImageProviderError>;
