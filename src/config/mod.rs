// ABOUTME: Configuration module for server settings loaded from the environment
// ABOUTME: Re-exports the server, Gemini, and HTTP client configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment and server configuration
pub mod environment;

pub use environment::{
    Environment, GeminiConfig, HttpClientConfig, ServerConfig, DEFAULT_HTTP_PORT,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
