// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Provides Cross-Origin Resource Sharing setup for browser and app clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::environment::ServerConfig;

/// Configure CORS settings for the API
///
/// Origins come from `CORS_ALLOWED_ORIGINS`: `*` (the default) allows any
/// origin, otherwise a comma-separated list is allowed.
///
/// ```bash
/// # Allow specific origins (production)
/// export CORS_ALLOWED_ORIGINS="https://fitplan.example.com,https://admin.example.com"
/// ```
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let allow_origin = if origins.is_empty()
        || config.cors_allowed_origins.iter().any(|origin| origin == "*")
    {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-request-id"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .expose_headers([HeaderName::from_static("x-request-id")])
}
