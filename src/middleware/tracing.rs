// ABOUTME: Request tracing hooks for the tower-http trace layer
// ABOUTME: Creates one span per HTTP request carrying its request ID and records status and latency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use http::{Request, Response};
use tracing::Span;

use crate::logging::AppLogger;

/// Header carrying the request ID, set by `SetRequestIdLayer` when absent
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create a tracing span for an HTTP request
pub fn create_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Record the outcome of a request in its span
pub fn record_response<B>(response: &Response<B>, latency: Duration, span: &Span) {
    let status = response.status().as_u16();
    let duration_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);

    span.record("status_code", status);
    span.record("duration_ms", duration_ms);

    let _entered = span.enter();
    AppLogger::log_request_completed(status, duration_ms);
}
