// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and readiness endpoints reporting which AI providers are configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `/health` answers as long as the process serves requests. `/ready` also
//! reports whether the text model is configured and which image providers
//! the chain will try.

use std::sync::Arc;

use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> axum::Router {
        use axum::{extract::State, routing::get, Json, Router};

        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler(
            State(resources): State<Arc<ServerResources>>,
        ) -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "ready",
                "textModel": resources.llm.is_some(),
                "imageMethods": resources.images.active_methods(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(resources)
    }
}
