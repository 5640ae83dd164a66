// ABOUTME: Motivational quote route
// ABOUTME: Always answers 200 with a non-empty quote, falling back to a static one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::plans::motivational_quote;
use crate::resources::ServerResources;

/// `GET /api/motivational-quote` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Always true
    pub success: bool,
    /// Quote text without surrounding double quotes
    pub quote: String,
}

/// Quote routes
pub struct QuoteRoutes;

impl QuoteRoutes {
    /// Create all quote routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/motivational-quote", get(Self::handle_quote))
            .with_state(resources)
    }

    async fn handle_quote(State(resources): State<Arc<ServerResources>>) -> Json<QuoteResponse> {
        Json(QuoteResponse {
            success: true,
            quote: motivational_quote(resources.llm.as_deref()).await,
        })
    }
}
