// ABOUTME: HTTP server assembly: route table, tower-http middleware stack, and serve loop
// ABOUTME: Serves the plan, quote, image, speech, and health routes with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # HTTP Server
//!
//! Layers, outermost first: request ID assignment, tracing span, request ID
//! propagation to the response, CORS, request timeout. JSON bodies are capped
//! at [`MAX_REQUEST_BODY_BYTES`].

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::middleware::{create_request_span, record_response, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, ImageRoutes, PlanRoutes, QuoteRoutes, SpeechRoutes};

/// Largest accepted request body
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Build the complete application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(create_request_span::<Body>)
                .on_response(record_response::<Body>),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(setup_cors(&resources.config))
        .layer(TimeoutLayer::new(resources.config.request_timeout));

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(PlanRoutes::routes(Arc::clone(&resources)))
        .merge(QuoteRoutes::routes(Arc::clone(&resources)))
        .merge(ImageRoutes::routes(resources))
        .merge(SpeechRoutes::routes())
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(middleware)
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let address = resources.config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    serve(listener, resources).await
}

/// Serve on an already bound listener
///
/// # Errors
///
/// Returns an error if the server fails
pub async fn serve(listener: TcpListener, resources: Arc<ServerResources>) -> Result<()> {
    let local_addr = listener.local_addr().context("Listener has no address")?;
    info!("FitPlan server listening on http://{local_addr}");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("FitPlan server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
