// ABOUTME: Route module organization for the FitPlan HTTP API
// ABOUTME: Groups plan, quote, image, speech, and health endpoints by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the FitPlan server
//!
//! Each domain module holds its route table, thin handlers, and the request
//! and response bodies it speaks. The terminal client reuses those bodies so
//! both sides agree on the wire format.

/// Health check and readiness routes
pub mod health;
/// Image generation routes
pub mod images;
/// JSON body extractor with API-style rejections
pub mod json;
/// Plan generation routes
pub mod plans;
/// Motivational quote routes
pub mod quote;
/// Advisory text-to-speech routes
pub mod speech;

pub use health::HealthRoutes;
pub use images::{ImageGenerationRequest, ImageRoutes};
pub use json::ApiJson;
pub use plans::{PlanResponse, PlanRoutes};
pub use quote::{QuoteResponse, QuoteRoutes};
pub use speech::{SpeechRequest, SpeechResponse, SpeechRoutes};
