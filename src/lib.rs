// ABOUTME: Main library entry point for the FitPlan server and terminal client
// ABOUTME: Generates seven-day workout and diet plans, illustrations, and spoken narration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitPlan Server
//!
//! An HTTP backend that turns a user's physical profile and goals into a
//! structured seven-day workout and diet plan, illustrates exercises and meals
//! on demand, and a terminal client that stores the last plan and reads it
//! aloud.
//!
//! ## Features
//!
//! - **Plan generation**: one fixed prompt to a Gemini text model, strict JSON
//!   parsing, and a deterministic fallback plan whenever the answer is unusable
//! - **Image fallback chain**: seven image providers tried in order, then a
//!   keyword-matched stock photo, so an image URL is always returned
//! - **Motivational quotes** with a static fallback
//! - **Speech playback**: advisory server endpoint plus a local synthesizer
//!   with pause, resume, and stop
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fitplan_server::config::environment::ServerConfig;
//! use fitplan_server::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::new(config));
//!     fitplan_server::server::run(resources).await
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────

/// Unified error handling
pub use fitplan_core::errors;

/// Application constants
pub use fitplan_core::constants;

/// Profile and plan data model
pub use fitplan_core::models;

/// Environment configuration
pub mod config;

/// Structured logging setup and domain log helpers
pub mod logging;

/// Text model providers and prompt templates
pub mod llm;

/// Plan generation, validation, fallback, and quotes
pub mod plans;

/// Client-side speech playback
pub mod speech;

/// Terminal client API access and local store
pub mod client;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// HTTP middleware
pub mod middleware;

/// Server assembly and serve loop
pub mod server;
