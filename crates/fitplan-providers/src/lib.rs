// ABOUTME: Image generation providers for exercise and meal illustrations
// ABOUTME: Ordered provider chain with keyword-matched stock photo fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Image provider implementations and the fallback chain that drives them.
//!
//! Each external service is a strategy object implementing
//! [`image::ImageProvider`]. [`image::ImageProviderChain`] tries them in order,
//! logs and swallows every failure, and finally picks a stock photo so that a
//! caller always receives an image URL.

pub use fitplan_core::errors;

/// Provider-local error type
pub mod provider_error;
/// Shared HTTP client for provider API calls
pub mod http_client;
/// Image provider trait, implementations, chain, and stock fallback
pub mod image;

pub use http_client::{initialize_shared_client, shared_client};
pub use image::{
    GeneratedImage, ImageKind, ImageOutcome, ImageProvider, ImageProviderChain,
    ImageProvidersConfig, ImageRequest, ProviderEndpoint, StockImage, StockImageSelector,
};
pub use provider_error::{ImageProviderError, ImageProviderResult};
