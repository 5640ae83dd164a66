// ABOUTME: Terminal client support: API access and persisted local state
// ABOUTME: Takes the place of the browser for storing the last profile and plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP client for the FitPlan API
pub mod api;
/// JSON-file key-value store
pub mod store;

pub use api::{ApiClient, DEFAULT_SERVER_URL};
pub use store::{LocalStore, SavedSession, StoreError};
