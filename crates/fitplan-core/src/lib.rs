// ABOUTME: Core types and constants for the FitPlan workout and diet planner
// ABOUTME: Foundation crate with error handling, profile and plan models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitPlan Core
//!
//! Foundation crate providing shared types for the FitPlan server, its image
//! providers, and the terminal client. It has no I/O of its own.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: User profile and fitness plan data model
//! - **constants**: Generation parameters, storage keys, and static texts

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// User profile and fitness plan data model
pub mod models;

/// Application constants organized by domain
pub mod constants;
