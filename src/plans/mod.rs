// ABOUTME: Weekly plan generation, validation, fallback, and motivational quotes
// ABOUTME: Every entry point returns a usable value even when the model fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plans
//!
//! - **generator**: asks the text model for a plan
//! - **validator**: parse-or-default over the model answer
//! - **fallback**: deterministic plan from the profile
//! - **quotes**: one-line motivational quote

pub mod fallback;
pub mod generator;
pub mod quotes;
pub mod validator;

pub use fallback::fallback_plan;
pub use generator::{GeneratedPlan, PlanGenerator, PlanSource};
pub use quotes::{clean_quote, motivational_quote};
pub use validator::{parse_or_default, parse_plan, PlanRejection};
