// ABOUTME: Extracts and validates a fitness plan from raw model text
// ABOUTME: Parse-or-default combinator that substitutes the fallback plan on any defect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::Value;
use thiserror::Error;

use crate::constants::generation::PLAN_DAYS;
use crate::models::FitnessPlan;

/// Why a model answer was not used
#[derive(Debug, Error)]
pub enum PlanRejection {
    /// The answer was empty or whitespace
    #[error("empty response")]
    Empty,
    /// No `{ ... }` span in the answer
    #[error("no JSON object in response")]
    NoJsonObject,
    /// The span was not valid JSON or did not match the plan schema
    #[error("malformed plan JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    /// `workoutPlan` or `dietPlan` was absent or null
    #[error("missing {0}")]
    MissingSection(&'static str),
    /// The plan did not cover exactly one week
    #[error("expected {PLAN_DAYS} days, got {workout_days} workout and {meal_days} meal days")]
    IncompleteWeek {
        /// Days in the weekly schedule
        workout_days: usize,
        /// Days in the meal plan
        meal_days: usize,
    },
    /// The model could not be asked at all
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
}

/// Remove Markdown code fences anywhere in `text`
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
}

/// Slice from the first `{` to the last `}`, inclusive
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Parse a model answer into a complete plan
///
/// # Errors
///
/// Returns the first [`PlanRejection`] that applies
pub fn parse_plan(raw: &str) -> Result<FitnessPlan, PlanRejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlanRejection::Empty);
    }

    let unfenced = strip_code_fences(trimmed);
    let json = extract_json_object(&unfenced).ok_or(PlanRejection::NoJsonObject)?;

    let value: Value = serde_json::from_str(json)?;
    for section in ["workoutPlan", "dietPlan"] {
        if value.get(section).filter(|v| !v.is_null()).is_none() {
            return Err(PlanRejection::MissingSection(section));
        }
    }

    let plan: FitnessPlan = serde_json::from_value(value)?;
    if !plan.covers_full_week() {
        return Err(PlanRejection::IncompleteWeek {
            workout_days: plan.workout_plan.weekly_schedule.len(),
            meal_days: plan.diet_plan.daily_meals.len(),
        });
    }

    Ok(plan)
}

/// Parse `raw`, or build the default plan when it is unusable
///
/// The rejection reason is returned alongside the substituted plan.
pub fn parse_or_default<F>(raw: &str, default: F) -> (FitnessPlan, Option<PlanRejection>)
where
    F: FnOnce() -> FitnessPlan,
{
    match parse_plan(raw) {
        Ok(plan) => (plan, None),
        Err(rejection) => (default(), Some(rejection)),
    }
}
