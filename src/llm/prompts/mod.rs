// ABOUTME: Prompt texts for plan and quote generation
// ABOUTME: Renders the user profile block and appends the static JSON format requirements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! The fixed part of the plan prompt lives in a markdown file loaded at
//! compile time so it can be edited without touching code.

use std::fmt::Write as _;

use crate::models::UserProfile;

/// Output rules and the JSON example appended to every plan prompt
pub const PLAN_REQUIREMENTS: &str = include_str!("plan_requirements.md");

/// Prompt for a single motivational quote
pub const QUOTE_PROMPT: &str = "Generate a short, inspiring fitness and wellness motivational quote (maximum 20 words). Make it unique and energizing.";

const PLAN_PREAMBLE: &str = "You are an expert fitness coach and nutritionist. Create a comprehensive, personalized 7-day fitness and diet plan.";

/// Build the plan prompt for `profile`
///
/// Optional profile fields only produce a line when present.
#[must_use]
pub fn plan_prompt(profile: &UserProfile) -> String {
    let mut prompt = String::with_capacity(PLAN_PREAMBLE.len() + PLAN_REQUIREMENTS.len() + 512);
    prompt.push_str(PLAN_PREAMBLE);
    prompt.push_str("\n\nUser Profile:\n");

    let gender = profile
        .gender
        .map_or("not specified", |gender| gender.as_str());

    // Writing to a String cannot fail
    let _ = writeln!(prompt, "- Name: {}", profile.name);
    let _ = writeln!(prompt, "- Age: {}", profile.age);
    let _ = writeln!(prompt, "- Gender: {gender}");
    let _ = writeln!(prompt, "- Height: {}cm", profile.height);
    let _ = writeln!(prompt, "- Weight: {}kg", profile.weight);
    let _ = writeln!(prompt, "- Fitness Goal: {}", profile.fitness_goal);
    let _ = writeln!(prompt, "- Current Fitness Level: {}", profile.fitness_level);
    let _ = writeln!(prompt, "- Workout Location: {}", profile.workout_location);
    let _ = writeln!(prompt, "- Dietary Preference: {}", profile.dietary_preference);

    if let Some(history) = profile
        .medical_history
        .as_deref()
        .filter(|h| !h.trim().is_empty())
    {
        let _ = writeln!(prompt, "- Medical History: {history}");
    }
    if let Some(stress) = profile.stress_level {
        let _ = writeln!(prompt, "- Stress Level: {stress}");
    }
    if let Some(sleep) = profile.sleep_hours {
        let _ = writeln!(prompt, "- Sleep Hours: {sleep}");
    }
    if let Some(water) = profile.water_intake {
        let _ = writeln!(prompt, "- Water Intake: {water}L/day");
    }

    prompt.push('\n');
    prompt.push_str(PLAN_REQUIREMENTS);
    prompt
}
