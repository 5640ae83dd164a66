// ABOUTME: Output formatting helpers for fitplan-cli
// ABOUTME: Prints workout schedules, meal plans, and image results as readable text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use fitplan_providers::ImageOutcome;
use fitplan_server::models::{DietPlan, FitnessPlan, WorkoutPlan};
use fitplan_server::speech::PlanSection;

/// Longest image URL printed in full; longer `data:` URLs are abbreviated
const MAX_URL_CHARS: usize = 120;

/// Print the selected sections of a plan followed by tips and motivation
pub fn display_plan(plan: &FitnessPlan, section: PlanSection) {
    if matches!(section, PlanSection::Workout | PlanSection::Both) {
        display_workout(&plan.workout_plan);
    }
    if matches!(section, PlanSection::Diet | PlanSection::Both) {
        display_diet(&plan.diet_plan);
    }

    if !plan.tips.is_empty() {
        println!("\nTIPS");
        for tip in &plan.tips {
            println!("• {tip}");
        }
    }
    if !plan.motivation.is_empty() {
        println!("\n{}", plan.motivation);
    }
}

fn display_workout(plan: &WorkoutPlan) {
    println!("\nWORKOUT PLAN");
    println!("{}", "=".repeat(80));
    println!("{}", plan.overview);

    for day in &plan.weekly_schedule {
        println!("\n{} ({})", day.day, day.duration);
        println!("{}", "-".repeat(80));
        for exercise in &day.exercises {
            println!(
                "  {}: {} x {}, rest {}",
                exercise.name, exercise.sets, exercise.reps, exercise.rest_time
            );
            if !exercise.instructions.is_empty() {
                println!("     {}", exercise.instructions);
            }
        }
        if !day.notes.is_empty() {
            println!("  Note: {}", day.notes);
        }
    }
}

fn display_diet(plan: &DietPlan) {
    println!("\nDIET PLAN");
    println!("{}", "=".repeat(80));
    println!("{}", plan.overview);
    println!(
        "Daily calories: {}   Protein {} / Carbs {} / Fats {}",
        plan.daily_calories, plan.macros.protein, plan.macros.carbs, plan.macros.fats
    );

    for day in &plan.daily_meals {
        println!("\n{}", day.day);
        println!("{}", "-".repeat(80));
        for (label, meal) in day.slots() {
            println!("  {label:<10} {} ({} kcal)", meal.name, meal.calories);
            if !meal.ingredients.is_empty() {
                println!("             {}", meal.ingredients.join(", "));
            }
        }
    }
}

/// Print an image result
pub fn display_image(outcome: &ImageOutcome) {
    println!("Method: {}", outcome.method);
    println!("Description: {}", outcome.description);

    let url: String = outcome.image_url.chars().take(MAX_URL_CHARS).collect();
    if url.len() < outcome.image_url.len() {
        println!("Image: {url}... ({} bytes)", outcome.image_url.len());
    } else {
        println!("Image: {url}");
    }

    if let Some(error) = &outcome.error {
        println!("Note: {error}");
    }
}

/// Confirm where the session was stored
pub fn display_session_saved(path: &Path) {
    println!("\nSaved profile and plan to {}", path.display());
}
