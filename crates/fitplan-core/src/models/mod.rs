// ABOUTME: Data model shared by the plan server, image providers, and terminal client
// ABOUTME: Re-exports user profile and fitness plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Core data models
//!
//! - [`UserProfile`]: validated physical profile and goals, built from a
//!   loosely typed [`UserProfileRequest`]
//! - [`FitnessPlan`]: seven-day workout schedule plus seven-day meal plan

/// Fitness plan types
pub mod plan;
/// User profile types and validation
pub mod profile;

pub use plan::{
    DailyMeals, DietPlan, Exercise, FitnessPlan, Macros, Meal, WeeklyScheduleEntry, WorkoutPlan,
};
pub use profile::{
    DietaryPreference, FitnessGoal, FitnessLevel, Gender, StressLevel, UserProfile,
    UserProfileRequest, WorkoutLocation,
};
