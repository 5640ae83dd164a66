// ABOUTME: Seven-day fitness plan model covering the workout schedule and meal plan
// ABOUTME: camelCase wire format matching what the text model is instructed to return
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::generation::PLAN_DAYS;

/// Complete plan returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessPlan {
    /// Weekly training schedule
    pub workout_plan: WorkoutPlan,
    /// Weekly nutrition plan
    pub diet_plan: DietPlan,
    /// General advice
    #[serde(default)]
    pub tips: Vec<String>,
    /// Closing motivational message
    #[serde(default)]
    pub motivation: String,
}

impl FitnessPlan {
    /// Whether both halves of the plan cover exactly one week
    #[must_use]
    pub fn covers_full_week(&self) -> bool {
        self.workout_plan.weekly_schedule.len() == PLAN_DAYS
            && self.diet_plan.daily_meals.len() == PLAN_DAYS
    }
}

/// Training half of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    /// Training philosophy
    pub overview: String,
    /// One entry per weekday
    pub weekly_schedule: Vec<WeeklyScheduleEntry>,
}

/// Training for a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyScheduleEntry {
    /// Weekday name
    pub day: String,
    /// Exercises in order
    pub exercises: Vec<Exercise>,
    /// Session length, free text
    #[serde(default)]
    pub duration: String,
    /// Coaching notes
    #[serde(default)]
    pub notes: String,
}

/// A single prescribed exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Number of sets (zero on rest days)
    #[serde(deserialize_with = "deserialize_count")]
    pub sets: u32,
    /// Repetitions or duration, free text
    #[serde(deserialize_with = "deserialize_text")]
    pub reps: String,
    /// Rest between sets, free text
    #[serde(default)]
    pub rest_time: String,
    /// Form cues
    #[serde(default)]
    pub instructions: String,
}

/// Nutrition half of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    /// Nutrition strategy
    pub overview: String,
    /// Daily calorie target
    #[serde(deserialize_with = "deserialize_count")]
    pub daily_calories: u32,
    /// Macro split as percentage strings
    pub macros: Macros,
    /// One entry per weekday
    pub daily_meals: Vec<DailyMeals>,
}

/// Macro nutrient split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    /// Protein share, for example "25%"
    pub protein: String,
    /// Carbohydrate share
    pub carbs: String,
    /// Fat share
    pub fats: String,
}

/// Meals for a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMeals {
    /// Weekday name
    pub day: String,
    /// Breakfast
    pub breakfast: Meal,
    /// Lunch
    pub lunch: Meal,
    /// Dinner
    pub dinner: Meal,
    /// Snacks
    pub snacks: Meal,
}

impl DailyMeals {
    /// Meals in serving order with their slot label
    #[must_use]
    pub fn slots(&self) -> [(&'static str, &Meal); 4] {
        [
            ("Breakfast", &self.breakfast),
            ("Lunch", &self.lunch),
            ("Dinner", &self.dinner),
            ("Snacks", &self.snacks),
        ]
    }
}

/// A single meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// Dish name
    pub name: String,
    /// Ingredient list
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Calories
    #[serde(default, deserialize_with = "deserialize_count")]
    pub calories: u32,
}

// ============================================================================
// Lenient Number Fields
// ============================================================================

/// Model output writes counts as `3`, `3.0`, `"3"` or `"2000 kcal"`
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Whole count from a number or from the leading digits of a string
fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) if (0.0..=f64::from(u32::MAX)).contains(&n) => Ok(n.round() as u32),
        NumberOrText::Number(n) => Err(serde::de::Error::custom(format!("Invalid count: {n}"))),
        NumberOrText::Text(text) => {
            let digits: String = text
                .trim()
                .chars()
                .filter(|c| *c != ',')
                .take_while(char::is_ascii_digit)
                .collect();
            digits
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("Invalid count: '{text}'")))
        }
    }
}

/// Free text that the model sometimes writes as a bare number
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n.to_string(),
        NumberOrText::Text(text) => text,
    })
}
