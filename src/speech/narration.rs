// ABOUTME: Renders workout and diet plans as speakable text
// ABOUTME: Flattens line breaks and bullets so synthesizers read plans naturally
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;
use std::str::FromStr;

use crate::models::{DietPlan, FitnessPlan, WorkoutPlan};

/// Which part of a plan to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanSection {
    /// Workouts only
    Workout,
    /// Meals only
    Diet,
    /// Workouts then meals
    #[default]
    Both,
}

impl FromStr for PlanSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "workout" => Ok(Self::Workout),
            "diet" => Ok(Self::Diet),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown plan section '{other}'")),
        }
    }
}

/// Flatten text for speech: line breaks become sentence breaks, runs of
/// whitespace collapse, bullet glyphs disappear
#[must_use]
pub fn format_for_speech(text: &str) -> String {
    let unbulleted: String = text.chars().filter(|c| !matches!(c, '•' | '·')).collect();
    unbulleted
        .replace('\n', ". ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// Narration of the weekly workout schedule
#[must_use]
pub fn workout_narration(plan: &WorkoutPlan) -> String {
    let mut text = format!(
        "Here is your personalized workout plan. {}. ",
        or_default(&plan.overview, "A customized workout plan for you.")
    );

    for (index, day) in plan.weekly_schedule.iter().enumerate() {
        let _ = write!(text, "Day {}, {}. ", index + 1, day.day);
        let _ = write!(text, "Workout duration: {}. ", day.duration);

        for (number, exercise) in day.exercises.iter().enumerate() {
            let _ = write!(text, "Exercise {}: {}. ", number + 1, exercise.name);
            let _ = write!(
                text,
                "{} sets of {} repetitions. ",
                exercise.sets, exercise.reps
            );
            let _ = write!(text, "Rest for {} between sets. ", exercise.rest_time);
        }

        if !day.notes.is_empty() {
            let _ = write!(text, "Important note for today: {}. ", day.notes);
        }
    }

    format_for_speech(&text)
}

/// Narration of the diet plan
#[must_use]
pub fn diet_narration(plan: &DietPlan) -> String {
    let mut text = format!(
        "Here is your personalized diet plan. {}. ",
        or_default(&plan.overview, "A customized nutrition plan for you.")
    );

    if plan.daily_calories > 0 {
        let _ = write!(
            text,
            "Your daily calorie target is {} calories. ",
            plan.daily_calories
        );
    }

    let _ = write!(
        text,
        "Macro breakdown: {} protein, {} carbohydrates, and {} fats. ",
        or_default(&plan.macros.protein, "25%"),
        or_default(&plan.macros.carbs, "45%"),
        or_default(&plan.macros.fats, "30%"),
    );

    for day in &plan.daily_meals {
        let _ = write!(text, "{} meals: ", day.day);
        for (label, meal) in day.slots() {
            if meal.name.is_empty() {
                continue;
            }
            let _ = write!(text, "{}: {}. ", label.to_lowercase(), meal.name);
            if meal.calories > 0 {
                let _ = write!(text, "{} calories. ", meal.calories);
            }
        }
    }

    format_for_speech(&text)
}

/// Narration of the selected plan section
#[must_use]
pub fn plan_narration(plan: &FitnessPlan, section: PlanSection) -> String {
    match section {
        PlanSection::Workout => workout_narration(&plan.workout_plan),
        PlanSection::Diet => diet_narration(&plan.diet_plan),
        PlanSection::Both => format!(
            "{} {}",
            workout_narration(&plan.workout_plan),
            diet_narration(&plan.diet_plan)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyMeals, Exercise, Macros, Meal, WeeklyScheduleEntry};

    #[test]
    fn test_format_for_speech() {
        assert_eq!(
            format_for_speech("Warm up\n• Squats   x10\n"),
            "Warm up. Squats x10."
        );
    }

    #[test]
    fn test_workout_narration() {
        let plan = WorkoutPlan {
            overview: "Build a habit".to_owned(),
            weekly_schedule: vec![WeeklyScheduleEntry {
                day: "Monday".to_owned(),
                exercises: vec![Exercise {
                    name: "Push-ups".to_owned(),
                    sets: 3,
                    reps: "10-15".to_owned(),
                    rest_time: "60 seconds".to_owned(),
                    instructions: String::new(),
                }],
                duration: "30 minutes".to_owned(),
                notes: String::new(),
            }],
        };

        assert_eq!(
            workout_narration(&plan),
            "Here is your personalized workout plan. Build a habit. Day 1, Monday. \
             Workout duration: 30 minutes. Exercise 1: Push-ups. 3 sets of 10-15 repetitions. \
             Rest for 60 seconds between sets."
        );
    }

    #[test]
    fn test_diet_narration_skips_unnamed_meals() {
        let meal = |name: &str, calories| Meal {
            name: name.to_owned(),
            ingredients: Vec::new(),
            calories,
        };
        let plan = DietPlan {
            overview: String::new(),
            daily_calories: 1800,
            macros: Macros {
                protein: "30%".to_owned(),
                carbs: String::new(),
                fats: "25%".to_owned(),
            },
            daily_meals: vec![DailyMeals {
                day: "Monday".to_owned(),
                breakfast: meal("Oatmeal", 400),
                lunch: meal("", 0),
                dinner: meal("Lentil Curry", 0),
                snacks: meal("Nuts", 200),
            }],
        };

        assert_eq!(
            diet_narration(&plan),
            "Here is your personalized diet plan. A customized nutrition plan for you.. \
             Your daily calorie target is 1800 calories. Macro breakdown: 30% protein, \
             45% carbohydrates, and 25% fats. Monday meals: breakfast: Oatmeal. 400 calories. \
             dinner: Lentil Curry. snacks: Nuts. 200 calories."
        );
    }

    #[test]
    fn test_section_parsing() {
        assert_eq!("Diet".parse::<PlanSection>(), Ok(PlanSection::Diet));
        assert!("lunch".parse::<PlanSection>().is_err());
    }
}
