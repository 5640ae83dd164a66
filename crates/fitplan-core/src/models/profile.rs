// ABOUTME: User profile model with kebab-case enums for goals, level, location, and diet
// ABOUTME: Validates loosely typed form submissions into an immutable UserProfile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::AppError;

/// Declares a closed set of form choices with their wire strings.
macro_rules! form_choice {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in form order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire representation used in JSON and prompts
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Parse a wire string (case-insensitive)
            #[must_use]
            pub fn parse_str(value: &str) -> Option<Self> {
                let value = value.trim().to_lowercase();
                Self::ALL.iter().copied().find(|choice| choice.as_str() == value)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str(self.as_str())
            }
        }
    };
}

form_choice! {
    /// Primary training objective
    FitnessGoal {
        /// Lose body fat
        WeightLoss => "weight-loss",
        /// Build muscle mass
        MuscleGain => "muscle-gain",
        /// Overall fitness
        GeneralFitness => "general-fitness",
        /// Cardiovascular endurance
        Endurance => "endurance",
        /// Maximal strength
        Strength => "strength",
        /// Mobility and flexibility
        Flexibility => "flexibility",
    }
}

form_choice! {
    /// Current training experience
    FitnessLevel {
        /// New to training
        Beginner => "beginner",
        /// Trains regularly
        Intermediate => "intermediate",
        /// Experienced athlete
        Advanced => "advanced",
    }
}

form_choice! {
    /// Where the user trains
    WorkoutLocation {
        /// Home, bodyweight only
        HomeNoEquipment => "home-no-equipment",
        /// Home with dumbbells, bands, and similar
        HomeBasicEquipment => "home-basic-equipment",
        /// Commercial gym
        Gym => "gym",
        /// Parks and open air
        Outdoor => "outdoor",
    }
}

form_choice! {
    /// Dietary style
    DietaryPreference {
        /// No restriction
        NonVegetarian => "non-vegetarian",
        /// No meat or fish
        Vegetarian => "vegetarian",
        /// No animal products
        Vegan => "vegan",
        /// Low carbohydrate, high fat
        Keto => "keto",
        /// Paleolithic
        Paleo => "paleo",
        /// Mediterranean
        Mediterranean => "mediterranean",
    }
}

form_choice! {
    /// Self-reported gender
    Gender {
        /// Male
        Male => "male",
        /// Female
        Female => "female",
        /// Other or undisclosed
        Other => "other",
    }
}

form_choice! {
    /// Self-reported daily stress
    StressLevel {
        /// Low stress
        Low => "low",
        /// Moderate stress
        Moderate => "moderate",
        /// High stress
        High => "high",
    }
}

/// Validated user profile
///
/// Created once from a form submission and never mutated afterwards. The
/// client persists it so a plan can be regenerated without re-entering data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Optional gender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Height in centimetres
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Training objective
    pub fitness_goal: FitnessGoal,
    /// Training experience
    pub fitness_level: FitnessLevel,
    /// Training location
    pub workout_location: WorkoutLocation,
    /// Dietary style
    pub dietary_preference: DietaryPreference,
    /// Free-text medical notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    /// Daily stress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<StressLevel>,
    /// Hours of sleep per night
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    /// Litres of water per day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_intake: Option<f64>,
}

impl UserProfile {
    /// Whether meals should come from the vegetarian menu
    ///
    /// That menu keeps dairy and honey, so vegans get the standard one.
    #[must_use]
    pub const fn is_vegetarian(&self) -> bool {
        matches!(self.dietary_preference, DietaryPreference::Vegetarian)
    }

    /// Whether the user trains with gym equipment
    #[must_use]
    pub const fn trains_at_gym(&self) -> bool {
        matches!(self.workout_location, WorkoutLocation::Gym)
    }

    /// Whether the user is new to training
    #[must_use]
    pub const fn is_beginner(&self) -> bool {
        matches!(self.fitness_level, FitnessLevel::Beginner)
    }

    /// Whether the goal is a weight-loss goal
    #[must_use]
    pub fn targets_loss(&self) -> bool {
        self.fitness_goal.as_str().contains("loss")
    }
}

/// Raw profile submission as sent by a form
///
/// Every field is optional so that missing values can be reported together
/// with a 400 instead of failing JSON extraction on the first one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileRequest {
    /// Display name
    pub name: Option<String>,
    /// Age in years
    pub age: Option<f64>,
    /// Gender
    pub gender: Option<String>,
    /// Height in centimetres
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Training objective
    pub fitness_goal: Option<String>,
    /// Training experience
    pub fitness_level: Option<String>,
    /// Training location
    pub workout_location: Option<String>,
    /// Dietary style
    pub dietary_preference: Option<String>,
    /// Free-text medical notes
    pub medical_history: Option<String>,
    /// Daily stress
    pub stress_level: Option<String>,
    /// Hours of sleep per night
    pub sleep_hours: Option<f64>,
    /// Litres of water per day
    pub water_intake: Option<f64>,
}

impl From<&UserProfile> for UserProfileRequest {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: Some(profile.name.clone()),
            age: Some(f64::from(profile.age)),
            gender: profile.gender.map(|g| g.as_str().to_owned()),
            height: Some(profile.height),
            weight: Some(profile.weight),
            fitness_goal: Some(profile.fitness_goal.as_str().to_owned()),
            fitness_level: Some(profile.fitness_level.as_str().to_owned()),
            workout_location: Some(profile.workout_location.as_str().to_owned()),
            dietary_preference: Some(profile.dietary_preference.as_str().to_owned()),
            medical_history: profile.medical_history.clone(),
            stress_level: profile.stress_level.map(|s| s.as_str().to_owned()),
            sleep_hours: profile.sleep_hours,
            water_intake: profile.water_intake,
        }
    }
}

impl UserProfileRequest {
    /// Validate the submission into a [`UserProfile`]
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` listing every absent or empty required
    /// field, or `InvalidInput` when a choice field holds an unknown value.
    pub fn validate(self) -> Result<UserProfile, AppError> {
        let name = non_empty(self.name.as_deref());
        let age = positive(self.age);
        let height = positive(self.height);
        let weight = positive(self.weight);
        let goal = non_empty(self.fitness_goal.as_deref());
        let level = non_empty(self.fitness_level.as_deref());
        let location = non_empty(self.workout_location.as_deref());
        let diet = non_empty(self.dietary_preference.as_deref());

        let missing: Vec<&str> = [
            ("name", name.is_none()),
            ("age", age.is_none()),
            ("height", height.is_none()),
            ("weight", weight.is_none()),
            ("fitnessGoal", goal.is_none()),
            ("fitnessLevel", level.is_none()),
            ("workoutLocation", location.is_none()),
            ("dietaryPreference", diet.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        let (
            Some(name),
            Some(age),
            Some(height),
            Some(weight),
            Some(goal),
            Some(level),
            Some(location),
            Some(diet),
        ) = (name, age, height, weight, goal, level, location, diet)
        else {
            return Err(AppError::missing_fields(format!(
                "Missing required user profile information: {}",
                missing.join(", ")
            )));
        };

        Ok(UserProfile {
            name: name.to_owned(),
            age: whole_years(age),
            gender: optional_choice(self.gender.as_deref(), "gender", Gender::parse_str)?,
            height,
            weight,
            fitness_goal: choice(goal, "fitnessGoal", FitnessGoal::parse_str)?,
            fitness_level: choice(level, "fitnessLevel", FitnessLevel::parse_str)?,
            workout_location: choice(location, "workoutLocation", WorkoutLocation::parse_str)?,
            dietary_preference: choice(diet, "dietaryPreference", DietaryPreference::parse_str)?,
            medical_history: non_empty(self.medical_history.as_deref()).map(str::to_owned),
            stress_level: optional_choice(
                self.stress_level.as_deref(),
                "stressLevel",
                StressLevel::parse_str,
            )?,
            sleep_hours: positive(self.sleep_hours),
            water_intake: positive(self.water_intake),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

// Clamped to the u32 range before the cast.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_years(age: f64) -> u32 {
    age.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

fn choice<T>(value: &str, field: &str, parse: fn(&str) -> Option<T>) -> Result<T, AppError> {
    parse(value).ok_or_else(|| AppError::invalid_input(format!("Invalid {field}: '{value}'")))
}

fn optional_choice<T>(
    value: Option<&str>,
    field: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, AppError> {
    non_empty(value)
        .map(|v| choice(v, field, parse))
        .transpose()
}
