// ABOUTME: Deterministic weekly plan built from the user profile alone
// ABOUTME: Used whenever the text model is unreachable or its answer is unusable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fallback Plan
//!
//! A pure function of [`UserProfile`]: the same profile always yields the
//! same plan, byte for byte once serialized. Workouts vary with the fitness
//! level (rep ranges) and with whether the user trains at a gym (exercise
//! choice and instructions). Meals pick the plant-based or the standard
//! option for every slot.

use crate::models::{
    DailyMeals, DietPlan, Exercise, FitnessPlan, Macros, Meal, UserProfile, WeeklyScheduleEntry,
    WorkoutPlan,
};

/// Daily calorie target for weight-loss goals
pub const LOSS_CALORIES: u32 = 1800;

/// Daily calorie target for every other goal
pub const MAINTENANCE_CALORIES: u32 = 2200;

const TIPS: [&str; 4] = [
    "Stay hydrated by drinking at least 8 glasses of water daily",
    "Get 7-9 hours of quality sleep for optimal recovery",
    "Listen to your body and rest when you feel overly fatigued",
    "Progress gradually - consistency is more important than intensity",
];

/// Build the fallback plan for `profile`
#[must_use]
pub fn fallback_plan(profile: &UserProfile) -> FitnessPlan {
    FitnessPlan {
        workout_plan: workout_plan(profile),
        diet_plan: diet_plan(profile),
        tips: TIPS.iter().map(|tip| (*tip).to_owned()).collect(),
        motivation: format!(
            "Hi {}! Your {} journey starts now. Remember, every expert was once a beginner. \
             Stay consistent, be patient with yourself, and celebrate small victories along \
             the way. You've got this! 💪",
            profile.name, profile.fitness_goal
        ),
    }
}

// ============================================================================
// Workouts
// ============================================================================

fn exercise(name: &str, sets: u32, reps: &str, rest_time: &str, instructions: &str) -> Exercise {
    Exercise {
        name: name.to_owned(),
        sets,
        reps: reps.to_owned(),
        rest_time: rest_time.to_owned(),
        instructions: instructions.to_owned(),
    }
}

fn day(name: &str, exercises: Vec<Exercise>, duration: &str, notes: &str) -> WeeklyScheduleEntry {
    WeeklyScheduleEntry {
        day: name.to_owned(),
        exercises,
        duration: duration.to_owned(),
        notes: notes.to_owned(),
    }
}

fn workout_plan(profile: &UserProfile) -> WorkoutPlan {
    let gym = profile.trains_at_gym();
    let beginner = profile.is_beginner();
    let pick = |condition: bool, yes: &'static str, no: &'static str| {
        if condition {
            yes
        } else {
            no
        }
    };

    let weekly_schedule = vec![
        day(
            "Monday",
            vec![
                exercise(
                    "Warm-up Walk",
                    1,
                    "5-10 minutes",
                    "N/A",
                    "Start with a gentle walk to warm up your muscles",
                ),
                exercise(
                    pick(gym, "Treadmill", "Bodyweight Squats"),
                    3,
                    pick(beginner, "8-12", "12-15"),
                    "60 seconds",
                    pick(
                        gym,
                        "Maintain steady pace, adjust incline as needed",
                        "Keep feet shoulder-width apart, lower until thighs parallel to ground",
                    ),
                ),
            ],
            "30 minutes",
            "Focus on proper form and listen to your body",
        ),
        day(
            "Tuesday",
            vec![exercise(
                "Upper Body Workout",
                3,
                pick(beginner, "8-10", "10-12"),
                "60 seconds",
                pick(
                    gym,
                    "Use dumbbells or machines for chest and arms",
                    "Push-ups, tricep dips using chair",
                ),
            )],
            "35 minutes",
            "Focus on upper body strength",
        ),
        day(
            "Wednesday",
            vec![exercise(
                "Cardio Day",
                1,
                "20-30 minutes",
                "N/A",
                pick(
                    gym,
                    "Treadmill, elliptical, or bike",
                    "Brisk walk, jogging, or jumping jacks",
                ),
            )],
            "30 minutes",
            "Maintain steady heart rate",
        ),
        day(
            "Thursday",
            vec![exercise(
                "Lower Body Workout",
                3,
                pick(beginner, "8-10", "12-15"),
                "60 seconds",
                "Squats, lunges, and calf raises",
            )],
            "35 minutes",
            "Focus on leg strength and stability",
        ),
        day(
            "Friday",
            vec![exercise(
                "Full Body Circuit",
                2,
                "10-12 each exercise",
                "45 seconds",
                "Combine upper and lower body movements",
            )],
            "40 minutes",
            "High energy, full body engagement",
        ),
        day(
            "Saturday",
            vec![exercise(
                "Active Recovery",
                1,
                "20-30 minutes",
                "N/A",
                "Yoga, stretching, or light walk",
            )],
            "20 minutes",
            "Gentle movement for recovery",
        ),
        day(
            "Sunday",
            vec![exercise(
                "Rest Day",
                0,
                "Complete rest",
                "N/A",
                "Focus on hydration and meal prep",
            )],
            "0 minutes",
            "Complete rest and preparation for next week",
        ),
    ];

    WorkoutPlan {
        overview: format!(
            "A personalized {} level workout plan designed for {} at {}.",
            profile.fitness_level, profile.fitness_goal, profile.workout_location
        ),
        weekly_schedule,
    }
}

// ============================================================================
// Meals
// ============================================================================

struct Dish {
    name: &'static str,
    ingredients: &'static [&'static str],
}

/// One meal slot: a plant-based and a standard dish sharing a calorie count
struct Slot {
    plant: Dish,
    standard: Dish,
    calories: u32,
}

struct DayMenu {
    day: &'static str,
    breakfast: Slot,
    lunch: Slot,
    dinner: Slot,
    snacks: Slot,
}

const fn dish(name: &'static str, ingredients: &'static [&'static str]) -> Dish {
    Dish { name, ingredients }
}

const fn slot(plant: Dish, standard: Dish, calories: u32) -> Slot {
    Slot {
        plant,
        standard,
        calories,
    }
}

/// Snacks are the same for every diet
const fn snack(name: &'static str, ingredients: &'static [&'static str], calories: u32) -> Slot {
    slot(dish(name, ingredients), dish(name, ingredients), calories)
}

const MENU: [DayMenu; 7] = [
    DayMenu {
        day: "Monday",
        breakfast: slot(
            dish("Oatmeal with Berries", &["Oatmeal", "Mixed berries", "Almonds", "Greek yogurt"]),
            dish("Scrambled Eggs with Toast", &["Eggs", "Whole grain toast", "Avocado", "Spinach"]),
            400,
        ),
        lunch: slot(
            dish("Quinoa Salad Bowl", &["Quinoa", "Mixed vegetables", "Chickpeas", "Olive oil"]),
            dish("Grilled Chicken Salad", &["Grilled chicken", "Mixed greens", "Cherry tomatoes", "Cucumber"]),
            500,
        ),
        dinner: slot(
            dish("Lentil Curry", &["Red lentils", "Brown rice", "Mixed vegetables", "Coconut milk"]),
            dish("Salmon with Vegetables", &["Salmon fillet", "Sweet potato", "Broccoli", "Lemon"]),
            450,
        ),
        snacks: snack("Healthy Snack", &["Greek yogurt", "Mixed nuts"], 200),
    },
    DayMenu {
        day: "Tuesday",
        breakfast: slot(
            dish("Smoothie Bowl", &["Banana", "Berries", "Spinach", "Almond milk", "Chia seeds"]),
            dish("Protein Pancakes", &["Protein powder", "Banana", "Eggs", "Oats"]),
            380,
        ),
        lunch: slot(
            dish("Veggie Wrap", &["Whole wheat wrap", "Hummus", "Vegetables", "Avocado"]),
            dish("Turkey Sandwich", &["Whole grain bread", "Turkey", "Lettuce", "Tomato"]),
            450,
        ),
        dinner: slot(
            dish("Vegetable Stir-fry", &["Tofu", "Mixed vegetables", "Brown rice", "Soy sauce"]),
            dish("Chicken Stir-fry", &["Chicken breast", "Mixed vegetables", "Quinoa", "Ginger"]),
            520,
        ),
        snacks: snack("Fruit and Nuts", &["Apple", "Almonds"], 180),
    },
    DayMenu {
        day: "Wednesday",
        breakfast: slot(
            dish("Chia Pudding", &["Chia seeds", "Almond milk", "Berries", "Honey"]),
            dish("Greek Yogurt Bowl", &["Greek yogurt", "Granola", "Berries", "Honey"]),
            350,
        ),
        lunch: slot(
            dish("Buddha Bowl", &["Quinoa", "Roasted vegetables", "Chickpeas", "Tahini"]),
            dish("Tuna Salad", &["Tuna", "Mixed greens", "Cherry tomatoes", "Olive oil"]),
            480,
        ),
        dinner: slot(
            dish("Pasta Primavera", &["Whole wheat pasta", "Seasonal vegetables", "Olive oil", "Herbs"]),
            dish("Beef and Vegetables", &["Lean beef", "Sweet potato", "Green beans", "Herbs"]),
            550,
        ),
        snacks: snack("Veggie Sticks", &["Carrots", "Hummus"], 150),
    },
    DayMenu {
        day: "Thursday",
        breakfast: slot(
            dish("Avocado Toast", &["Whole grain bread", "Avocado", "Tomato", "Hemp seeds"]),
            dish("Egg Benedict", &["English muffin", "Poached egg", "Canadian bacon", "Hollandaise"]),
            420,
        ),
        lunch: slot(
            dish("Lentil Soup", &["Red lentils", "Vegetables", "Vegetable broth", "Herbs"]),
            dish("Chicken Caesar Salad", &["Grilled chicken", "Romaine lettuce", "Parmesan", "Caesar dressing"]),
            460,
        ),
        dinner: slot(
            dish("Stuffed Bell Peppers", &["Bell peppers", "Quinoa", "Black beans", "Cheese"]),
            dish("Grilled Fish", &["White fish", "Asparagus", "Wild rice", "Lemon"]),
            500,
        ),
        snacks: snack("Trail Mix", &["Mixed nuts", "Dried fruit"], 190),
    },
    DayMenu {
        day: "Friday",
        breakfast: slot(
            dish("Breakfast Burrito", &["Whole wheat tortilla", "Scrambled tofu", "Black beans", "Salsa"]),
            dish("Protein Smoothie", &["Protein powder", "Banana", "Peanut butter", "Milk"]),
            390,
        ),
        lunch: slot(
            dish("Caprese Salad", &["Fresh mozzarella", "Tomatoes", "Basil", "Balsamic"]),
            dish("Salmon Bowl", &["Grilled salmon", "Brown rice", "Edamame", "Sesame dressing"]),
            470,
        ),
        dinner: slot(
            dish("Eggplant Parmesan", &["Eggplant", "Marinara sauce", "Mozzarella", "Basil"]),
            dish("Pork Tenderloin", &["Pork tenderloin", "Roasted vegetables", "Quinoa", "Herbs"]),
            530,
        ),
        snacks: snack("Protein Bar", &["Protein bar", "Water"], 200),
    },
    DayMenu {
        day: "Saturday",
        breakfast: slot(
            dish("French Toast", &["Whole grain bread", "Almond milk", "Cinnamon", "Berries"]),
            dish("Steak and Eggs", &["Lean steak", "Eggs", "Hash browns", "Vegetables"]),
            450,
        ),
        lunch: slot(
            dish("Falafel Plate", &["Falafel", "Hummus", "Pita", "Cucumber", "Tomato"]),
            dish("Chicken Wrap", &["Grilled chicken", "Whole wheat wrap", "Vegetables", "Sauce"]),
            490,
        ),
        dinner: slot(
            dish("Mushroom Risotto", &["Arborio rice", "Mushrooms", "Vegetable broth", "Parmesan"]),
            dish("Lamb Chops", &["Lamb chops", "Minted peas", "Roasted potatoes", "Rosemary"]),
            580,
        ),
        snacks: snack("Cheese and Crackers", &["Whole grain crackers", "Cheese"], 210),
    },
    DayMenu {
        day: "Sunday",
        breakfast: slot(
            dish("Pancakes", &["Whole wheat flour", "Almond milk", "Berries", "Maple syrup"]),
            dish("Full Breakfast", &["Eggs", "Turkey bacon", "Whole grain toast", "Orange juice"]),
            480,
        ),
        lunch: slot(
            dish("Veggie Pizza", &["Whole wheat crust", "Vegetables", "Cheese", "Herbs"]),
            dish("Grilled Chicken Pizza", &["Whole wheat crust", "Grilled chicken", "Vegetables", "Cheese"]),
            520,
        ),
        dinner: slot(
            dish("Vegetable Curry", &["Mixed vegetables", "Coconut milk", "Curry spices", "Basmati rice"]),
            dish("Roast Chicken", &["Roast chicken", "Roasted vegetables", "Mashed potatoes", "Gravy"]),
            560,
        ),
        snacks: snack("Smoothie", &["Fruits", "Yogurt", "Honey"], 220),
    },
];

impl Slot {
    fn to_meal(&self, plant_based: bool) -> Meal {
        let dish = if plant_based {
            &self.plant
        } else {
            &self.standard
        };
        Meal {
            name: dish.name.to_owned(),
            ingredients: dish.ingredients.iter().map(|i| (*i).to_owned()).collect(),
            calories: self.calories,
        }
    }
}

fn diet_plan(profile: &UserProfile) -> DietPlan {
    let plant_based = profile.is_vegetarian();

    DietPlan {
        overview: format!(
            "A balanced {} diet plan supporting your {} goals.",
            profile.dietary_preference, profile.fitness_goal
        ),
        daily_calories: if profile.targets_loss() {
            LOSS_CALORIES
        } else {
            MAINTENANCE_CALORIES
        },
        macros: Macros {
            protein: "25%".to_owned(),
            carbs: "45%".to_owned(),
            fats: "30%".to_owned(),
        },
        daily_meals: MENU
            .iter()
            .map(|menu| DailyMeals {
                day: menu.day.to_owned(),
                breakfast: menu.breakfast.to_meal(plant_based),
                lunch: menu.lunch.to_meal(plant_based),
                dinner: menu.dinner.to_meal(plant_based),
                snacks: menu.snacks.to_meal(plant_based),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DietaryPreference, FitnessGoal, FitnessLevel, WorkoutLocation};

    fn profile(
        goal: FitnessGoal,
        level: FitnessLevel,
        location: WorkoutLocation,
        diet: DietaryPreference,
    ) -> UserProfile {
        UserProfile {
            name: "Alex".to_owned(),
            age: 28,
            gender: None,
            height: 175.0,
            weight: 80.0,
            fitness_goal: goal,
            fitness_level: level,
            workout_location: location,
            dietary_preference: diet,
            medical_history: None,
            stress_level: None,
            sleep_hours: None,
            water_intake: None,
        }
    }

    #[test]
    fn test_beginner_vegetarian_at_home() {
        let plan = fallback_plan(&profile(
            FitnessGoal::WeightLoss,
            FitnessLevel::Beginner,
            WorkoutLocation::HomeNoEquipment,
            DietaryPreference::Vegetarian,
        ));

        assert!(plan.covers_full_week());
        assert_eq!(plan.diet_plan.daily_calories, LOSS_CALORIES);
        assert_eq!(plan.diet_plan.daily_meals[0].breakfast.name, "Oatmeal with Berries");

        let monday = &plan.workout_plan.weekly_schedule[0];
        assert_eq!(monday.exercises[1].name, "Bodyweight Squats");
        assert_eq!(monday.exercises[1].reps, "8-12");
        assert_eq!(
            plan.workout_plan.overview,
            "A personalized beginner level workout plan designed for weight-loss at home-no-equipment."
        );
        assert!(plan.motivation.starts_with("Hi Alex! Your weight-loss journey starts now."));
        assert_eq!(plan.tips.len(), 4);
    }

    #[test]
    fn test_advanced_omnivore_at_gym() {
        let plan = fallback_plan(&profile(
            FitnessGoal::MuscleGain,
            FitnessLevel::Advanced,
            WorkoutLocation::Gym,
            DietaryPreference::NonVegetarian,
        ));

        assert_eq!(plan.diet_plan.daily_calories, MAINTENANCE_CALORIES);
        let monday = &plan.workout_plan.weekly_schedule[0];
        assert_eq!(monday.exercises[1].name, "Treadmill");
        assert_eq!(monday.exercises[1].reps, "12-15");
        assert_eq!(
            plan.workout_plan.weekly_schedule[1].exercises[0].instructions,
            "Use dumbbells or machines for chest and arms"
        );
        assert_eq!(
            plan.diet_plan.daily_meals[0].breakfast.name,
            "Scrambled Eggs with Toast"
        );
        assert_eq!(plan.diet_plan.daily_meals[6].dinner.name, "Roast Chicken");
    }

    #[test]
    fn test_only_vegetarians_get_plant_menu_and_snacks_are_shared() {
        let vegetarian = fallback_plan(&profile(
            FitnessGoal::Endurance,
            FitnessLevel::Intermediate,
            WorkoutLocation::Outdoor,
            DietaryPreference::Vegetarian,
        ));
        let vegan = fallback_plan(&profile(
            FitnessGoal::Endurance,
            FitnessLevel::Intermediate,
            WorkoutLocation::Outdoor,
            DietaryPreference::Vegan,
        ));
        let keto = fallback_plan(&profile(
            FitnessGoal::Endurance,
            FitnessLevel::Intermediate,
            WorkoutLocation::Outdoor,
            DietaryPreference::Keto,
        ));

        assert_eq!(vegetarian.diet_plan.daily_meals[2].lunch.name, "Buddha Bowl");
        assert_eq!(vegan.diet_plan.daily_meals[2].lunch.name, "Tuna Salad");
        assert_eq!(keto.diet_plan.daily_meals[2].lunch.name, "Tuna Salad");
        assert_eq!(
            vegetarian.diet_plan.daily_meals[3].snacks,
            keto.diet_plan.daily_meals[3].snacks
        );
    }

    #[test]
    fn test_same_profile_yields_identical_plan() {
        let p = profile(
            FitnessGoal::Strength,
            FitnessLevel::Beginner,
            WorkoutLocation::HomeBasicEquipment,
            DietaryPreference::Paleo,
        );
        let first = serde_json::to_string(&fallback_plan(&p)).unwrap();
        let second = serde_json::to_string(&fallback_plan(&p)).unwrap();
        assert_eq!(first, second);
    }
}
