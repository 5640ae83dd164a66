// ABOUTME: Keyword-matched stock photo selection used when every image provider fails
// ABOUTME: Maps prompt keywords to curated photo sets and rotates through them by a variety index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use rand::Rng;

use super::ImageKind;

const PHOTO_BASE: &str = "https://images.unsplash.com/photo-";
const PHOTO_SIZE: &str = "w=400&h=300&fit=crop";

/// How a category turns the variety index into a URL
enum PhotoSet {
    /// Rotate by variety index; each URL carries a distinct `ixid`
    Rotating {
        ids: &'static [&'static str],
        ixid_offset: u32,
    },
    /// Pick by the raw random factor
    Random(&'static [&'static str]),
    /// Always the same photo
    Single(&'static str),
}

struct Category {
    name: &'static str,
    keywords: &'static [&'static str],
    photos: PhotoSet,
}

const EXERCISE_CATEGORIES: &[Category] = &[
    Category {
        name: "squat",
        keywords: &["squat", "leg"],
        photos: PhotoSet::Rotating {
            ids: &[
                "1571019613454-1cb2f99b2d8b",
                "1566241440091-ec10de8db2e1",
                "1549060279-7e168fcee0c2",
                "1574680096145-d05b474e2155",
                "1583500178690-f7fd1d14489b",
            ],
            ixid_offset: 0,
        },
    },
    Category {
        name: "push",
        keywords: &["push", "chest"],
        photos: PhotoSet::Rotating {
            ids: &[
                "1534438327276-14e5300c3a48",
                "1571019614242-c5c5dee9f50b",
                "1594737625785-a6cbdabd333c",
                "1581009146145-b5ef050c2e1e",
                "1538805060514-97d9cc17730c",
            ],
            ixid_offset: 10,
        },
    },
    Category {
        name: "cardio",
        keywords: &["run", "cardio"],
        photos: PhotoSet::Random(&[
            "1544367567-0f2fcb009e0b",
            "1599901860904-17e6ed7083a0",
            "1538805060514-97d9cc17730c",
        ]),
    },
    Category {
        name: "yoga",
        keywords: &["yoga", "stretch"],
        photos: PhotoSet::Single("1506629905607-d405d7d2b0a8"),
    },
    Category {
        name: "core",
        keywords: &["plank", "core"],
        photos: PhotoSet::Single("1594737625785-a6cbdabd333c"),
    },
    Category {
        name: "lunge",
        keywords: &["lunge"],
        photos: PhotoSet::Single("1566241440091-ec10de8db2e1"),
    },
    Category {
        name: "glute",
        keywords: &["bridge", "glute"],
        photos: PhotoSet::Single("1549060279-7e168fcee0c2"),
    },
    Category {
        name: "bicep",
        keywords: &["bicep", "curl"],
        photos: PhotoSet::Single("1581009146145-b5ef050c2e1e"),
    },
    Category {
        name: "tricep",
        keywords: &["tricep", "dip"],
        photos: PhotoSet::Single("1571019614242-c5c5dee9f50b"),
    },
    Category {
        name: "shoulder",
        keywords: &["shoulder", "press"],
        photos: PhotoSet::Single("1538805060514-97d9cc17730c"),
    },
    Category {
        name: "deadlift",
        keywords: &["deadlift", "lift"],
        photos: PhotoSet::Single("1588286840104-8957b019727f"),
    },
    Category {
        name: "plyometric",
        keywords: &["burpee", "jump"],
        photos: PhotoSet::Single("1599901860904-17e6ed7083a0"),
    },
    Category {
        name: "mountain-climber",
        keywords: &["mountain", "climber"],
        photos: PhotoSet::Single("1571019614242-c5c5dee9f50b"),
    },
    Category {
        name: "calf",
        keywords: &["calf", "raise"],
        photos: PhotoSet::Single("1581009146145-b5ef050c2e1e"),
    },
];

const EXERCISE_DEFAULT: Category = Category {
    name: "general-exercise",
    keywords: &[],
    photos: PhotoSet::Rotating {
        ids: &[
            "1571019613454-1cb2f99b2d8b",
            "1534438327276-14e5300c3a48",
            "1544367567-0f2fcb009e0b",
            "1506629905607-d405d7d2b0a8",
            "1594737625785-a6cbdabd333c",
            "1566241440091-ec10de8db2e1",
            "1549060279-7e168fcee0c2",
            "1581009146145-b5ef050c2e1e",
            "1571019614242-c5c5dee9f50b",
            "1538805060514-97d9cc17730c",
        ],
        ixid_offset: 20,
    },
};

// Protein comes before salad so "grilled chicken salad" is shown as a protein dish.
const MEAL_CATEGORIES: &[Category] = &[
    Category {
        name: "protein",
        keywords: &["chicken", "meat", "protein"],
        photos: PhotoSet::Random(&[
            "1546554137-f86b9593a222",
            "1532550907401-a500c9a57435",
            "1525351484163-7529414344d8",
        ]),
    },
    Category {
        name: "salad",
        keywords: &["salad", "vegetable"],
        photos: PhotoSet::Random(&[
            "1512621776951-a57141f2eefd",
            "1559181567-c3190ca9959b",
            "1540420773420-3366772f4999",
        ]),
    },
    Category {
        name: "breakfast",
        keywords: &["breakfast", "oatmeal", "cereal"],
        photos: PhotoSet::Single("1490645935967-10de6ba17061"),
    },
    Category {
        name: "smoothie",
        keywords: &["smoothie", "drink", "juice"],
        photos: PhotoSet::Single("1553530666-ba11a7da3888"),
    },
    Category {
        name: "snack",
        keywords: &["snack", "nuts", "fruit"],
        photos: PhotoSet::Single("1559181567-c3190ca9959b"),
    },
    Category {
        name: "carbs",
        keywords: &["pasta", "rice", "carb"],
        photos: PhotoSet::Single("1551782450-a2132b4ba21d"),
    },
    Category {
        name: "fish",
        keywords: &["fish", "salmon"],
        photos: PhotoSet::Single("1532550907401-a500c9a57435"),
    },
    Category {
        name: "soup",
        keywords: &["soup", "broth"],
        photos: PhotoSet::Single("1504674900247-0877df9cc836"),
    },
    Category {
        name: "sandwich",
        keywords: &["sandwich", "wrap"],
        photos: PhotoSet::Single("1540420773420-3366772f4999"),
    },
    Category {
        name: "egg",
        keywords: &["egg", "omelet"],
        photos: PhotoSet::Single("1525351484163-7529414344d8"),
    },
    Category {
        name: "yogurt",
        keywords: &["yogurt", "parfait"],
        photos: PhotoSet::Single("1571771894821-ce9b6c11b08e"),
    },
    Category {
        name: "bread",
        keywords: &["pizza", "bread"],
        photos: PhotoSet::Single("1473093295043-cdd812d0e601"),
    },
    Category {
        name: "berry",
        keywords: &["berry", "fruit"],
        photos: PhotoSet::Single("1610832958506-aa56368176cf"),
    },
];

const MEAL_DEFAULT: Category = Category {
    name: "general-meal",
    keywords: &[],
    photos: PhotoSet::Rotating {
        ids: &[
            "1512621776951-a57141f2eefd",
            "1546554137-f86b9593a222",
            "1490645935967-10de6ba17061",
            "1553530666-ba11a7da3888",
            "1559181567-c3190ca9959b",
            "1551782450-a2132b4ba21d",
            "1532550907401-a500c9a57435",
            "1504674900247-0877df9cc836",
            "1540420773420-3366772f4999",
            "1525351484163-7529414344d8",
        ],
        ixid_offset: 50,
    },
};

/// Stock photo chosen for a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockImage {
    /// Photo URL
    pub url: String,
    /// Matched keyword category
    pub category: &'static str,
    /// Human-readable description
    pub description: String,
    /// Variety index in `0..10`
    pub variety: u32,
}

/// Picks stock photos by keyword category
#[derive(Debug, Clone, Copy, Default)]
pub struct StockImageSelector;

impl StockImageSelector {
    /// Create a selector
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Select a photo using a fresh random factor
    #[must_use]
    pub fn select(&self, prompt: &str, kind: ImageKind) -> StockImage {
        let random_factor = rand::thread_rng().gen_range(0..1000);
        Self::select_with_random(prompt, kind, random_factor)
    }

    /// Select a photo for a fixed random factor in `0..1000`
    #[must_use]
    pub fn select_with_random(prompt: &str, kind: ImageKind, random_factor: u32) -> StockImage {
        let clean = clean_prompt(prompt);
        let variety = variety_index(prompt, random_factor);

        let (categories, fallback) = match kind {
            ImageKind::Exercise => (EXERCISE_CATEGORIES, &EXERCISE_DEFAULT),
            ImageKind::Meal => (MEAL_CATEGORIES, &MEAL_DEFAULT),
        };
        let category = categories
            .iter()
            .find(|category| category.keywords.iter().any(|kw| clean.contains(kw)))
            .unwrap_or(fallback);

        StockImage {
            url: category.photos.pick(variety, random_factor),
            category: category.name,
            description: describe(prompt, kind),
            variety,
        }
    }
}

impl PhotoSet {
    fn pick(&self, variety: u32, random_factor: u32) -> String {
        match self {
            Self::Rotating { ids, ixid_offset } => {
                let index = variety as usize % ids.len();
                let ixid = variety + ixid_offset + index as u32;
                format!(
                    "{PHOTO_BASE}{}?{PHOTO_SIZE}&auto=format&q=80&ixid={ixid}",
                    ids[index]
                )
            }
            Self::Random(ids) => {
                let index = random_factor as usize % ids.len();
                format!("{PHOTO_BASE}{}?{PHOTO_SIZE}", ids[index])
            }
            Self::Single(id) => format!("{PHOTO_BASE}{id}?{PHOTO_SIZE}"),
        }
    }
}

/// Lowercased prompt with everything but ASCII letters, digits, and whitespace removed
fn clean_prompt(prompt: &str) -> String {
    prompt
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// `(sum of UTF-16 code units + random_factor) % 10`
fn variety_index(prompt: &str, random_factor: u32) -> u32 {
    let seed = prompt
        .encode_utf16()
        .fold(0_u64, |acc, unit| acc + u64::from(unit));
    ((seed + u64::from(random_factor)) % 10) as u32
}

fn describe(prompt: &str, kind: ImageKind) -> String {
    match kind {
        ImageKind::Exercise => format!(
            "Exercise demonstration: {prompt}. This exercise helps improve strength, flexibility, and overall fitness."
        ),
        ImageKind::Meal => format!(
            "Nutritious meal: {prompt}. This meal provides essential nutrients and energy."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barbell_squat_maps_to_squat_category() {
        let image = StockImageSelector::select_with_random("barbell squat", ImageKind::Exercise, 7);
        assert_eq!(image.category, "squat");
        assert!(image.url.starts_with("https://images.unsplash.com/photo-"));
        assert!(image.url.contains("ixid="));
        assert!(image.variety < 10);
    }

    #[test]
    fn test_grilled_chicken_salad_maps_to_protein() {
        let image =
            StockImageSelector::select_with_random("grilled chicken salad", ImageKind::Meal, 0);
        assert_eq!(image.category, "protein");
        assert_eq!(
            image.url,
            "https://images.unsplash.com/photo-1546554137-f86b9593a222?w=400&h=300&fit=crop"
        );
    }

    #[test]
    fn test_variety_index_uses_code_unit_sum() {
        // 'a' + 'b' = 97 + 98 = 195
        assert_eq!(variety_index("ab", 0), 5);
        assert_eq!(variety_index("ab", 6), 1);
    }

    #[test]
    fn test_rotating_set_carries_matching_ixid() {
        // "leg" sums to 108 + 101 + 103 = 312, so variety 2 with factor 0
        let image = StockImageSelector::select_with_random("leg", ImageKind::Exercise, 0);
        assert_eq!(image.variety, 2);
        assert_eq!(
            image.url,
            "https://images.unsplash.com/photo-1549060279-7e168fcee0c2?w=400&h=300&fit=crop&auto=format&q=80&ixid=4"
        );
    }

    #[test]
    fn test_unmatched_prompt_uses_curated_default() {
        let image = StockImageSelector::select_with_random("zzz", ImageKind::Meal, 0);
        assert_eq!(image.category, "general-meal");
        assert!(image.description.starts_with("Nutritious meal: zzz."));
    }

    #[test]
    fn test_punctuation_is_ignored_when_matching() {
        let image = StockImageSelector::select_with_random("Push-Ups!", ImageKind::Exercise, 0);
        assert_eq!(image.category, "push");
    }

    #[test]
    fn test_random_selection_always_yields_url() {
        let selector = StockImageSelector::new();
        for prompt in ["", "yoga flow", "salmon bowl", "✨"] {
            let image = selector.select(prompt, ImageKind::Meal);
            assert!(!image.url.is_empty());
        }
    }
}
