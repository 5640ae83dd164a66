// ABOUTME: Application-wide constants for plan generation, storage, and speech
// ABOUTME: Centralizes model parameters and static fallback texts used across crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service identity used in logs and health responses
pub mod service_names {
    /// Name of the HTTP server binary
    pub const FITPLAN_SERVER: &str = "fitplan-server";
    /// Name of the terminal client binary
    pub const FITPLAN_CLI: &str = "fitplan-cli";
}

/// Text model generation parameters for plan requests
pub mod generation {
    /// Default text model
    pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
    /// Default image model
    pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
    /// Sampling temperature for plan generation
    pub const PLAN_TEMPERATURE: f32 = 0.7;
    /// Top-k sampling for plan generation
    pub const PLAN_TOP_K: u32 = 40;
    /// Top-p sampling for plan generation
    pub const PLAN_TOP_P: f32 = 0.95;
    /// Output token ceiling for plan generation
    pub const PLAN_MAX_OUTPUT_TOKENS: u32 = 8192;
    /// Number of days every plan must cover
    pub const PLAN_DAYS: usize = 7;
}

/// Motivational quote texts
pub mod quotes {
    /// Returned whenever the model cannot produce a quote
    pub const FALLBACK_QUOTE: &str =
        "Every workout brings you closer to your goals. Stay consistent, stay strong!";
}

/// Client-side persisted state
pub mod storage {
    /// Key holding the last generated plan
    pub const FITNESS_PLAN_KEY: &str = "fitness-plan";
    /// Key holding the last submitted profile
    pub const USER_PROFILE_KEY: &str = "user-profile";
    /// File name of the local store inside the data directory
    pub const STORE_FILE_NAME: &str = "local-storage.json";
}

/// Speech defaults
pub mod speech {
    /// Voice requested when the caller names none
    pub const DEFAULT_VOICE: &str = "Zephyr";
    /// Language tag requested when the caller names none
    pub const DEFAULT_LANGUAGE: &str = "en-US";
    /// Message returned by the advisory speech endpoint
    pub const CLIENT_FALLBACK_MESSAGE: &str =
        "Speech generation prepared. Using client-side TTS as fallback.";
}
