// ABOUTME: Prompt templates that expand an exercise or meal name for each image service
// ABOUTME: Each service gets the phrasing and quality modifiers it responds best to
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ImageKind, ImageRequest};

/// Long-form instruction for the Gemini image model
#[must_use]
pub fn gemini(request: &ImageRequest) -> String {
    let prompt = &request.prompt;
    match request.kind {
        ImageKind::Exercise => format!(
            "Generate a professional, realistic fitness photograph showing a person performing the exercise: {prompt}. \n\
             The image should show:\n\
             - Proper form and correct posture\n\
             - Clean, modern gym or home workout environment\n\
             - Good lighting and professional photography quality\n\
             - The person should be in athletic wear\n\
             - The exercise should be clearly visible and inspiring\n\
             - Suitable for a fitness app, motivational and educational\n\
             Make it visually appealing, clear, and professional."
        ),
        ImageKind::Meal => format!(
            "Generate a professional, appetizing food photograph of: {prompt}. \n\
             The image should show:\n\
             - Beautifully plated and presented meal\n\
             - Good lighting, vibrant colors, professional food styling\n\
             - Looks delicious, healthy, and nutritious\n\
             - Clean background, suitable for a fitness and nutrition app\n\
             - Appetizing and visually appealing\n\
             Make it look professional and enticing."
        ),
    }
}

/// Keyword prompt shared by the diffusion services, with a service-specific tail
fn keyword_prompt(request: &ImageRequest, tail: &str) -> String {
    let prompt = &request.prompt;
    match request.kind {
        ImageKind::Exercise => format!(
            "professional fitness photograph, {prompt}, person performing exercise, proper form, gym setting, {tail}"
        ),
        ImageKind::Meal => format!(
            "professional food photography, {prompt}, beautifully plated, appetizing, restaurant quality, {tail}"
        ),
    }
}

/// Stability AI SDXL
#[must_use]
pub fn stability(request: &ImageRequest) -> String {
    keyword_prompt(request, "high quality, 4k, realistic, photography")
}

/// Getimg.ai and `DeepAI`
#[must_use]
pub fn standard(request: &ImageRequest) -> String {
    keyword_prompt(request, "high quality, realistic")
}

/// Pollinations
#[must_use]
pub fn pollinations(request: &ImageRequest) -> String {
    keyword_prompt(request, "high quality, realistic, photography, 8k")
}

/// Replicate stable diffusion
#[must_use]
pub fn replicate(request: &ImageRequest) -> String {
    keyword_prompt(request, "high quality, 4k, realistic")
}

/// DALL-E sentence prompt
#[must_use]
pub fn dalle(request: &ImageRequest) -> String {
    let prompt = &request.prompt;
    match request.kind {
        ImageKind::Exercise => format!(
            "A professional fitness photograph showing a person performing {prompt} exercise with proper form in a clean gym environment, high quality, realistic"
        ),
        ImageKind::Meal => format!(
            "A professional food photograph of {prompt}, beautifully plated and appetizing, restaurant quality, high quality, realistic"
        ),
    }
}
