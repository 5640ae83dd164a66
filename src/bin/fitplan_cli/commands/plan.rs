// ABOUTME: Plan commands for fitplan-cli
// ABOUTME: Handles generate, regenerate, show, and reset against the server and local store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use fitplan_server::models::{UserProfile, UserProfileRequest};
use fitplan_server::speech::PlanSection;
use tracing::info;

use super::CliContext;
use crate::helpers::display::{display_plan, display_session_saved};

/// Generate a plan from a profile file and save profile and plan
pub async fn generate(context: &CliContext, profile_path: &Path) -> Result<()> {
    let contents = fs::read_to_string(profile_path)
        .with_context(|| format!("Failed to read profile file {}", profile_path.display()))?;
    let request: UserProfileRequest = serde_json::from_str(&contents)
        .with_context(|| format!("Profile file {} is not valid JSON", profile_path.display()))?;

    // Reject incomplete profiles before contacting the server
    let profile = request.validate()?;
    request_and_save(context, &profile).await
}

/// Generate a new plan from the saved profile
pub async fn regenerate(context: &CliContext) -> Result<()> {
    let Some(profile) = context.store()?.load_profile()? else {
        bail!("No saved profile. Run `fitplan-cli generate --profile <file>` first.");
    };
    request_and_save(context, &profile).await
}

async fn request_and_save(context: &CliContext, profile: &UserProfile) -> Result<()> {
    info!(user = %profile.name, server = %context.api.base_url(), "Requesting plan");
    println!("Generating a plan for {}...", profile.name);

    let plan = context
        .api
        .generate_plan(&UserProfileRequest::from(profile))
        .await?;

    let mut store = context.store()?;
    store.save_session(profile, &plan)?;

    display_plan(&plan, PlanSection::Both);
    display_session_saved(store.path());
    Ok(())
}

/// Print the saved plan
pub fn show(context: &CliContext, section: PlanSection) -> Result<()> {
    match context.store()?.load_plan()? {
        Some(plan) => display_plan(&plan, section),
        None => println!("No saved plan. Run `fitplan-cli generate --profile <file>` first."),
    }
    Ok(())
}

/// Forget the saved profile and plan
pub fn reset(context: &CliContext) -> Result<()> {
    let mut store = context.store()?;
    store.reset()?;
    println!("Saved profile and plan cleared ({}).", store.path().display());
    Ok(())
}
