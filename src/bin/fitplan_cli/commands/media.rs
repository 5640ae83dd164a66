// ABOUTME: Image and quote commands for fitplan-cli
// ABOUTME: Prints which image provider answered and the resulting URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use fitplan_providers::ImageKind;

use super::CliContext;
use crate::helpers::display::display_image;

/// Generate an illustration
pub async fn image(context: &CliContext, prompt: &str, kind: ImageKind) -> Result<()> {
    let outcome = context.api.generate_image(prompt, kind).await?;
    display_image(&outcome);
    Ok(())
}

/// Print a motivational quote
pub async fn quote(context: &CliContext) -> Result<()> {
    println!("\"{}\"", context.api.motivational_quote().await?);
    Ok(())
}
