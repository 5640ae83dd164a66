// ABOUTME: FitPlan CLI - terminal client for generating, showing, and narrating fitness plans
// ABOUTME: Keeps the last profile and plan in a local store and reads plans aloud
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Generate a plan from a profile file and save it
//! fitplan-cli generate --profile profile.json
//!
//! # Generate a new plan from the saved profile
//! fitplan-cli regenerate
//!
//! # Print the saved plan
//! fitplan-cli show
//!
//! # Illustrate a meal
//! fitplan-cli image "grilled chicken salad" --type meal
//!
//! # Read the workout plan aloud at a faster pace
//! fitplan-cli speak workout --rate 1.3
//!
//! # Forget the saved profile and plan
//! fitplan-cli reset
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fitplan_providers::ImageKind;
use fitplan_server::logging::LoggingConfig;
use fitplan_server::speech::PlanSection;
use tracing::debug;

use commands::CliContext;

#[derive(Parser)]
#[command(
    name = "fitplan-cli",
    about = "FitPlan terminal client",
    long_about = "Generate seven-day workout and diet plans through a FitPlan server, keep the last plan locally, and read it aloud."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Server URL override (defaults to `FITPLAN_SERVER_URL` or http://localhost:8081)
    #[arg(long, global = true)]
    server_url: Option<String>,

    /// Local store directory override (defaults to `FITPLAN_DATA_DIR` or the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Generate a plan from a profile JSON file and save both
    Generate {
        /// Path to the profile JSON file
        #[arg(long)]
        profile: PathBuf,
    },

    /// Generate a new plan from the saved profile
    Regenerate,

    /// Print the saved plan
    Show {
        /// Which part to print
        #[arg(default_value = "both")]
        section: PlanSection,
    },

    /// Forget the saved profile and plan
    Reset,

    /// Generate an illustration for an exercise or meal
    Image {
        /// What to depict
        prompt: String,

        /// `exercise` or `meal`
        #[arg(long = "type", default_value = "exercise", value_parser = parse_image_kind)]
        kind: ImageKind,
    },

    /// Print a motivational quote
    Quote,

    /// Read the saved plan aloud (p = pause, r = resume, s = stop, then Enter)
    Speak {
        /// Which part to read
        #[arg(default_value = "both")]
        section: PlanSection,

        /// Voice name
        #[arg(long)]
        voice: Option<String>,

        /// Language tag
        #[arg(long, default_value = "en-US")]
        language: String,

        /// Speaking rate, 1.0 is normal
        #[arg(long, default_value = "1.0")]
        rate: f32,

        /// Pitch, 1.0 is normal
        #[arg(long, default_value = "1.0")]
        pitch: f32,

        /// Volume between 0.0 and 1.0
        #[arg(long, default_value = "1.0")]
        volume: f32,
    },
}

fn parse_image_kind(value: &str) -> std::result::Result<ImageKind, String> {
    ImageKind::parse_str(value).ok_or_else(|| format!("expected 'exercise' or 'meal', got '{value}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    LoggingConfig::for_cli(cli.verbose).init()?;
    debug!("FitPlan CLI");

    let context = CliContext::new(cli.server_url, cli.data_dir)?;

    // Execute command
    match cli.command {
        Command::Generate { profile } => commands::plan::generate(&context, &profile).await?,
        Command::Regenerate => commands::plan::regenerate(&context).await?,
        Command::Show { section } => commands::plan::show(&context, section)?,
        Command::Reset => commands::plan::reset(&context)?,
        Command::Image { prompt, kind } => commands::media::image(&context, &prompt, kind).await?,
        Command::Quote => commands::media::quote(&context).await?,
        Command::Speak {
            section,
            voice,
            language,
            rate,
            pitch,
            volume,
        } => {
            let options = fitplan_server::speech::SpeechOptions {
                voice,
                language,
                rate,
                pitch,
                volume,
            };
            commands::speak::speak(&context, section, options).await?;
        }
    }

    Ok(())
}
