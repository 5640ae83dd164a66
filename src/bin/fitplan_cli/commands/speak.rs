// ABOUTME: Speak command for fitplan-cli
// ABOUTME: Reads the saved plan aloud and maps stdin keys to pause, resume, and stop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use fitplan_server::speech::{
    plan_narration, ConsoleSynthesizer, PlanSection, RemoteSpeech, SpeechAdapter, SpeechOptions,
    SpeechOutcome, SpeechPlayer, SpeechRoute,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use super::CliContext;

/// Read the saved plan aloud
pub async fn speak(context: &CliContext, section: PlanSection, options: SpeechOptions) -> Result<()> {
    let Some(plan) = context.store()?.load_plan()? else {
        bail!("No saved plan. Run `fitplan-cli generate --profile <file>` first.");
    };
    let text = plan_narration(&plan, section);

    let remote: Arc<dyn RemoteSpeech> = Arc::new(context.api.clone());
    let adapter = SpeechAdapter::new(
        Some(remote),
        SpeechPlayer::new(Arc::new(ConsoleSynthesizer::stdout())),
    );
    let player = adapter.player().clone();

    println!("Reading plan aloud. Type p (pause), r (resume), or s (stop) and press Enter.\n");
    let mut speaking = tokio::spawn(async move { adapter.speak(&text, options).await });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let route = loop {
        tokio::select! {
            result = &mut speaking => break result.context("Speech task failed")??,
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(command)) => match command.trim() {
                    "p" | "pause" => {
                        player.pause();
                    }
                    "r" | "resume" => {
                        player.resume();
                    }
                    "s" | "stop" | "q" => {
                        player.stop();
                    }
                    _ => println!("Unknown command, use p, r, or s."),
                },
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!(error = %e, "Failed to read playback commands from stdin");
                    stdin_open = false;
                }
            },
        }
    };

    match route {
        SpeechRoute::RemoteAudio(url) => println!("Audio available at {url}"),
        SpeechRoute::Local(SpeechOutcome::Completed) => println!("\nDone."),
        SpeechRoute::Local(_) => println!("\nStopped."),
    }
    Ok(())
}
