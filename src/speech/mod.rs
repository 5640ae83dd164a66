// ABOUTME: Client-side text-to-speech: synthesizers, playback state, narration, and remote fallback
// ABOUTME: Reads generated plans aloud with pause, resume, and stop control
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Speech
//!
//! The server's speech endpoint only validates and echoes its input, so real
//! playback happens here. [`SpeechAdapter`] asks the endpoint first and hands
//! the text to a local [`SpeechPlayer`] when no audio comes back.

pub mod adapter;
pub mod console;
pub mod narration;
pub mod playback;
pub mod player;
pub mod synthesizer;

pub use adapter::{RemoteSpeech, SpeechAdapter, SpeechRoute};
pub use console::ConsoleSynthesizer;
pub use narration::{diet_narration, format_for_speech, plan_narration, workout_narration, PlanSection};
pub use playback::{PlaybackMachine, PlaybackSignal, PlaybackState};
pub use player::SpeechPlayer;
pub use synthesizer::{
    default_voice, SpeechError, SpeechOptions, SpeechOutcome, SpeechSynthesizer, Utterance, Voice,
};
