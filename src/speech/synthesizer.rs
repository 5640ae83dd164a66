// ABOUTME: Speech synthesizer abstraction with voices, utterance options, and outcomes
// ABOUTME: Synthesizers observe the playback signal to pause, resume, and cancel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::playback::PlaybackSignal;
use crate::constants::speech::{DEFAULT_LANGUAGE, DEFAULT_VOICE};

/// An installed voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Display name
    pub name: String,
    /// BCP 47 language tag
    pub language: String,
    /// Synthesized on this machine rather than by a service
    pub local: bool,
}

/// Prefer a local English voice, then whatever comes first
#[must_use]
pub fn default_voice(voices: &[Voice]) -> Option<&Voice> {
    voices
        .iter()
        .find(|voice| voice.language.starts_with("en") && voice.local)
        .or_else(|| voices.first())
}

/// How an utterance should sound
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOptions {
    /// Voice name; the synthesizer default when `None`
    pub voice: Option<String>,
    /// BCP 47 language tag
    pub language: String,
    /// Speaking rate, 1.0 is normal
    pub rate: f32,
    /// Pitch, 1.0 is normal
    pub pitch: f32,
    /// Volume between 0.0 and 1.0
    pub volume: f32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            voice: None,
            language: DEFAULT_LANGUAGE.to_owned(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

impl SpeechOptions {
    /// Clamp numeric settings into the ranges synthesizers accept
    ///
    /// Zero or non-finite values fall back to the defaults.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let or_one = |value: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                1.0
            }
        };
        self.rate = or_one(self.rate).clamp(0.1, 10.0);
        self.pitch = or_one(self.pitch).clamp(0.0, 2.0);
        self.volume = or_one(self.volume).clamp(0.0, 1.0);
        self
    }

    /// Voice name to send to the remote speech endpoint
    #[must_use]
    pub fn remote_voice(&self) -> &str {
        self.voice.as_deref().unwrap_or(DEFAULT_VOICE)
    }
}

/// Text plus options
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Text to speak
    pub text: String,
    /// Voice settings
    pub options: SpeechOptions,
}

/// How an utterance ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechOutcome {
    /// Spoken to the end
    Completed,
    /// Replaced by another utterance
    Interrupted,
    /// Stopped by the user
    Canceled,
}

/// Synthesizer failures
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The synthesizer rejected the utterance
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
    /// Writing output failed
    #[error("speech output failed: {0}")]
    Io(#[from] std::io::Error),
    /// Nothing to say
    #[error("text is empty")]
    EmptyText,
}

/// Text-to-speech engine
///
/// `speak` runs until the utterance ends. Pause and resume arrive through
/// `signal`; a transition to idle means cancel.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Installed voices
    fn voices(&self) -> Vec<Voice>;

    /// Speak `utterance`, honouring `signal`
    async fn speak(
        &self,
        utterance: &Utterance,
        signal: PlaybackSignal,
    ) -> Result<SpeechOutcome, SpeechError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_voice_prefers_local_english() {
        let voices = vec![
            Voice {
                name: "Remote".to_owned(),
                language: "en-GB".to_owned(),
                local: false,
            },
            Voice {
                name: "Amelie".to_owned(),
                language: "fr-FR".to_owned(),
                local: true,
            },
            Voice {
                name: "Samantha".to_owned(),
                language: "en-US".to_owned(),
                local: true,
            },
        ];
        assert_eq!(default_voice(&voices).unwrap().name, "Samantha");
        assert_eq!(default_voice(&voices[..2]).unwrap().name, "Remote");
        assert!(default_voice(&[]).is_none());
    }

    #[test]
    fn test_options_are_clamped() {
        let options = SpeechOptions {
            rate: 0.0,
            pitch: 5.0,
            volume: f32::NAN,
            ..SpeechOptions::default()
        }
        .normalized();
        assert!((options.rate - 1.0).abs() < f32::EPSILON);
        assert!((options.pitch - 2.0).abs() < f32::EPSILON);
        assert!((options.volume - 1.0).abs() < f32::EPSILON);
        assert_eq!(options.remote_voice(), DEFAULT_VOICE);
    }
}
