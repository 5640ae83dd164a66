// ABOUTME: Drives a speech synthesizer through the playback state machine
// ABOUTME: Treats interruption and cancellation as normal completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use tracing::{debug, warn};

use super::playback::{PlaybackMachine, PlaybackState};
use super::synthesizer::{
    default_voice, SpeechError, SpeechOptions, SpeechOutcome, SpeechSynthesizer, Utterance,
};

/// Cloneable handle: one clone speaks while others pause, resume, or stop
#[derive(Clone)]
pub struct SpeechPlayer {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    machine: Arc<PlaybackMachine>,
}

impl SpeechPlayer {
    /// Player over `synthesizer`
    #[must_use]
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            synthesizer,
            machine: Arc::new(PlaybackMachine::new()),
        }
    }

    /// Current playback state
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.machine.state()
    }

    /// Speak `text` until it ends or is stopped
    ///
    /// Anything already playing is replaced and its call returns
    /// [`SpeechOutcome::Interrupted`].
    ///
    /// # Errors
    ///
    /// Returns an error for empty text or a synthesizer failure
    pub async fn speak(
        &self,
        text: &str,
        options: SpeechOptions,
    ) -> Result<SpeechOutcome, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        if self.machine.state() != PlaybackState::Idle {
            debug!("Replacing previous utterance");
        }
        let signal = self.machine.restart();
        let generation = signal.generation();

        let mut options = options.normalized();
        if options.voice.is_none() {
            options.voice = default_voice(&self.synthesizer.voices()).map(|voice| voice.name.clone());
        }
        let utterance = Utterance {
            text: text.to_owned(),
            options,
        };
        let mut result = self.synthesizer.speak(&utterance, signal).await;
        if self.machine.generation() == generation {
            self.machine.finish(generation);
        } else if result.is_ok() {
            result = Ok(SpeechOutcome::Interrupted);
        }

        match result {
            Ok(SpeechOutcome::Interrupted) => {
                warn!("Speech was interrupted, this is normal behavior");
                Ok(SpeechOutcome::Interrupted)
            }
            Ok(SpeechOutcome::Canceled) => {
                warn!("Speech was canceled");
                Ok(SpeechOutcome::Canceled)
            }
            other => other,
        }
    }

    /// Pause if speaking
    pub fn pause(&self) -> bool {
        self.machine.pause()
    }

    /// Resume if paused
    pub fn resume(&self) -> bool {
        self.machine.resume()
    }

    /// Stop speaking or paused playback
    pub fn stop(&self) -> bool {
        self.machine.stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::playback::PlaybackSignal;
    use crate::speech::synthesizer::Voice;
    use async_trait::async_trait;

    struct Fixed(Result<SpeechOutcome, &'static str>);

    #[async_trait]
    impl SpeechSynthesizer for Fixed {
        fn voices(&self) -> Vec<Voice> {
            Vec::new()
        }

        async fn speak(
            &self,
            _utterance: &Utterance,
            signal: PlaybackSignal,
        ) -> Result<SpeechOutcome, SpeechError> {
            assert_eq!(signal.state(), PlaybackState::Speaking);
            self.0.map_err(|e| SpeechError::Synthesis(e.to_owned()))
        }
    }

    #[tokio::test]
    async fn test_interruption_is_normal_completion() {
        let player = SpeechPlayer::new(Arc::new(Fixed(Ok(SpeechOutcome::Interrupted))));
        let outcome = player.speak("Hello", SpeechOptions::default()).await;
        assert_eq!(outcome.unwrap(), SpeechOutcome::Interrupted);
        assert_eq!(player.state(), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_synthesis_error_resets_state() {
        let player = SpeechPlayer::new(Arc::new(Fixed(Err("audio-busy"))));
        let outcome = player.speak("Hello", SpeechOptions::default()).await;
        assert!(matches!(outcome, Err(SpeechError::Synthesis(_))));
        assert_eq!(player.state(), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let player = SpeechPlayer::new(Arc::new(Fixed(Ok(SpeechOutcome::Completed))));
        assert!(matches!(
            player.speak("  ", SpeechOptions::default()).await,
            Err(SpeechError::EmptyText)
        ));
    }
}
