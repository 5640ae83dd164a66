// ABOUTME: In-process synthesizer that reads text aloud to a terminal, one sentence per line
// ABOUTME: Paces sentences by word count and speaking rate and honours pause, resume, and stop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use super::playback::{PlaybackSignal, PlaybackState};
use super::synthesizer::{SpeechError, SpeechOutcome, SpeechSynthesizer, Utterance, Voice};
use crate::constants::speech::DEFAULT_LANGUAGE;

/// Time per word at rate 1.0, about 160 words per minute
pub const DEFAULT_WORD_DURATION: Duration = Duration::from_millis(375);

/// Terminal synthesizer
pub struct ConsoleSynthesizer {
    out: Mutex<Box<dyn Write + Send>>,
    word_duration: Duration,
}

impl ConsoleSynthesizer {
    /// Synthesizer writing to `out`
    #[must_use]
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            word_duration: DEFAULT_WORD_DURATION,
        }
    }

    /// Synthesizer writing to stdout
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Override the per-word pace
    #[must_use]
    pub const fn with_word_duration(mut self, word_duration: Duration) -> Self {
        self.word_duration = word_duration;
        self
    }

    fn write_line(&self, line: &str) -> Result<(), SpeechError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| SpeechError::Synthesis("console output lock poisoned".to_owned()))?;
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }

    fn pace(&self, sentence: &str, rate: f32) -> Duration {
        let words = sentence.split_whitespace().count() as f32;
        self.word_duration.mul_f32(words / rate)
    }
}

/// Split text after sentence-ending punctuation
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
}

/// Replaced by a newer utterance is an interruption, anything else a cancel
fn halted(signal: &PlaybackSignal) -> SpeechOutcome {
    if signal.superseded() {
        SpeechOutcome::Interrupted
    } else {
        SpeechOutcome::Canceled
    }
}

#[async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        vec![Voice {
            name: "Console".to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
            local: true,
        }]
    }

    async fn speak(
        &self,
        utterance: &Utterance,
        mut signal: PlaybackSignal,
    ) -> Result<SpeechOutcome, SpeechError> {
        for sentence in sentences(&utterance.text) {
            if !signal.proceed().await {
                return Ok(halted(&signal));
            }
            self.write_line(sentence)?;

            let pause = sleep(self.pace(sentence, utterance.options.rate));
            tokio::pin!(pause);
            loop {
                tokio::select! {
                    () = &mut pause => break,
                    state = signal.changed() => {
                        if state == PlaybackState::Idle {
                            return Ok(halted(&signal));
                        }
                    }
                }
            }
        }
        Ok(SpeechOutcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::{SpeechOptions, SpeechPlayer};
    use std::sync::Arc;

    /// Writer whose contents stay readable after being boxed
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_sentences_split_on_terminators() {
        let parts: Vec<_> = sentences("Day 1, Monday. Rest well!  Ready? go").collect();
        assert_eq!(parts, vec!["Day 1, Monday.", "Rest well!", "Ready?", "go"]);
    }

    #[tokio::test]
    async fn test_speaks_every_sentence() {
        let buffer = SharedBuffer::default();
        let synth = ConsoleSynthesizer::new(Box::new(buffer.clone()))
            .with_word_duration(Duration::ZERO);
        let player = SpeechPlayer::new(Arc::new(synth));

        let outcome = player
            .speak("First line. Second line.", SpeechOptions::default())
            .await
            .unwrap();

        assert_eq!(outcome, SpeechOutcome::Completed);
        assert_eq!(buffer.contents(), "First line.\nSecond line.\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_remaining_sentences() {
        let buffer = SharedBuffer::default();
        let synth = ConsoleSynthesizer::new(Box::new(buffer.clone()))
            .with_word_duration(Duration::from_secs(1));
        let player = SpeechPlayer::new(Arc::new(synth));

        let speaker = player.clone();
        let task = tokio::spawn(async move {
            speaker
                .speak("One two. Three four.", SpeechOptions::default())
                .await
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(player.stop());

        assert_eq!(task.await.unwrap().unwrap(), SpeechOutcome::Canceled);
        assert_eq!(buffer.contents(), "One two.\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_utterance_replaces_the_playing_one() {
        let buffer = SharedBuffer::default();
        let synth = ConsoleSynthesizer::new(Box::new(buffer.clone()))
            .with_word_duration(Duration::from_secs(1));
        let player = SpeechPlayer::new(Arc::new(synth));

        let first = player.clone();
        let a = tokio::spawn(async move {
            first
                .speak("A1 go. A2 go. A3 go.", SpeechOptions::default())
                .await
        });
        tokio::time::sleep(Duration::from_millis(500)).await;

        let second = player.clone();
        let b = tokio::spawn(async move {
            second
                .speak("B1. B2. B3. B4. B5.", SpeechOptions::default())
                .await
        });

        assert_eq!(a.await.unwrap().unwrap(), SpeechOutcome::Interrupted);
        assert_eq!(b.await.unwrap().unwrap(), SpeechOutcome::Completed);
        assert_eq!(player.state(), PlaybackState::Idle);
        assert_eq!(buffer.contents(), "A1 go.\nB1.\nB2.\nB3.\nB4.\nB5.\n");
    }
}
