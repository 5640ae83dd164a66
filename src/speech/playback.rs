// ABOUTME: Three-state playback machine shared between a speaking task and its controllers
// ABOUTME: Publishes Idle, Speaking, and Paused through a tokio watch channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Playback State
//!
//! ```text
//!   Idle --begin--> Speaking --pause--> Paused
//!    ^                |  ^                |
//!    |                |  +----resume------+
//!    +--finish/stop---+-------stop--------+
//! ```
//!
//! Synthesizers hold a [`PlaybackSignal`] and react to transitions: they wait
//! while paused and abandon the utterance once the state drops back to idle.

use std::fmt;

use tokio::sync::watch;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing is being spoken
    #[default]
    Idle,
    /// An utterance is being spoken
    Speaking,
    /// An utterance is suspended
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Speaking => write!(f, "speaking"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

/// State plus the utterance it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Playback {
    state: PlaybackState,
    generation: u64,
}

/// Owner of the playback state
#[derive(Debug)]
pub struct PlaybackMachine {
    playback: watch::Sender<Playback>,
}

impl Default for PlaybackMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackMachine {
    /// Machine starting idle
    #[must_use]
    pub fn new() -> Self {
        let (playback, _) = watch::channel(Playback::default());
        Self { playback }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.playback.borrow().state
    }

    /// Utterance counter, bumped by every [`Self::restart`]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.playback.borrow().generation
    }

    /// Start a new utterance, replacing whatever was playing
    ///
    /// The returned signal reads as idle once a later utterance takes over.
    pub fn restart(&self) -> PlaybackSignal {
        self.playback.send_modify(|playback| {
            playback.generation = playback.generation.wrapping_add(1);
            playback.state = PlaybackState::Speaking;
        });
        let playback = self.playback.subscribe();
        let generation = playback.borrow().generation;
        PlaybackSignal {
            playback,
            generation,
        }
    }

    /// Apply `from -> to` if the current state is one of `from`
    fn transition(&self, from: &[PlaybackState], to: PlaybackState) -> bool {
        self.playback.send_if_modified(|playback| {
            if from.contains(&playback.state) {
                playback.state = to;
                true
            } else {
                false
            }
        })
    }

    /// Speaking to paused
    pub fn pause(&self) -> bool {
        self.transition(&[PlaybackState::Speaking], PlaybackState::Paused)
    }

    /// Paused to speaking
    pub fn resume(&self) -> bool {
        self.transition(&[PlaybackState::Paused], PlaybackState::Speaking)
    }

    /// Speaking or paused to idle
    pub fn stop(&self) -> bool {
        self.transition(
            &[PlaybackState::Speaking, PlaybackState::Paused],
            PlaybackState::Idle,
        )
    }

    /// Return to idle if `generation` is still the current utterance
    pub fn finish(&self, generation: u64) -> bool {
        self.playback.send_if_modified(|playback| {
            if playback.generation == generation && playback.state != PlaybackState::Idle {
                playback.state = PlaybackState::Idle;
                true
            } else {
                false
            }
        })
    }
}

/// Read side of the playback state for one utterance
#[derive(Debug, Clone)]
pub struct PlaybackSignal {
    playback: watch::Receiver<Playback>,
    generation: u64,
}

impl PlaybackSignal {
    /// Utterance this signal belongs to
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    fn effective(&self, playback: Playback) -> PlaybackState {
        if playback.generation == self.generation {
            playback.state
        } else {
            PlaybackState::Idle
        }
    }

    /// Current state; idle once replaced by a newer utterance
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.effective(*self.playback.borrow())
    }

    /// Whether a newer utterance has taken over
    #[must_use]
    pub fn superseded(&self) -> bool {
        self.playback.borrow().generation != self.generation
    }

    /// Wait for the next transition, returning the new state
    ///
    /// Returns [`PlaybackState::Idle`] once the machine is gone.
    pub async fn changed(&mut self) -> PlaybackState {
        match self.playback.changed().await {
            Ok(()) => {
                let playback = *self.playback.borrow_and_update();
                self.effective(playback)
            }
            Err(_) => PlaybackState::Idle,
        }
    }

    /// Block while paused; `false` when playback was stopped or replaced
    pub async fn proceed(&mut self) -> bool {
        loop {
            let playback = *self.playback.borrow_and_update();
            match self.effective(playback) {
                PlaybackState::Speaking => return true,
                PlaybackState::Idle => return false,
                PlaybackState::Paused => {}
            }
            if self.playback.changed().await.is_err() {
                return false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_follow_the_machine() {
        let machine = PlaybackMachine::new();
        assert!(!machine.pause());
        assert!(!machine.resume());
        let signal = machine.restart();
        assert_eq!(signal.state(), PlaybackState::Speaking);
        assert!(machine.pause());
        assert_eq!(machine.state(), PlaybackState::Paused);
        assert!(machine.resume());
        assert!(machine.stop());
        assert_eq!(machine.state(), PlaybackState::Idle);
        assert!(!machine.stop());
    }

    #[tokio::test]
    async fn test_proceed_waits_for_resume() {
        let machine = PlaybackMachine::new();
        let mut signal = machine.restart();
        machine.pause();

        let waiter = tokio::spawn(async move { signal.proceed().await });
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        machine.resume();
        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_proceed_reports_stop() {
        let machine = PlaybackMachine::new();
        let mut signal = machine.restart();
        machine.pause();
        machine.stop();
        assert!(!signal.proceed().await);
    }

    #[tokio::test]
    async fn test_restart_replaces_previous_utterance() {
        let machine = PlaybackMachine::new();
        let mut first = machine.restart();
        let second = machine.restart();

        assert!(first.superseded());
        assert_eq!(first.state(), PlaybackState::Idle);
        assert!(!first.proceed().await);
        assert_eq!(second.state(), PlaybackState::Speaking);

        assert!(!machine.finish(first.generation()));
        assert_eq!(machine.state(), PlaybackState::Speaking);
        assert!(machine.finish(second.generation()));
        assert_eq!(machine.state(), PlaybackState::Idle);
    }
}
