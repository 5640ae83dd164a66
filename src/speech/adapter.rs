// ABOUTME: Speech adapter that asks the remote endpoint first and falls back to local playback
// ABOUTME: The remote endpoint is advisory and currently never returns audio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::player::SpeechPlayer;
use super::synthesizer::{SpeechError, SpeechOptions, SpeechOutcome};
use crate::errors::AppError;

/// Server-side speech endpoint
#[async_trait]
pub trait RemoteSpeech: Send + Sync {
    /// Request audio for `text`; `None` when only text came back
    async fn audio_for(
        &self,
        text: &str,
        voice: &str,
        language: &str,
    ) -> Result<Option<String>, AppError>;
}

/// Where speech ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechRoute {
    /// The remote endpoint produced playable audio at this URL
    RemoteAudio(String),
    /// The local synthesizer spoke the text
    Local(SpeechOutcome),
}

/// Remote-first speech with local fallback
#[derive(Clone)]
pub struct SpeechAdapter {
    remote: Option<Arc<dyn RemoteSpeech>>,
    player: SpeechPlayer,
}

impl SpeechAdapter {
    /// Adapter over an optional remote endpoint and a local player
    #[must_use]
    pub fn new(remote: Option<Arc<dyn RemoteSpeech>>, player: SpeechPlayer) -> Self {
        Self { remote, player }
    }

    /// Local player, for pause, resume, and stop
    #[must_use]
    pub const fn player(&self) -> &SpeechPlayer {
        &self.player
    }

    /// Speak `text`
    ///
    /// # Errors
    ///
    /// Returns an error if local synthesis fails; remote failures only log
    pub async fn speak(
        &self,
        text: &str,
        options: SpeechOptions,
    ) -> Result<SpeechRoute, SpeechError> {
        if let Some(remote) = &self.remote {
            match remote
                .audio_for(text, options.remote_voice(), &options.language)
                .await
            {
                Ok(Some(audio_url)) => return Ok(SpeechRoute::RemoteAudio(audio_url)),
                Ok(None) => debug!("Remote speech returned no audio, using local synthesizer"),
                Err(e) => warn!(error = %e, "Remote speech failed, using local synthesizer"),
            }
        }

        self.player
            .speak(text, options)
            .await
            .map(SpeechRoute::Local)
    }
}
