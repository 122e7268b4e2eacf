// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ambient music toggle.
//!
//! The controller never assumes a play or pause command succeeded. The
//! displayed state follows the audio element's own `play`, `pause` and
//! `ended` events, so commands and native playback stay in sync both ways.
//!
//! Autoplay is attempted once when the scene mounts. Browsers often block it;
//! in that case the first click or key press on ordinary page content (not
//! on a button or form field) makes one more attempt.

use tracing::{debug, warn};

/// Location of the background track under the static assets.
pub const MUSIC_SRC: &str = "/assets/music/bg_edited.mp3";

pub const DEFAULT_VOLUME: f32 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("playback blocked until the user interacts with the page")]
    Blocked,
    #[error("audio unavailable: {0}")]
    Unavailable(String),
}

/// The audio element the controller drives.
pub trait AudioElement {
    /// Request playback. Success means the request was accepted; the element
    /// reports actual playback through [`MediaEvent::Play`].
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn set_volume(&mut self, volume: f32);
}

/// Native playback events emitted by the audio element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    Play,
    Pause,
    Ended,
}

/// Where a user interaction landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionTarget {
    /// A button, input, textarea or select
    Control,
    /// Anything else on the page
    Content,
}

/// Icon shown on the music button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackIcon {
    Play,
    Pause,
}

pub struct MusicController<A> {
    audio: A,
    playing: bool,
    user_interacted: bool,
    volume: f32,
}

impl<A: AudioElement> MusicController<A> {
    pub fn new(mut audio: A, volume: f32) -> Self {
        let volume = clamp_volume(volume);
        audio.set_volume(volume);
        Self {
            audio,
            playing: false,
            user_interacted: false,
            volume,
        }
    }

    /// Try to start playback without user involvement. Returns whether the
    /// element accepted the request.
    pub fn try_autoplay(&mut self) -> bool {
        match self.audio.play() {
            Ok(()) => {
                self.user_interacted = true;
                true
            }
            Err(err) => {
                debug!(error = %err, "Autoplay blocked, waiting for user interaction");
                self.playing = false;
                false
            }
        }
    }

    /// Button press: play when paused, pause when playing.
    pub fn toggle(&mut self) {
        self.user_interacted = true;
        if self.audio.is_paused() {
            if let Err(err) = self.audio.play() {
                warn!(error = %err, "Failed to start music");
            }
        } else {
            self.audio.pause();
        }
    }

    /// Sync the displayed state with a native playback event.
    pub fn on_media_event(&mut self, event: MediaEvent) {
        self.playing = event == MediaEvent::Play;
    }

    /// First-interaction fallback for blocked autoplay. Returns whether a
    /// play attempt was made and accepted. Once one succeeds, later
    /// interactions are ignored.
    pub fn on_interaction(&mut self, target: InteractionTarget) -> bool {
        if target == InteractionTarget::Control || !self.awaiting_interaction() {
            return false;
        }
        if !self.audio.is_paused() {
            return false;
        }
        match self.audio.play() {
            Ok(()) => {
                self.user_interacted = true;
                true
            }
            Err(err) => {
                debug!(error = %err, "Failed to start music on user interaction");
                false
            }
        }
    }

    /// Whether page-wide interaction listeners are still needed.
    pub fn awaiting_interaction(&self) -> bool {
        !self.user_interacted
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn icon(&self) -> PlaybackIcon {
        if self.playing {
            PlaybackIcon::Pause
        } else {
            PlaybackIcon::Play
        }
    }

    pub fn aria_label(&self) -> &'static str {
        if self.playing {
            "Pause music"
        } else {
            "Play music"
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set the volume, clamped to `[0, 1]`.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
        self.audio.set_volume(self.volume);
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        DEFAULT_VOLUME
    } else {
        volume.clamp(0.0, 1.0)
    }
}
