// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Ambient Layer
//!
//! Decorative extras on the gallery pages: falling confetti and background
//! music. Neither has anything to do with access control.
//!
//! [`AmbientScene`] is the state object owned by the top-level view. It holds
//! the music controller and the running confetti loop and is passed down
//! explicitly; there is no process-wide instance.

pub mod confetti;
pub mod frame_loop;
pub mod music;

pub use confetti::{ConfettiField, Particle, Viewport};
pub use frame_loop::{ConfettiHandle, ConfettiLoop, Frame};
pub use music::{AudioElement, InteractionTarget, MediaEvent, MusicController, PlaybackIcon};

use rand::{rngs::StdRng, SeedableRng};

/// Ambient state for one mounted view.
pub struct AmbientScene<A> {
    music: MusicController<A>,
    viewport: Viewport,
    confetti: Option<ConfettiHandle>,
}

impl<A: AudioElement> AmbientScene<A> {
    /// Mount the scene: start the confetti loop and attempt autoplay.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(audio: A, viewport: Viewport) -> Self {
        let mut music = MusicController::new(audio, music::DEFAULT_VOLUME);
        music.try_autoplay();
        Self {
            music,
            viewport,
            confetti: Some(start_confetti(viewport)),
        }
    }

    pub fn music(&self) -> &MusicController<A> {
        &self.music
    }

    pub fn music_mut(&mut self) -> &mut MusicController<A> {
        &mut self.music
    }

    pub fn confetti(&self) -> Option<&ConfettiHandle> {
        self.confetti.as_ref()
    }

    pub fn show_confetti(&self) -> bool {
        self.confetti.is_some()
    }

    /// Switch confetti off (cancelling the loop) or back on (with a freshly
    /// seeded field). Returns the new visibility.
    pub fn toggle_confetti(&mut self) -> bool {
        match self.confetti.take() {
            Some(handle) => drop(handle),
            None => self.confetti = Some(start_confetti(self.viewport)),
        }
        self.show_confetti()
    }

    /// Tear the scene down, waiting for the confetti loop to exit.
    pub async fn unmount(mut self) {
        if let Some(handle) = self.confetti.take() {
            handle.stop().await;
        }
    }
}

fn start_confetti(viewport: Viewport) -> ConfettiHandle {
    let mut rng = StdRng::from_entropy();
    let field = ConfettiField::seeded(viewport, &mut rng);
    ConfettiLoop::with_rng(field, rng).start()
}
