// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Confetti Frame Loop
//!
//! Background task that advances a [`ConfettiField`] once per display frame
//! and publishes each finished frame through a `watch` channel.
//!
//! ## Shutdown
//!
//! Uses `tokio_util::sync::CancellationToken`. The token is cancelled by
//! [`ConfettiHandle::stop`] and also when the handle is dropped, so a
//! torn-down view never leaves a recurring task behind.

use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::confetti::{ConfettiField, Particle};

/// Default frame interval (~60 frames per second).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// One published animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Frames advanced since start; the initial seed is frame 0.
    pub number: u64,
    pub particles: Vec<Particle>,
}

/// Confetti animation that has not been started yet.
pub struct ConfettiLoop {
    field: ConfettiField,
    rng: StdRng,
    frame_interval: Duration,
}

impl ConfettiLoop {
    pub fn new(field: ConfettiField) -> Self {
        Self::with_rng(field, StdRng::from_entropy())
    }

    /// Use a specific random source for recycling particles.
    pub fn with_rng(field: ConfettiField, rng: StdRng) -> Self {
        Self {
            field,
            rng,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }

    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    /// Spawn the loop on the current tokio runtime.
    pub fn start(self) -> ConfettiHandle {
        let shutdown = CancellationToken::new();
        let (frames_tx, frames_rx) = watch::channel(Frame {
            number: 0,
            particles: self.field.particles().to_vec(),
        });
        let task = tokio::spawn(self.run(shutdown.clone(), frames_tx));

        ConfettiHandle {
            shutdown,
            task: Some(task),
            frames: frames_rx,
        }
    }

    async fn run(mut self, shutdown: CancellationToken, frames: watch::Sender<Frame>) {
        info!(
            particles = self.field.particles().len(),
            interval_ms = self.frame_interval.as_millis() as u64,
            "Confetti loop starting"
        );

        let mut ticker = tokio::time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; frame 0 is already published.
        ticker.tick().await;

        let mut number = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    debug!(frames = number, "Confetti loop shutting down");
                    return;
                }
                _ = ticker.tick() => {
                    self.field.advance(&mut self.rng);
                    number += 1;
                    let frame = Frame {
                        number,
                        particles: self.field.particles().to_vec(),
                    };
                    if frames.send(frame).is_err() {
                        debug!("No confetti observers left, stopping");
                        return;
                    }
                }
            }
        }
    }
}

/// Running confetti loop. Dropping the handle cancels the loop.
pub struct ConfettiHandle {
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
    frames: watch::Receiver<Frame>,
}

impl ConfettiHandle {
    /// Subscribe to published frames.
    pub fn frames(&self) -> watch::Receiver<Frame> {
        self.frames.clone()
    }

    /// The most recently published frame.
    pub fn latest(&self) -> Frame {
        self.frames.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel the loop and wait for the task to exit.
    pub async fn stop(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                debug!(error = %err, "Confetti task ended abnormally");
            }
        }
    }
}

impl Drop for ConfettiHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambient::confetti::Viewport;

    fn quick_loop() -> ConfettiLoop {
        let mut rng = StdRng::seed_from_u64(42);
        let field = ConfettiField::seeded(Viewport::default(), &mut rng);
        ConfettiLoop::with_rng(field, rng).with_frame_interval(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn publishes_seed_then_advances() {
        let handle = quick_loop().start();
        let mut frames = handle.frames();
        let seed = frames.borrow_and_update().clone();
        assert_eq!(seed.number, 0);
        assert_eq!(seed.particles.len(), 20);

        tokio::time::timeout(Duration::from_secs(5), frames.changed())
            .await
            .expect("frame within timeout")
            .expect("loop still running");
        let next = frames.borrow().clone();
        assert!(next.number >= 1);
        assert_eq!(next.particles.len(), seed.particles.len());
        assert_ne!(next.particles, seed.particles);

        handle.stop().await;
    }

    #[tokio::test]
    async fn stop_ends_the_task() {
        let handle = quick_loop().start();
        assert!(handle.is_running());
        let mut frames = handle.frames();
        handle.stop().await;

        // The sender is gone once the task has exited.
        let closed = tokio::time::timeout(Duration::from_secs(5), async {
            while frames.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok());
    }

    #[tokio::test]
    async fn dropping_the_handle_cancels_the_loop() {
        let handle = quick_loop().start();
        let mut frames = handle.frames();
        drop(handle);

        let closed = tokio::time::timeout(Duration::from_secs(5), async {
            while frames.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok(), "loop kept running after its handle was dropped");
    }
}
