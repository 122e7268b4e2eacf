// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Confetti particle model.
//!
//! Particles start above the viewport, fall at their own speed with a small
//! sideways drift and spin at a constant rate. Once a particle has fallen
//! [`WRAP_MARGIN`] past the bottom edge it is recycled just above the top at a
//! new horizontal position, keeping its speed and drift.

use rand::Rng;

/// Symbols a particle can be drawn as.
pub const CONFETTI_SYMBOLS: [&str; 4] = ["🕊️", "🧀", "💖", "🌸"];

/// Particles per field.
pub const PARTICLE_COUNT: usize = 20;

pub const MIN_SPEED: f64 = 1.0;
pub const MAX_SPEED: f64 = 3.0;
/// Drift is drawn from `[-MAX_DRIFT, MAX_DRIFT)`.
pub const MAX_DRIFT: f64 = 0.75;
/// Degrees added to the rotation every frame.
pub const ROTATION_STEP: f64 = 2.0;
/// How far below the viewport a particle falls before it is recycled.
pub const WRAP_MARGIN: f64 = 50.0;
/// Vertical position a recycled particle restarts from.
pub const RESPAWN_Y: f64 = -20.0;

/// Visible area the particles move in, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    /// Used when the real viewport size is not known (server rendering).
    fn default() -> Self {
        Self::new(1000.0, 800.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: usize,
    pub symbol: &'static str,
    pub x: f64,
    pub y: f64,
    /// Degrees, kept in `[0, 360)`.
    pub rotation: f64,
    pub speed: f64,
    pub drift: f64,
}

impl Particle {
    /// Create a particle somewhere above the viewport.
    pub fn spawn<R: Rng + ?Sized>(id: usize, viewport: Viewport, rng: &mut R) -> Self {
        Self {
            id,
            symbol: CONFETTI_SYMBOLS[rng.gen_range(0..CONFETTI_SYMBOLS.len())],
            x: rng.gen::<f64>() * viewport.width,
            y: -rng.gen::<f64>() * viewport.height,
            rotation: rng.gen::<f64>() * 360.0,
            speed: MIN_SPEED + rng.gen::<f64>() * (MAX_SPEED - MIN_SPEED),
            drift: (rng.gen::<f64>() - 0.5) * 2.0 * MAX_DRIFT,
        }
    }

    /// Advance by one frame.
    pub fn step<R: Rng + ?Sized>(&self, viewport: Viewport, rng: &mut R) -> Self {
        let mut next = Self {
            y: self.y + self.speed,
            x: self.x + self.drift,
            rotation: (self.rotation + ROTATION_STEP) % 360.0,
            ..self.clone()
        };

        if next.y > viewport.height + WRAP_MARGIN {
            next.y = RESPAWN_Y;
            next.x = rng.gen::<f64>() * viewport.width;
        }

        next
    }
}

/// A fixed-size set of particles sharing one viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiField {
    viewport: Viewport,
    particles: Vec<Particle>,
}

impl ConfettiField {
    /// Seed a field of [`PARTICLE_COUNT`] particles.
    pub fn seeded<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        Self::with_count(PARTICLE_COUNT, viewport, rng)
    }

    pub fn with_count<R: Rng + ?Sized>(count: usize, viewport: Viewport, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|id| Particle::spawn(id, viewport, rng))
            .collect();
        Self { viewport, particles }
    }

    /// Advance every particle by one frame. The whole pass completes before
    /// the field is observable again.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let viewport = self.viewport;
        self.particles = self
            .particles
            .iter()
            .map(|particle| particle.step(viewport, rng))
            .collect();
    }

    /// Adopt a new viewport size. Particles keep their positions.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
