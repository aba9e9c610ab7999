//! Ephemeral particle bursts for paddle-hit feedback
//!
//! Purely cosmetic: particles advance and fade every tick regardless of
//! game phase and never feed back into game logic.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::GameColor;
use crate::consts::{PARTICLE_BURST, PARTICLE_FADE};

/// A single spark from a paddle hit
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: GameColor,
    /// Fade level, 1.0 down to 0; the particle dies at <= 0
    pub alpha: f32,
}

/// Spawn a burst of particles at an impact point, in the paddle's color
pub fn spawn_burst(particles: &mut Vec<Particle>, rng: &mut Pcg32, pos: Vec2, color: GameColor) {
    for _ in 0..PARTICLE_BURST {
        particles.push(Particle {
            pos,
            vel: Vec2::new(rng.random_range(-2.5..2.5), rng.random_range(-2.5..2.5)),
            radius: rng.random_range(1.0..4.0),
            color,
            alpha: 1.0,
        });
    }
}

/// Advance and fade all live particles, discarding dead ones.
/// Runs every tick; skipping the fade would grow the pool unboundedly.
pub fn update(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.alpha -= PARTICLE_FADE;
    }
    particles.retain(|p| p.alpha > 0.0);
}
