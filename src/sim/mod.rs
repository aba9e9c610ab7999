//! Simulation module
//!
//! All gameplay logic lives here. This module is pure and platform-free:
//! - State owned by one struct, passed to step functions explicitly
//! - Seeded RNG only
//! - No rendering, DOM, or audio dependencies

pub mod collision;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{collides, deflected_vy, deflection_offset};
pub use particles::Particle;
pub use state::{Arena, Ball, GameColor, GamePhase, GameState, Paddle, Side};
pub use tick::{GameEvent, TickInput, tick};
