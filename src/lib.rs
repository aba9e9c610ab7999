//! Neon Pong - a two-paddle ball game against a reactive AI
//!
//! Core modules:
//! - `sim`: Simulation (entity state, physics, scoring, game phases)
//! - `renderer`: Canvas 2D rendering (wasm only)
//! - `audio`: Web Audio sound effects (wasm only)
//! - `settings`: User preferences persisted to LocalStorage

pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use settings::Settings;

/// Game tuning constants
pub mod consts {
    /// Paddle width as a fraction of arena width
    pub const PADDLE_WIDTH_RATIO: f32 = 0.02;
    /// Paddle height as a fraction of arena height
    pub const PADDLE_HEIGHT_RATIO: f32 = 0.2;
    /// Ball radius as a fraction of arena height
    pub const BALL_RADIUS_RATIO: f32 = 0.0125;
    /// Nominal ball speed as a fraction of arena width
    pub const BALL_SPEED_RATIO: f32 = 0.009;

    /// Paddle inset from the left/right arena edge (pixels)
    pub const PADDLE_MARGIN: f32 = 10.0;

    /// First side to reach this score wins the game
    pub const WINNING_SCORE: u32 = 5;

    /// Fraction of nominal speed given to each velocity axis on serve
    pub const SERVE_SPEED_FACTOR: f32 = 0.7;
    /// Scalar speed gained on every paddle hit
    pub const SPEED_INCREMENT: f32 = 0.2;
    /// Maximum deflection angle off a paddle edge (radians)
    pub const MAX_DEFLECTION: f32 = std::f32::consts::FRAC_PI_4;

    /// Proportional gain for the AI paddle chasing the ball
    pub const AI_TRACKING_GAIN: f32 = 0.1;

    /// Particles spawned per paddle hit
    pub const PARTICLE_BURST: usize = 15;
    /// Alpha lost by each particle per tick
    pub const PARTICLE_FADE: f32 = 0.05;

    /// Screen shake decay multiplier per tick
    pub const SHAKE_DECAY: f32 = 0.9;
    /// Screen shake amplitude in pixels at full intensity
    pub const SHAKE_AMPLITUDE: f32 = 6.0;
}
