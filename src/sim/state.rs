//! Game state and core simulation types
//!
//! All entities are owned by [`GameState`]; there are no ambient globals.
//! Dimensions are re-derived from the arena size by fixed ratios, so the
//! game scales with the play surface.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

use super::particles::Particle;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the player to start a game
    Ready,
    /// Active gameplay
    Playing,
    /// A side reached the winning score; waiting for New Game / Reset
    GameOver,
}

/// Which side of the net
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Ai,
}

/// Opaque color identifier, resolved to an actual color by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameColor {
    Player,
    Ai,
    Ball,
    Neutral,
    Text,
}

/// Play surface dimensions, queried from the host on init and resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn paddle_size(&self) -> Vec2 {
        Vec2::new(
            self.width * PADDLE_WIDTH_RATIO,
            self.height * PADDLE_HEIGHT_RATIO,
        )
    }

    pub fn ball_radius(&self) -> f32 {
        self.height * BALL_RADIUS_RATIO
    }

    /// Nominal ball speed, scaled to arena width
    pub fn base_ball_speed(&self) -> f32 {
        self.width * BALL_SPEED_RATIO
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A paddle entity (top-left anchored)
#[derive(Debug, Clone)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    pub score: u32,
    pub color: GameColor,
}

impl Paddle {
    fn new(side: Side, arena: &Arena) -> Self {
        let size = arena.paddle_size();
        let x = match side {
            Side::Player => PADDLE_MARGIN,
            Side::Ai => arena.width - size.x - PADDLE_MARGIN,
        };
        let color = match side {
            Side::Player => GameColor::Player,
            Side::Ai => GameColor::Ai,
        };
        Self {
            pos: Vec2::new(x, arena.height / 2.0 - size.y / 2.0),
            size,
            score: 0,
            color,
        }
    }

    /// Vertical center of the paddle face
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

/// The ball entity (center anchored)
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    /// Scalar speed; velocity components are always re-derived from it
    pub speed: f32,
    pub vel: Vec2,
    pub color: GameColor,
}

impl Ball {
    fn new(arena: &Arena) -> Self {
        Self {
            pos: arena.center(),
            radius: arena.ball_radius(),
            speed: arena.base_ball_speed(),
            vel: Vec2::ZERO,
            color: GameColor::Ball,
        }
    }
}

/// Complete game state, owned by the loop driver and mutated by `tick`
#[derive(Debug, Clone)]
pub struct GameState {
    pub arena: Arena,
    pub phase: GamePhase,
    pub player: Paddle,
    pub ai: Paddle,
    pub ball: Ball,
    /// Cosmetic only; never read by game logic
    pub particles: Vec<Particle>,
    /// Games won this session, cleared only by an explicit reset
    pub player_wins: u32,
    pub ai_wins: u32,
    /// Feedback intensity (1.0 on score, decays each tick)
    pub screen_shake: f32,
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh state in the Ready phase
    pub fn new(arena: Arena, seed: u64) -> Self {
        Self {
            arena,
            phase: GamePhase::Ready,
            player: Paddle::new(Side::Player, &arena),
            ai: Paddle::new(Side::Ai, &arena),
            ball: Ball::new(&arena),
            particles: Vec::new(),
            player_wins: 0,
            ai_wins: 0,
            screen_shake: 0.0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Rebuild all entities for a new play-surface size.
    ///
    /// Entities are recreated from scratch (scores restart at 0); phase
    /// and session win counters survive. In-flight ball and particle
    /// state is discarded, which only affects visual continuity.
    pub fn resize(&mut self, arena: Arena) {
        self.arena = arena;
        self.player = Paddle::new(Side::Player, &arena);
        self.ai = Paddle::new(Side::Ai, &arena);
        self.ball = Ball::new(&arena);
        self.particles.clear();
    }

    /// Re-center the ball and serve in a random direction.
    ///
    /// Speed is reassigned from the current arena width; each velocity
    /// axis gets 70% of that speed with an independently random sign.
    pub fn reset_ball(&mut self, new_game: bool) {
        if new_game {
            self.player.score = 0;
            self.ai.score = 0;
        }
        self.ball.pos = self.arena.center();
        self.ball.speed = self.arena.base_ball_speed();
        let serve = self.ball.speed * SERVE_SPEED_FACTOR;
        let sx = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.vel = Vec2::new(sx * serve, sy * serve);
    }

    /// Start transition: Ready|GameOver -> Playing
    pub(crate) fn start_game(&mut self) {
        if matches!(self.phase, GamePhase::Ready | GamePhase::GameOver) {
            self.reset_ball(true);
            self.phase = GamePhase::Playing;
        }
    }

    /// Session reset transition: Ready|GameOver -> Ready
    pub(crate) fn reset_session(&mut self) {
        if matches!(self.phase, GamePhase::Ready | GamePhase::GameOver) {
            self.player_wins = 0;
            self.ai_wins = 0;
            self.reset_ball(true);
            self.phase = GamePhase::Ready;
        }
    }

    /// Center the player paddle on a pointer y coordinate.
    /// No clamp to arena bounds (the paddle may leave the surface).
    pub fn move_player_to(&mut self, pointer_y: f32) {
        self.player.pos.y = pointer_y - self.player.size.y / 2.0;
    }

    /// Winning side, if the game has been decided
    pub fn winner(&self) -> Option<Side> {
        if self.player.score >= WINNING_SCORE {
            Some(Side::Player)
        } else if self.ai.score >= WINNING_SCORE {
            Some(Side::Ai)
        } else {
            None
        }
    }
}
