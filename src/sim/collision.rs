//! Collision detection and deflection math
//!
//! The ball is treated as its axis-aligned bounding box for the paddle
//! test (a deliberate simplification over true circle-rectangle
//! distance, faithful to classic Pong feel).

use super::state::{Ball, Paddle};
use crate::consts::MAX_DEFLECTION;

/// Rectangle-overlap test between the ball's AABB (center ± radius) and
/// a paddle's box (top-left + dimensions). True iff the boxes overlap on
/// both axes.
pub fn collides(ball: &Ball, paddle: &Paddle) -> bool {
    let b_left = ball.pos.x - ball.radius;
    let b_right = ball.pos.x + ball.radius;
    let b_top = ball.pos.y - ball.radius;
    let b_bottom = ball.pos.y + ball.radius;

    let p_left = paddle.pos.x;
    let p_right = paddle.pos.x + paddle.size.x;
    let p_top = paddle.pos.y;
    let p_bottom = paddle.pos.y + paddle.size.y;

    b_right > p_left && b_bottom > p_top && b_left < p_right && b_top < p_bottom
}

/// Vertical contact offset from the paddle center, normalized to [-1, 1].
///
/// Returns 0 for a degenerate paddle (half-height not positive) so the
/// deflection math never divides by zero.
pub fn deflection_offset(ball_y: f32, paddle: &Paddle) -> f32 {
    let half_height = paddle.size.y / 2.0;
    if half_height <= 0.0 {
        return 0.0;
    }
    (ball_y - paddle.center_y()) / half_height
}

/// Vertical velocity after a paddle hit.
///
/// The normalized offset is mapped through a quarter-pi-scaled sine, so
/// edge contacts deflect near ±45° and center contacts go nearly
/// straight. Odd-symmetric around the paddle center.
pub fn deflected_vy(speed: f32, offset: f32) -> f32 {
    speed * (MAX_DEFLECTION * offset).sin()
}
