//! Canvas 2D renderer
//!
//! Reads the simulation state each frame and draws it with a neon glow
//! look (shadow-blurred fills). The simulation never touches the canvas;
//! color identifiers are resolved to CSS colors here.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::SHAKE_AMPLITUDE;
use crate::settings::Settings;
use crate::sim::{GameColor, GamePhase, GameState, Side};

/// Resolve an abstract color identifier to a CSS color
fn css_color(color: GameColor) -> &'static str {
    match color {
        GameColor::Player => "#00e5ff",
        GameColor::Ai => "#ff3df0",
        GameColor::Ball => "#fdfd96",
        GameColor::Neutral => "#5a5a7a",
        GameColor::Text => "#ffffff",
    }
}

/// Canvas renderer bound to a 2D context
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Bind to a canvas element. Returns None if the 2D context is
    /// unavailable.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Resize the canvas backing store
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn draw_rect(&self, x: f64, y: f64, w: f64, h: f64, color: GameColor) {
        let css = css_color(color);
        self.ctx.set_fill_style_str(css);
        self.ctx.set_shadow_color(css);
        self.ctx.set_shadow_blur(15.0);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn draw_circle(&self, x: f64, y: f64, r: f64, color: GameColor) {
        let css = css_color(color);
        self.ctx.set_fill_style_str(css);
        self.ctx.set_shadow_color(css);
        self.ctx.set_shadow_blur(20.0);
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(x, y, r, 0.0, std::f64::consts::PI * 2.0);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn draw_text(&self, text: &str, x: f64, y: f64, color: GameColor, size_ratio: f64) {
        let height = self.canvas.height() as f64;
        let font_size = height * size_ratio;
        let css = css_color(color);
        self.ctx.set_fill_style_str(css);
        self.ctx.set_shadow_color(css);
        self.ctx.set_shadow_blur(10.0);
        self.ctx
            .set_font(&format!("{font_size}px \"Press Start 2P\", monospace"));
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn draw_net(&self, width: f64, height: f64) {
        self.ctx.set_shadow_blur(5.0);
        let mut y = 0.0;
        while y <= height {
            self.draw_rect(width / 2.0 - 1.0, y, 2.0, 10.0, GameColor::Neutral);
            y += 15.0;
        }
    }

    /// Draw one frame from the current simulation state
    pub fn render(&self, state: &GameState, settings: &Settings) {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        self.ctx.clear_rect(0.0, 0.0, width, height);
        self.ctx.save();

        // Screen shake: decaying jitter driven by the tick counter
        if settings.effective_screen_shake() && state.screen_shake > 0.0 {
            let t = state.time_ticks as f64;
            let amp = state.screen_shake as f64 * SHAKE_AMPLITUDE as f64;
            let dx = (t * 1.7).sin() * amp;
            let dy = (t * 2.3).cos() * amp;
            let _ = self.ctx.translate(dx, dy);
        }

        self.draw_net(width, height);

        self.draw_text(
            &state.player.score.to_string(),
            width / 4.0,
            height / 5.0,
            GameColor::Player,
            0.05,
        );
        self.draw_text(
            &state.ai.score.to_string(),
            3.0 * width / 4.0,
            height / 5.0,
            GameColor::Ai,
            0.05,
        );

        for paddle in [&state.player, &state.ai] {
            self.draw_rect(
                paddle.pos.x as f64,
                paddle.pos.y as f64,
                paddle.size.x as f64,
                paddle.size.y as f64,
                paddle.color,
            );
        }

        self.draw_circle(
            state.ball.pos.x as f64,
            state.ball.pos.y as f64,
            state.ball.radius as f64,
            state.ball.color,
        );

        if settings.particles {
            for p in &state.particles {
                self.ctx.save();
                self.ctx.set_global_alpha(p.alpha as f64);
                self.draw_circle(p.pos.x as f64, p.pos.y as f64, p.radius as f64, p.color);
                self.ctx.restore();
            }
        }

        match state.phase {
            GamePhase::Ready => {
                self.draw_text(
                    "Click Start Game",
                    width / 2.0,
                    height / 2.0,
                    GameColor::Text,
                    0.04,
                );
            }
            GamePhase::GameOver => {
                let winner = match state.winner() {
                    Some(Side::Player) => "Player",
                    _ => "Computer",
                };
                self.draw_text(
                    &format!("{winner} Wins!"),
                    width / 2.0,
                    height / 2.0,
                    GameColor::Text,
                    0.05,
                );
            }
            GamePhase::Playing => {}
        }

        self.ctx.restore();
    }
}
