//! Neon Pong entry point
//!
//! Wires DOM input, buttons, resize, audio and the render loop around
//! the simulation core. One tick + one render per animation frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

    use neon_pong::audio::{AudioManager, SoundEffect};
    use neon_pong::renderer::CanvasRenderer;
    use neon_pong::settings::Settings;
    use neon_pong::sim::{Arena, GameEvent, GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        settings: Settings,
        input: TickInput,
    }

    impl Game {
        fn new(arena: Arena, seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            Self {
                state: GameState::new(arena, seed),
                renderer: None,
                audio,
                settings,
                input: TickInput::default(),
            }
        }

        /// One frame: tick the simulation, map events to cues, draw
        fn frame(&mut self) {
            let events = tick(&mut self.state, &self.input);
            // One-shot inputs are consumed; pointer position persists
            self.input.start = false;
            self.input.reset = false;

            for event in &events {
                match event {
                    GameEvent::WallHit | GameEvent::PaddleHit(_) => {
                        self.audio.play(SoundEffect::Hit);
                    }
                    GameEvent::Scored(_) => self.audio.play(SoundEffect::Score),
                    GameEvent::GameWon(_) => self.audio.play(SoundEffect::GameOver),
                }
            }

            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state, &self.settings);
            }
        }
    }

    fn set_display(document: &web_sys::Document, id: &str, value: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if let Ok(el) = el.dyn_into::<HtmlElement>() {
                let _ = el.style().set_property("display", value);
            }
        }
    }

    fn set_text(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Sync button visibility/labels and the win counter with the state
    fn update_hud(game: &Game) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        match game.state.phase {
            GamePhase::Ready => {
                set_text(&document, "start-button", "Start Game");
                set_display(&document, "start-button", "block");
                set_display(&document, "reset-button", "none");
            }
            GamePhase::Playing => {
                set_display(&document, "start-button", "none");
                set_display(&document, "reset-button", "none");
            }
            GamePhase::GameOver => {
                set_text(&document, "start-button", "New Game");
                set_display(&document, "start-button", "block");
                set_display(&document, "reset-button", "block");
            }
        }

        set_text(
            &document,
            "win-counter",
            &format!(
                "Player: {} - Computer: {}",
                game.state.player_wins, game.state.ai_wins
            ),
        );
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let arena = Arena::new(width as f32, height as f32);
        let mut game = Game::new(arena, seed);
        game.renderer = CanvasRenderer::new(canvas.clone());
        if game.renderer.is_none() {
            log::error!("Canvas 2D context unavailable");
        }
        let game = Rc::new(RefCell::new(game));

        log::info!("Game initialized with seed: {seed}");

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_keyboard(game.clone());
        setup_resize(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Neon Pong running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - paddle follows the pointer's y, centered
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let y = event.client_y() as f32 - rect.top() as f32;
                game.borrow_mut().input.player_y = Some(y);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    game.borrow_mut().input.player_y = Some(y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(btn) = document.get_element_by_id("start-button") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.start = true;
                // Audio needs a user gesture to unlock
                g.audio.resume();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.reset = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Preference toggles; changes are written back to LocalStorage
    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            match event.key().as_str() {
                "m" | "M" => {
                    let mut g = game.borrow_mut();
                    g.settings.muted = !g.settings.muted;
                    let vol = g.settings.effective_volume();
                    g.audio.set_volume(vol);
                    g.settings.save();
                    log::info!("Muted: {}", g.settings.muted);
                }
                "p" | "P" => {
                    let mut g = game.borrow_mut();
                    g.settings.particles = !g.settings.particles;
                    g.settings.save();
                    log::info!("Particles: {}", g.settings.particles);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let width = canvas.client_width().max(1) as u32;
            let height = canvas.client_height().max(1) as u32;
            let mut g = game.borrow_mut();
            if let Some(renderer) = &g.renderer {
                renderer.resize(width, height);
            }
            // Rebuilds all entities at the new scale before the next frame
            g.state.resize(Arena::new(width as f32, height as f32));
            log::info!("Resized to {width}x{height}");
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.frame();
            update_hud(&g);
        }

        // Runs until the page is torn down
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Pong (native) starting...");
    log::info!("The game is browser-hosted - run with `trunk serve` for the web version");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
