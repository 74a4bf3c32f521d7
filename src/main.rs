//! Brickfall entry point
//!
//! Handles platform-specific initialization and runs the game loop. All
//! drawing and DOM work lives here, on the far side of the simulation's
//! snapshot boundary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use brickfall::Settings;
    use brickfall::consts::*;
    use brickfall::sim::{Session, Snapshot};

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        ctx: Option<CanvasRenderingContext2d>,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, now_ms: f64) -> Self {
            let settings = Settings::load();
            let mut session = Session::new(seed, now_ms);
            session.set_attract_enabled(settings.attract_mode);
            Self {
                session,
                settings,
                ctx: None,
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks at the fixed rate
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.session.advance(time);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current snapshot to the canvas
        fn render(&self, time: f64) {
            let Some(ctx) = &self.ctx else { return };
            let snap = self.session.snapshot();
            draw(ctx, &snap, time, &self.settings);
        }
    }

    /// Monotonic clock shared by input handlers and the tick loop
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// Draw one frame from the snapshot
    fn draw(ctx: &CanvasRenderingContext2d, snap: &Snapshot, time: f64, settings: &Settings) {
        // Clear
        ctx.set_fill_style_str("#000");
        ctx.fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);

        // Paddle: vertical gradient, glowing while the demo drives
        let p = &snap.paddle;
        let gradient = ctx.create_linear_gradient(
            p.x as f64,
            p.y as f64,
            p.x as f64,
            (p.y + p.h) as f64,
        );
        if snap.demo_active {
            let intensity = if settings.reduced_motion {
                0.8
            } else {
                0.5 + (time / 200.0).sin() * 0.3
            };
            let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 107, 107, {intensity})"));
            let _ = gradient.add_color_stop(1.0, &format!("rgba(238, 90, 36, {intensity})"));
            ctx.set_shadow_color("#ff6b6b");
            ctx.set_shadow_blur(15.0);
        } else {
            let _ = gradient.add_color_stop(0.0, "#ff6b6b");
            let _ = gradient.add_color_stop(1.0, "#ee5a24");
            ctx.set_shadow_blur(0.0);
        }
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(p.x as f64, p.y as f64, p.w as f64, p.h as f64);
        ctx.set_shadow_blur(0.0);

        // Ball: radial highlight
        let (bx, by, br) = (
            snap.ball_pos.x as f64,
            snap.ball_pos.y as f64,
            snap.ball_radius as f64,
        );
        ctx.begin_path();
        let _ = ctx.arc(bx, by, br, 0.0, std::f64::consts::TAU);
        if let Ok(ball_gradient) = ctx.create_radial_gradient(bx, by, 0.0, bx, by, br) {
            let _ = ball_gradient.add_color_stop(0.0, "#fff");
            let _ = ball_gradient.add_color_stop(1.0, "#ddd");
            ctx.set_fill_style_canvas_gradient(&ball_gradient);
        }
        ctx.fill();
        ctx.close_path();

        // Blocks, with a shine strip along the top third
        for block in &snap.blocks {
            let r = &block.rect;
            ctx.set_fill_style_str(block.color);
            ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
            ctx.set_fill_style_str("rgba(255, 255, 255, 0.3)");
            ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, (r.h / 3.0) as f64);
        }

        // Launch prompt
        if snap.show_launch_prompt {
            ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
            ctx.set_font("24px Arial");
            ctx.set_text_align("center");
            let _ = ctx.fill_text(
                "Press Space to launch!",
                (FIELD_WIDTH / 2.0) as f64,
                (FIELD_HEIGHT / 2.0) as f64,
            );
        }
    }

    /// Update HUD elements in the DOM
    fn update_hud(game: &Game) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let snap = game.session.snapshot();

        if let Ok(Some(el)) = document.query_selector("#hud-score .hud-value") {
            el.set_text_content(Some(&snap.score.to_string()));
        }
        if let Ok(Some(el)) = document.query_selector("#hud-lives .hud-value") {
            el.set_text_content(Some(&snap.lives.to_string()));
        }
        if game.settings.show_fps {
            if let Ok(Some(el)) = document.query_selector("#hud-fps .hud-value") {
                el.set_text_content(Some(&game.fps.to_string()));
            }
        }

        // Demo-mode indicator
        if let Some(el) = document.get_element_by_id("demo-indicator") {
            let class = if snap.demo_active { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }

        // Game-over overlay
        if let Some(el) = document.get_element_by_id("game-over") {
            if let Some(overlay) = snap.overlay {
                let _ = el.set_attribute("class", "");
                if let Some(title) = document.get_element_by_id("game-over-title") {
                    let text = if overlay.win {
                        "You cleared the field!"
                    } else {
                        "Game over"
                    };
                    title.set_text_content(Some(text));
                }
                if let Some(score_el) = document.get_element_by_id("final-score") {
                    score_el.set_text_content(Some(&overlay.final_score.to_string()));
                }
            } else {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brickfall starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context lookup failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, now_ms());
        game.ctx = Some(ctx);
        let game = Rc::new(RefCell::new(game));

        log::info!("Game initialized with seed: {seed}");

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);

        log::info!("Brickfall running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer motion steers the paddle; coordinates are scaled from CSS
        // pixels into the fixed logical playfield
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let client_w = canvas_clone.client_width() as f32;
                if client_w <= 0.0 {
                    return;
                }
                let x = event.offset_x() as f32 * (FIELD_WIDTH / client_w);
                game.borrow_mut().session.pointer_moved(x, now_ms());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Space starts the round or launches the ball
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    game.borrow_mut().session.action_pressed(now_ms());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.restart_requested(now_ms());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render(time);
            update_hud(&g);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brickfall::consts::*;
    use brickfall::sim::Session;

    env_logger::init();
    log::info!("Brickfall (native) starting...");

    // Headless soak: sit idle until the attract mode takes over, then let
    // the demo controller play for two minutes of simulated time
    let mut session = Session::new(0xB10C_FA11, 0.0);
    let tick_ms = (SIM_DT * 1000.0) as f64;
    let mut now = 0.0;
    for _ in 0..(120 * 60) {
        now += tick_ms;
        session.advance(now);
    }

    let snap = session.snapshot();
    println!(
        "demo soak after {:.0}s: score={} lives={} blocks_left={} demo={}",
        now / 1000.0,
        snap.score,
        snap.lives,
        session.state().blocks_remaining(),
        snap.demo_active,
    );
}
