//! Kaiju Kitty entry point
//!
//! Browser: sets up the canvas, keyboard and resize handlers, and drives one
//! simulation tick per animation frame. Native: runs a scripted headless
//! session and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent};

    use kaiju_kitty::error::RenderError;
    use kaiju_kitty::renderer::RenderState;
    use kaiju_kitty::settings::Settings;
    use kaiju_kitty::sim::{GameState, InputState, ScoreDisplay, tick};

    /// Writes the score into the page's `#score` element
    struct ScoreText {
        element: Option<Element>,
    }

    impl ScoreDisplay for ScoreText {
        fn show_score(&mut self, score: u64) {
            if let Some(el) = &self.element {
                el.set_text_content(Some(&format!("Buildings Destroyed: {}", score)));
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: RenderState,
        input: InputState,
        settings: Settings,
        canvas: HtmlCanvasElement,
        score_text: ScoreText,
        fps_text: Option<Element>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        /// One simulation tick, then draw
        fn frame(&mut self, time: f64) {
            tick(&mut self.state, &self.input, &mut self.score_text);

            match self.render_state.render(&self.state) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    self.render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }

            self.track_fps(time);
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest sample is the one about to be overwritten
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            if self.settings.show_fps && self.frame_index == 0 {
                if let Some(el) = &self.fps_text {
                    el.set_text_content(Some(&format!("{} FPS", self.fps)));
                }
            }
        }

        /// Match the backbuffer to the canvas' CSS size
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = self.settings.backbuffer_size(
                self.canvas.client_width().max(1) as u32,
                self.canvas.client_height().max(1) as u32,
                window.device_pixel_ratio(),
            );
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.render_state.resize(width, height);
        }
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        settings: &Settings,
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, settings).await
    }

    /// Replace the UI with a static failure notice. The game does not start.
    fn show_fatal_error(document: &Document, err: &RenderError) {
        log::error!("Renderer failed to start: {}", err);

        let Some(ui) = document.get_element_by_id("ui") else {
            return;
        };
        ui.set_inner_html(
            r#"<div class="fatal">
                <h2>3D graphics unavailable</h2>
                <p>Your browser cannot render 3D graphics.</p>
                <p>Please enable <strong>Hardware Acceleration</strong> in your browser settings.</p>
                <pre id="fatal-detail"></pre>
            </div>"#,
        );
        if let Some(detail) = document.get_element_by_id("fatal-detail") {
            detail.set_text_content(Some(&err.to_string()));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Kaiju Kitty starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let settings = Settings::from_query(&window.location().search().unwrap_or_default());
        log::info!("Quality preset: {}", settings.quality.as_str());

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element on the page");
            return;
        };

        let (width, height) = settings.backbuffer_size(
            canvas.client_width().max(1) as u32,
            canvas.client_height().max(1) as u32,
            window.device_pixel_ratio(),
        );
        canvas.set_width(width);
        canvas.set_height(height);

        let render_state = match init_renderer(&canvas, width, height, &settings).await {
            Ok(render_state) => render_state,
            Err(err) => {
                show_fatal_error(&document, &err);
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let mut score_text = ScoreText {
            element: document.get_element_by_id("score"),
        };
        score_text.show_score(0);

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            render_state,
            input: InputState::new(),
            settings,
            canvas,
            score_text,
            fps_text: document.get_element_by_id("fps"),
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_resize_handler(game.clone());

        request_animation_frame(game);

        log::info!("Kaiju Kitty running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.code()) {
                    // Arrow keys would otherwise scroll the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Blur swallows key-up events; release everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();
            g.frame(time);
            g.state.is_running()
        };

        if running {
            request_animation_frame(game);
        }
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
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = headless::Cli::parse();
    env_logger::init();
    log::info!("Kaiju Kitty (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the playable web version");

    headless::run(&cli)
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;

    use kaiju_kitty::sim::{Direction, GameState, InputState, tick};
    use kaiju_kitty::tuning::Tuning;

    #[derive(Parser, Debug)]
    #[command(name = "kaiju-kitty", about = "Run a scripted headless Kaiju Kitty session")]
    pub struct Cli {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "3600")]
        pub ticks: u64,
        /// RNG seed for the building layout
        #[arg(short, long, default_value = "1")]
        pub seed: u64,
        /// JSON tuning file; missing fields keep their defaults
        #[arg(long)]
        pub tuning: Option<PathBuf>,
    }

    fn load_tuning(cli: &Cli) -> anyhow::Result<Tuning> {
        let Some(path) = &cli.tuning else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("loading {}", path.display()))
    }

    pub fn run(cli: &Cli) -> anyhow::Result<()> {
        let tuning = load_tuning(cli)?;
        let mut state = GameState::with_tuning(cli.seed, tuning)?;

        // Stroll forward, veering left for a third of every two-second cycle
        let straight = InputState::with(&[Direction::Forward]);
        let veer = InputState::with(&[Direction::Forward, Direction::TurnLeft]);

        for t in 0..cli.ticks {
            let input = if t % 120 < 40 { &veer } else { &straight };
            tick(&mut state, input, &mut |score: u64| {
                log::info!("Buildings Destroyed: {}", score);
            });
        }

        let falling = state.obstacles.iter().filter(|o| o.is_falling()).count();
        log::info!(
            "After {} ticks: score {}, kitty at ({:.1}, {:.1}), {} of {} buildings falling",
            state.time_ticks,
            state.score,
            state.kitty.position.x,
            state.kitty.position.z,
            falling,
            state.obstacles.len()
        );
        state.shutdown();
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use clap::CommandFactory;
        use clap::error::ErrorKind;

        #[test]
        fn test_cli_definition() {
            Cli::command().debug_assert();
        }

        #[test]
        fn test_cli_defaults_and_flags() {
            let cli = Cli::try_parse_from(["kaiju-kitty"]).unwrap();
            assert_eq!((cli.ticks, cli.seed), (3600, 1));
            assert!(cli.tuning.is_none());

            let cli = Cli::try_parse_from(["kaiju-kitty", "-t", "10", "--seed", "7", "--tuning", "t.json"])
                .unwrap();
            assert_eq!((cli.ticks, cli.seed), (10, 7));
            assert_eq!(cli.tuning, Some(PathBuf::from("t.json")));
        }

        #[test]
        fn test_help_is_not_an_argument_error() {
            let err = Cli::try_parse_from(["kaiju-kitty", "--help"]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);

            let err = Cli::try_parse_from(["kaiju-kitty", "--ticks"]).unwrap_err();
            assert_ne!(err.kind(), ErrorKind::DisplayHelp);
        }

        #[test]
        fn test_run_short_session() {
            let cli = Cli::try_parse_from(["kaiju-kitty", "--ticks", "30"]).unwrap();
            assert!(run(&cli).is_ok());
        }

        #[test]
        fn test_missing_tuning_file_is_reported() {
            let cli = Cli {
                ticks: 1,
                seed: 1,
                tuning: Some(PathBuf::from("/nonexistent/kaiju-tuning.json")),
            };
            let err = run(&cli).unwrap_err();
            assert!(err.to_string().contains("kaiju-tuning.json"));
        }
    }
}
