//! DOM Pong entry point
//!
//! Native builds play a headless autopilot match in the terminal. The wasm
//! build wires the simulation to the page and drives it from
//! `requestAnimationFrame`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;

    use dom_pong::Settings;
    use dom_pong::host::{LogNotifier, Match};
    use dom_pong::renderer::TextRenderer;
    use dom_pong::sim::{BounceMode, Command, Config, Difficulty, SessionState};

    /// Watch the paddle AI play a match of Pong in the terminal
    #[derive(Debug, Parser)]
    #[command(name = "dom-pong", version)]
    struct Args {
        /// JSON file with configuration overrides
        #[arg(long)]
        config: Option<PathBuf>,
        /// Opponent difficulty: easy, medium or hard
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Paddle bounce: angled or inverted
        #[arg(long)]
        bounce: Option<BounceMode>,
        /// Points needed to win the match
        #[arg(long)]
        winning_score: Option<u32>,
        /// RNG seed (defaults to the clock)
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many ticks even if nobody has won
        #[arg(long, default_value_t = 36_000)]
        max_ticks: u64,
        /// Print a frame every N ticks (0 prints only the final frame)
        #[arg(long, default_value_t = 30)]
        frame_every: u64,
        /// Text view width in cells
        #[arg(long, default_value_t = 64)]
        width: usize,
        /// Text view height in cells
        #[arg(long, default_value_t = 20)]
        height: usize,
    }

    fn load_config(args: &Args) -> Result<Config> {
        let mut config = match &args.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Config::from_json(&json).with_context(|| format!("loading {}", path.display()))?
            }
            None => Config::default(),
        };

        if let Some(difficulty) = args.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(bounce) = args.bounce {
            config.bounce_mode = bounce;
        }
        if let Some(score) = args.winning_score {
            config.winning_score = score;
        }
        Ok(config)
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let config = load_config(&args)?;
        let seed = args.seed.unwrap_or_else(clock_seed);
        let renderer = TextRenderer::new(std::io::stdout(), &config, args.width, args.height);

        let mut game = Match::new(
            config,
            &Settings::default(),
            seed,
            renderer,
            LogNotifier::default(),
        )
        .context("invalid configuration")?;

        game.input_mut().autopilot = true;
        game.queue(Command::Start);

        while game.state().time_ticks < args.max_ticks {
            game.tick();
            if game.state().session == SessionState::Stopped {
                break;
            }
            if args.frame_every > 0 && game.state().time_ticks % args.frame_every == 0 {
                game.render();
            }
        }
        game.render();

        let score = game.state().score;
        match game.winner() {
            Some(side) => println!(
                "{} wins {}-{} after {} ticks",
                side.as_str(),
                score.left,
                score.right,
                game.state().time_ticks
            ),
            None => println!(
                "No winner after {} ticks ({}-{}, {} points logged)",
                game.state().time_ticks,
                score.left,
                score.right,
                game.notifier().points
            ),
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlSelectElement, KeyboardEvent, MouseEvent, Window};

    use dom_pong::Settings;
    use dom_pong::audio::AudioManager;
    use dom_pong::consts::TICK_DT;
    use dom_pong::host::{Key, Match};
    use dom_pong::renderer::DomRenderer;
    use dom_pong::sim::{Command, Config, Difficulty, SessionState};

    /// Page-side game instance shared with the event closures
    struct Game {
        session: Match<DomRenderer, AudioManager>,
        settings: Settings,
        last_time: f64,
    }

    fn to_js(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("DOM Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let renderer =
            DomRenderer::new(&document).ok_or("page is missing .game, .ball or .paddle elements")?;
        let settings = Settings::default();
        let config = Config {
            difficulty: selected_difficulty(&document).unwrap_or_default(),
            ..Config::default()
        };
        let seed = js_sys::Date::now() as u64;
        let audio = AudioManager::new(&settings);
        let session = Match::new(config, &settings, seed, renderer, audio).map_err(to_js)?;

        let game = Rc::new(RefCell::new(Game {
            session,
            settings,
            last_time: 0.0,
        }));

        setup_pointer(&document, game.clone())?;
        setup_keys(&window, game.clone());
        setup_button(&document, "start-btn", Command::Start, game.clone());
        setup_button(&document, "pause-btn", Command::TogglePause, game.clone());
        setup_button(&document, "reset-btn", Command::Reset, game.clone());
        setup_difficulty(&document, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        game.borrow_mut().session.render();
        request_animation_frame(game);

        log::info!("DOM Pong running!");
        Ok(())
    }

    fn selected_difficulty(document: &Document) -> Option<Difficulty> {
        document
            .get_element_by_id("difficulty")?
            .dyn_into::<HtmlSelectElement>()
            .ok()?
            .value()
            .parse()
            .ok()
    }

    fn setup_pointer(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let arena = document.query_selector(".game")?.ok_or("no .game element")?;
        let arena_clone = arena.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = arena_clone.get_bounding_client_rect();
            let y = event.client_y() as f32 - rect.top() as f32;
            game.borrow_mut().session.input_mut().pointer_moved(y);
        });
        arena.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn paddle_key(code: &str) -> Option<Key> {
        match code {
            "ArrowUp" | "KeyW" => Some(Key::Up),
            "ArrowDown" | "KeyS" => Some(Key::Down),
            _ => None,
        }
    }

    fn setup_keys(window: &Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                if let Some(key) = paddle_key(&code) {
                    event.prevent_default();
                    g.session.input_mut().set_key(key, true);
                    return;
                }
                match code.as_str() {
                    "Space" => {
                        event.prevent_default();
                        g.session.queue(Command::TogglePause);
                    }
                    "Enter" => {
                        g.session.notifier().resume();
                        g.session.queue(Command::Start);
                    }
                    "KeyR" => g.session.queue(Command::Reset),
                    "KeyM" => {
                        let g = &mut *g;
                        g.settings.muted = !g.settings.muted;
                        g.session.notifier_mut().apply_settings(&g.settings);
                        log::info!("Muted: {}", g.settings.muted);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = paddle_key(&event.code()) {
                    game.borrow_mut().session.input_mut().set_key(key, false);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_button(document: &Document, id: &str, command: Command, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("No #{} button on the page", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            // Clicks count as the user gesture audio needs
            g.session.notifier().resume();
            g.session.queue(command);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_difficulty(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(select) = document.get_element_by_id("difficulty") else {
            return;
        };
        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(difficulty) = selected_difficulty(&document) else {
                return;
            };
            let mut g = game.borrow_mut();
            let config = Config {
                difficulty,
                ..g.session.config().clone()
            };
            if let Err(e) = g.session.reconfigure(config, js_sys::Date::now() as u64) {
                log::error!("Could not change difficulty: {}", e);
            }
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(window: &Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    pause_if_running(&game, "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                pause_if_running(&game, "window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn pause_if_running(game: &Rc<RefCell<Game>>, reason: &str) {
        let mut g = game.borrow_mut();
        if g.settings.pause_on_blur && g.session.state().session == SessionState::Running {
            g.session.queue(Command::Pause);
            log::info!("Auto-paused ({})", reason);
        }
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
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                TICK_DT
            };
            g.last_time = time;

            g.session.advance(dt);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
