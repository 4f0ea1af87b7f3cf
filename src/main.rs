//! Typefall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use typefall::audio::AudioManager;
    use typefall::progress::{NullReporter, Progress, ScoreReporter};
    use typefall::settings::Settings;
    use typefall::sim::{handle_key, tick, GameEvent, GameMode, GameState};
    use typefall::snapshot;

    // JS binding for the canvas drawing layer. The page installs
    // window.__typefall_present and receives one snapshot JSON per frame.
    #[wasm_bindgen(inline_js = "
        export function present_frame(json) {
            if (window.__typefall_present) {
                window.__typefall_present(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_frame(json: &str);
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        audio: AudioManager,
        progress: Progress,
        reporter: NullReporter,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, arena_w: f32, arena_h: f32) -> Self {
            let settings = Settings::load();
            let progress = Progress::load();

            let mut audio = AudioManager::new();
            audio.set_muted(settings.muted);
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            let mut state = GameState::new(arena_w, arena_h, seed);
            state.high_score = progress.high_score;

            Self {
                state,
                audio,
                progress,
                reporter: NullReporter,
                last_time: 0.0,
            }
        }

        /// Run one frame: advance the sim, apply side effects, present.
        fn frame(&mut self, time: f64) {
            let dt_ms = if self.last_time > 0.0 {
                (time - self.last_time) as f32
            } else {
                16.0
            };
            self.last_time = time;

            tick(&mut self.state, dt_ms);
            self.process_events();

            if let Ok(json) = serde_json::to_string(&snapshot::capture(&self.state)) {
                present_frame(&json);
            }
        }

        fn process_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Cue(cue) => self.audio.play(cue),
                    GameEvent::LevelCompleted { level, bonus } => {
                        log::info!("Level {level} complete, bonus {bonus}");
                        self.progress.record_level_cleared(level);
                        self.progress.save();
                        self.reporter.submit_level_reached(level);
                    }
                    GameEvent::GameOver {
                        score,
                        new_high_score,
                    } => {
                        if new_high_score {
                            log::info!("New high score: {score}");
                        }
                        self.progress.record_score(score);
                        self.progress.save();
                        self.reporter
                            .submit_score(score, self.state.max_multiplier);
                    }
                    GameEvent::ScoreChanged { .. } | GameEvent::MultiplierChanged { .. } => {}
                }
            }
        }

        fn handle_keydown(&mut self, key: &str) {
            match key {
                "Escape" => match self.state.mode {
                    GameMode::LevelSelect => self.state.mode = GameMode::Start,
                    _ => {
                        self.state.toggle_pause();
                        // Paused frames still ran; don't integrate the gap
                        self.last_time = 0.0;
                    }
                },
                "Tab" => {
                    if self.state.mode == GameMode::Start {
                        self.state.mode = GameMode::LevelSelect;
                    }
                }
                "Enter" => match self.state.mode {
                    GameMode::Start | GameMode::GameOver => {
                        self.audio.resume();
                        self.state.start_run(1);
                    }
                    GameMode::LevelComplete => self.state.advance_level(),
                    _ => {}
                },
                _ => {
                    let mut chars = key.chars();
                    let (Some(ch), None) = (chars.next(), chars.next()) else {
                        return;
                    };
                    match self.state.mode {
                        GameMode::Playing => {
                            self.audio.resume();
                            handle_key(&mut self.state, ch);
                        }
                        GameMode::LevelSelect => {
                            // Digits pick an unlocked starting level
                            if let Some(level) = ch.to_digit(10) {
                                if self.progress.is_unlocked(level) {
                                    self.audio.resume();
                                    self.state.start_run(level);
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Typefall starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = canvas.client_width() as f32;
        let height = canvas.client_height() as f32;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, width, height)));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_resize(&canvas, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);
        log::info!("Typefall running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            if key == " " || key == "Tab" {
                event.prevent_default();
            }
            game.borrow_mut().handle_keydown(&key);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let w = canvas.client_width() as f32;
            let h = canvas.client_height() as f32;
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
            game.borrow_mut().state.resize(w, h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if g.state.mode == GameMode::Playing {
                    g.state.toggle_pause();
                    g.last_time = 0.0;
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
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
        game.borrow_mut().frame(time);
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
    use typefall::progress::{NullReporter, ScoreReporter};
    use typefall::sim::{handle_key, tick, GameMode, GameState};

    env_logger::init();
    log::info!("Typefall (native) starting...");

    // Headless demo: a perfect auto-typist plays at 60fps until the run
    // ends or three levels are cleared.
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let mut state = GameState::new(800.0, 600.0, seed);
    state.start_run(1);
    log::info!("Playing with seed {seed}");

    let mut frames: u64 = 0;
    loop {
        match state.mode {
            GameMode::Playing => {
                tick(&mut state, 16.0);
                if let Some(word) = state
                    .enemies
                    .iter()
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                    .map(|e| e.full_word.clone())
                {
                    for ch in word.chars() {
                        handle_key(&mut state, ch);
                    }
                }
            }
            GameMode::LevelComplete if state.level < 3 => {
                log::info!("Level {} cleared, score {}", state.level, state.score);
                state.advance_level();
            }
            _ => break,
        }
        state.drain_events();
        frames += 1;
    }

    log::info!(
        "Run over after {:.1}s simulated: score {}, level {}, best multiplier x{}",
        frames as f32 * 0.016,
        state.score,
        state.level,
        state.max_multiplier
    );
    NullReporter.submit_score(state.score, state.max_multiplier);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
