//! Frogger entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use frogger::audio::AudioManager;
    use frogger::consts::*;
    use frogger::renderer::{RenderState, Scene};
    use frogger::sim::{GameEvent, GameState, Hop, TickInput, tick};
    use frogger::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
        /// Key presses waiting for a tick, one hop consumed per tick
        pending_hops: VecDeque<Hop>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// End-of-game alert already shown
        game_over_notified: bool,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            Self {
                state: GameState::with_tuning(seed, tuning),
                settings,
                render_state: None,
                audio,
                accumulator: 0.0,
                last_time: 0.0,
                pending_hops: VecDeque::new(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                game_over_notified: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = TickInput {
                    hop: self.pending_hops.pop_front(),
                };
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            let events = self.state.drain_events();
            self.audio.play_events(&events);
            if events.contains(&GameEvent::GameOver) {
                self.pending_hops.clear();
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let scene = Scene::build(&self.state, self.settings.draw_distance());
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update the lives/points display elements
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("lives") {
                el.set_text_content(Some(&self.state.lives.to_string()));
            }
            if let Some(el) = document.get_element_by_id("points") {
                el.set_text_content(Some(&self.state.points.to_string()));
            }
            if let Some(el) = document.get_element_by_id("fps") {
                let text = self.settings.show_fps.then(|| format!("{} fps", self.fps));
                el.set_text_content(text.as_deref());
            }
        }

        /// Blocking end-of-game notification, shown once
        fn notify_game_over(&mut self) {
            if self.game_over_notified || !self.state.is_over() {
                return;
            }
            self.game_over_notified = true;
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message("You Lose");
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Frogger starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let tuning = Tuning::load();
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, settings)));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device, running without rendering: {}", e),
        }

        game.borrow().update_hud();

        setup_input_handlers(game.clone());
        setup_focus_mute(game.clone());

        request_animation_frame(game);

        log::info!("Frogger running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            let mut g = game.borrow_mut();
            if let Some(hop) = Hop::from_key(&key) {
                event.prevent_default();
                if !g.state.is_over() {
                    g.pending_hops.push_back(hop);
                }
            } else if g.settings.apply_key(&key) {
                g.settings.save();
                g.update_hud();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_focus_mute(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
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
        let keep_running = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
            g.notify_game_over();
            !g.state.is_over()
        };

        if keep_running {
            request_animation_frame(game);
        } else {
            log::info!("Loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Frogger (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60 * 5);
    let mut settings = frogger::Settings::load();
    if let Some(arg) = args.next() {
        match frogger::QualityPreset::from_str(&arg) {
            Some(quality) => settings.quality = quality,
            None => log::warn!("Unknown quality preset '{}', keeping {}", arg, settings.quality.as_str()),
        }
    }

    headless_run(seed, max_ticks, &settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a scripted run (hop forward twice a second) and report the outcome
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64, max_ticks: u64, settings: &frogger::Settings) {
    use frogger::renderer::Scene;
    use frogger::sim::{GameEvent, GameState, Hop, TickInput, tick};

    let mut state = GameState::with_tuning(seed, frogger::Tuning::load());

    for t in 0..max_ticks {
        let input = TickInput {
            hop: (t % 30 == 0).then_some(Hop::Forward),
        };
        tick(&mut state, &input);
        for event in state.drain_events() {
            if !matches!(event, GameEvent::Hopped) {
                log::info!("tick {}: {:?}", state.time_ticks, event);
            }
        }
        if state.is_over() {
            break;
        }
    }

    let scene = Scene::build(&state, settings.draw_distance());
    println!(
        "seed {}: {} ticks, {} lives, {} points ({} boxes in final frame)",
        seed,
        state.time_ticks,
        state.lives,
        state.points,
        scene.boxes.len()
    );
    if state.is_over() {
        println!("You Lose");
    }
}
