//! Retro Bounce entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use retro_bounce::Settings;
    use retro_bounce::audio::ToneBank;
    use retro_bounce::audio::web::WebAudio;
    use retro_bounce::hud::{FpsCounter, HudView};
    use retro_bounce::platform::{PointerState, detect_device_class};
    use retro_bounce::renderer::{RenderInitError, RenderState, build_scene};
    use retro_bounce::sim::{FixedStep, GameEvent, Session, TickInput, Viewport, tick};

    /// Game instance holding all state
    struct Game {
        session: Session,
        pointer: PointerState,
        clock: FixedStep,
        tones: ToneBank,
        audio: Option<WebAudio>,
        render_state: Option<RenderState>,
        fps: FpsCounter,
        settings: Settings,
    }

    impl Game {
        /// Run the simulation steps owed at `time` and drive audio from the results
        fn update(&mut self, time: f64) {
            let input = TickInput {
                pointer_x: self.pointer.active_x(),
            };
            let mut events = Vec::new();
            for _ in 0..self.clock.advance(time) {
                events.extend(tick(&mut self.session, &input, time));
            }

            let mut commands = self.tones.cue_events(&events);
            commands.extend(self.tones.poll(time));
            if let Some(audio) = &self.audio {
                audio.apply(&commands);
            }
            self.fps.record(time);
        }

        /// Pointer-down or touch-start
        fn activate(&mut self, now: f64) {
            let events: Vec<GameEvent> = self.session.activate(now);
            if let Some(audio) = &self.audio {
                audio.resume();
                audio.apply(&self.tones.cue_events(&events));
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(&self.session);
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let fps = self.settings.show_fps.then(|| self.fps.fps());
            HudView::from_session(&self.session, fps).apply(&document);
        }

        /// Canvas changed size: resize the backing store and reset the session
        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let size = CanvasSize::measure(canvas);
            size.apply(canvas);
            self.session.resize(size.viewport());
            self.clock.reset();
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(size.physical.0, size.physical.1, size.logical);
            }
        }
    }

    /// Canvas dimensions in CSS and physical pixels
    struct CanvasSize {
        logical: (f32, f32),
        physical: (u32, u32),
    }

    impl CanvasSize {
        fn measure(canvas: &HtmlCanvasElement) -> Self {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let client_w = canvas.client_width().max(0);
            let client_h = canvas.client_height().max(0);
            Self {
                logical: (client_w as f32, client_h as f32),
                physical: ((client_w as f64 * dpr) as u32, (client_h as f64 * dpr) as u32),
            }
        }

        fn apply(&self, canvas: &HtmlCanvasElement) {
            canvas.set_width(self.physical.0);
            canvas.set_height(self.physical.1);
        }

        fn viewport(&self) -> Viewport {
            Viewport::new(self.logical.0, self.logical.1)
        }
    }

    /// Milliseconds on the same clock as animation-frame timestamps
    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map_or(0.0, |p| p.now())
    }

    async fn init_renderer(canvas: &HtmlCanvasElement, size: &CanvasSize) -> Result<RenderState, RenderInitError> {
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

        RenderState::new(surface, &adapter, size.physical.0, size.physical.1, size.logical).await
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Retro Bounce starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let size = CanvasSize::measure(&canvas);
        size.apply(&canvas);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let start = now();
        let session = Session::new(size.viewport(), detect_device_class(), seed, start);
        let tones = ToneBank::new(&settings, seed.rotate_left(32), start);
        let audio = WebAudio::new(&tones);

        log::info!("Game initialized with seed: {}", seed);

        let render_state = init_renderer(&canvas, &size)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let game = Rc::new(RefCell::new(Game {
            session,
            pointer: PointerState::default(),
            clock: FixedStep::new(),
            tones,
            audio,
            render_state: Some(render_state),
            fps: FpsCounter::new(),
            settings,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Retro Bounce running!");
        Ok(())
    }

    /// x of the first touch relative to the canvas
    fn first_touch_x(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<f32> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(touch.client_x() as f32 - rect.left() as f32)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - offset coordinates are already canvas-relative
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().pointer.mouse_moved(event.offset_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - start or dismiss overlays
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().activate(now());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (activate); suppressing the default stops the emulated mouse events
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(x) = first_touch_x(&canvas_clone, &event) {
                    g.pointer.touch_at(x);
                }
                g.activate(now());
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(x) = first_touch_x(&canvas_clone, &event) {
                    game.borrow_mut().pointer.touch_at(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end / cancel - fall back to the next finger, else to the mouse
        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                match first_touch_x(&canvas_clone, &event) {
                    Some(x) => g.pointer.touch_at(x),
                    None => g.pointer.touches_ended(),
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize(&canvas);
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autopilot run for exercising the simulation without a browser
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use retro_bounce::Settings;
    use retro_bounce::audio::ToneBank;
    use retro_bounce::consts::SIM_STEP_MS;
    use retro_bounce::sim::{DeviceClass, GameEvent, GamePhase, Session, TickInput, Viewport, autopilot_target, tick};

    /// Steps the autopilot plays before letting go of the paddle
    const AUTOPILOT_STEPS: u32 = 3_000;
    /// Hard stop for the whole run
    const MAX_STEPS: u32 = 6_000;

    pub fn run(seed: u64) {
        let mut now = 0.0;
        let mut session = Session::new(Viewport::new(800.0, 600.0), DeviceClass::Pointer, seed, now);
        let mut tones = ToneBank::new(&Settings::default(), seed, now);
        let mut audio_commands = 0usize;
        let mut bounces = 0u32;

        let mut events = session.activate(now);
        let mut step = 0;
        while step < MAX_STEPS {
            audio_commands += tones.cue_events(&events).len() + tones.poll(now).len();
            if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
                break;
            }

            step += 1;
            now += SIM_STEP_MS;
            let pointer_x = if step <= AUTOPILOT_STEPS {
                autopilot_target(&session)
            } else {
                0.0
            };
            if step == AUTOPILOT_STEPS + 1 {
                log::info!("Autopilot off after {} steps (score {})", AUTOPILOT_STEPS, session.score);
            }

            events = tick(&mut session, &TickInput { pointer_x }, now);
            for event in &events {
                if let GameEvent::Bounce { at, score } = event {
                    bounces += 1;
                    log::debug!("Bounce {} at ({:.1}, {:.1})", score, at.x, at.y);
                }
            }
        }

        let ended = matches!(session.phase, GamePhase::GameOver { .. });
        log::info!(
            "Run finished after {} steps: score {}, high score {}, {} bounces, {} audio commands{}",
            step,
            session.score,
            session.high_score.best(),
            bounces,
            audio_commands,
            if ended { "" } else { " (still playing)" }
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Retro Bounce (native) starting...");
    log::info!("The playable build targets wasm32 - running a headless autopilot session");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    headless::run(seed);
}
