//! Flappy Hen entry point
//!
//! On the web this wires the DOM to the game and runs the animation loop.
//! Natively it plays a headless autopilot demo and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use flappy_hen::audio::web::HtmlAudio;
    use flappy_hen::consts::{VIEW_HEIGHT, VIEW_WIDTH};
    use flappy_hen::input::{Action, InputEvent, Key};
    use flappy_hen::persistence::LocalStore;
    use flappy_hen::renderer::{CanvasPainter, Viewport};
    use flappy_hen::sim::Phase;
    use flappy_hen::{BackgroundFit, Game, Tuning};

    /// Game plus the page it lives on
    struct App {
        game: Game<LocalStore, HtmlAudio>,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
        document: Document,
        /// An animation callback is pending
        looping: bool,
    }

    impl App {
        fn paint(&self) {
            self.painter.paint(&self.game.scene());
        }

        fn resize(&self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let viewport = Viewport::new(VIEW_WIDTH, VIEW_HEIGHT, window.device_pixel_ratio());
            let (avail_w, avail_h) = match self.canvas.parent_element() {
                Some(parent) => (parent.client_width() as f32, parent.client_height() as f32),
                None => (VIEW_WIDTH, VIEW_HEIGHT),
            };
            let display = viewport.fit_within(avail_w, avail_h);
            if let Err(e) = self.painter.resize(&viewport, display) {
                log::warn!("Resize failed: {:?}", e);
            }
            self.paint();
        }

        /// Update HUD text and overlay visibility
        fn update_hud(&self) {
            let hud = self.game.hud();
            set_text(&self.document, "hud-score", &format!("Score: {}", hud.score));
            set_text(&self.document, "hud-best", &format!("Best: {}", hud.best));
            set_text(
                &self.document,
                "btn-sound",
                if hud.sound_on { "🔊" } else { "🔇" },
            );
            set_hidden(&self.document, "overlay-start", hud.phase != Phase::Idle);
            set_hidden(&self.document, "overlay-gameover", hud.phase != Phase::Over);
            if hud.phase == Phase::Over {
                set_text(&self.document, "final-score", &format!("Score: {}", hud.score));
                set_text(&self.document, "final-best", &format!("Best: {}", hud.best));
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    /// Optional `<script id="tuning" type="application/json">` override
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Using tuning from page");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning: {}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Flappy Hen starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(
            load_tuning(&document),
            seed,
            LocalStore::new(),
            HtmlAudio::from_document(&document),
        );
        if let Some(fit) = canvas
            .get_attribute("data-background-fit")
            .and_then(|v| BackgroundFit::from_str(&v))
        {
            game.set_background_fit(fit);
        }
        let notifier = game.assets().notifier();

        let app = Rc::new(RefCell::new(App {
            game,
            painter: CanvasPainter::new(canvas.clone())?,
            canvas: canvas.clone(),
            document,
            looping: false,
        }));

        // Redraw the idle screen as sprites arrive; a running loop polls on its own
        {
            let weak = Rc::downgrade(&app);
            let on_settled = move || {
                let Some(app) = weak.upgrade() else {
                    return;
                };
                let Ok(mut a) = app.try_borrow_mut() else {
                    return;
                };
                if !a.game.session().is_running() && a.game.poll_assets() {
                    a.paint();
                }
            };
            app.borrow_mut().painter.load_images(&notifier, on_settled)?;
        }

        setup_input_handlers(&canvas, app.clone())?;
        setup_buttons(app.clone());
        setup_resize(app.clone());

        {
            let a = app.borrow();
            a.resize();
            a.update_hud();
        }

        log::info!("Flappy Hen ready (seed {})", seed);
        Ok(())
    }

    /// Feed an input to the game and start the loop if a run began
    fn dispatch(app: &Rc<RefCell<App>>, event: InputEvent) -> Action {
        let (action, start_loop) = {
            let mut a = app.borrow_mut();
            let action = a.game.handle_input(event);
            let start_loop = action == Action::Start && !a.looping;
            if start_loop {
                a.looping = true;
            }
            if action == Action::ReturnToMenu {
                a.paint();
            }
            a.update_hud();
            (action, start_loop)
        };
        if start_loop {
            request_animation_frame(app.clone());
        }
        action
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_code(&event.code());
                if key == Key::Other {
                    return;
                }
                if dispatch(&app, InputEvent::Key(key)) == Action::Jump {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch; not passive so the page does not scroll or zoom
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if dispatch(&app, InputEvent::Touch) == Action::Jump {
                    event.prevent_default();
                }
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        // Mouse
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if dispatch(&app, InputEvent::PointerDown) == Action::Jump {
                    event.prevent_default();
                }
            });
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for (id, event) in [
            ("btn-start", InputEvent::StartButton),
            ("btn-restart", InputEvent::RestartButton),
            ("btn-sound", InputEvent::SoundButton),
        ] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("No #{} on page", id);
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |e: MouseEvent| {
                // Keep the click from reaching the canvas as a flap
                e.stop_propagation();
                dispatch(&app, event);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let reschedule = {
            let mut a = app.borrow_mut();
            let step = a.game.frame(time);
            if step.repaint() {
                a.paint();
                a.update_hud();
            }
            a.looping = step.reschedule();
            a.looping
        };

        if reschedule {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_hen::audio::NullAudio;
    use flappy_hen::input::InputEvent;
    use flappy_hen::persistence::MemoryStore;
    use flappy_hen::{FrameStep, Game, Tuning};

    env_logger::init();
    log::info!("Flappy Hen (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use `trunk serve` to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0);
    let mut game = Game::new(Tuning::default(), seed, MemoryStore::new(), NullAudio);
    game.set_autopilot(true);
    game.handle_input(InputEvent::StartButton);

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    let mut frames = 0;
    while frames < MAX_FRAMES {
        frames += 1;
        match game.frame(frames as f64 * FRAME_MS) {
            FrameStep::Ended | FrameStep::Stopped => break,
            FrameStep::Baseline | FrameStep::Advanced => {}
        }
    }

    let hud = game.hud();
    log::info!(
        "Demo finished after {} frames: score {}, best {}",
        frames,
        hud.score,
        hud.best
    );
    println!("seed {}: score {} in {} frames", seed, hud.score, frames);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
