//! Lane Dodge entry point
//!
//! Handles platform-specific initialization and drives the simulation clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlElement, HtmlInputElement, KeyboardEvent, TouchEvent};

    use lane_dodge::highscore::LocalStorageHighScore;
    use lane_dodge::render::DomRenderer;
    use lane_dodge::sim::{GameConfig, GameEvent, InputEvent};
    use lane_dodge::{Session, Settings};

    /// Game instance holding all state
    struct App {
        session: Session,
        renderer: DomRenderer,
        settings: Settings,
        settings_open: bool,
    }

    impl App {
        /// Advance one tick and repaint; fires the game-over notification
        fn tick(&mut self) {
            let events = self.session.tick();
            for event in &events {
                match event {
                    GameEvent::GameOver { score, .. } => {
                        if let Some(window) = web_sys::window() {
                            let _ =
                                window.alert_with_message(&format!("Game Over! Your score: {score}"));
                        }
                    }
                    GameEvent::ShieldStarted => log::info!("shield up"),
                    GameEvent::LifeLost { lives } => log::info!("hit, {lives} lives left"),
                    GameEvent::LifeGained { lives } => log::info!("extra life, now {lives}"),
                }
            }
            self.render();
        }

        fn input(&mut self, event: InputEvent) {
            self.session.handle_input(event);
            self.render();
        }

        fn render(&mut self) {
            if let Err(e) = self.renderer.render(self.session.state(), &self.settings) {
                log::warn!("render error: {e:?}");
            }
        }

        /// Opening the settings overlay forces a pause; closing it resumes
        fn set_settings_open(&mut self, open: bool) {
            self.settings_open = open;
            self.session.set_paused(open);
            show_element("settings-panel", open);
            self.render();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = GameConfig::default();
        let tick_interval_ms = config.tick_interval_ms;
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(config, seed, Box::new(LocalStorageHighScore::new()));
        let renderer = DomRenderer::new(&document)?;
        let settings = Settings::load();

        let app = Rc::new(RefCell::new(App {
            session,
            renderer,
            settings,
            settings_open: false,
        }));
        app.borrow_mut().render();
        sync_settings_controls(&app);

        setup_clock(app.clone(), tick_interval_ms)?;
        setup_input_handlers(app.clone())?;
        setup_settings_panel(app.clone())?;
        setup_auto_pause(app)?;

        log::info!("Lane Dodge running (seed {seed})");
        Ok(())
    }

    /// The simulation clock: a plain interval at the configured tick period.
    /// Pause is handled inside the sim, which simply refuses to advance.
    fn setup_clock(app: Rc<RefCell<App>>, interval_ms: u32) -> Result<(), JsValue> {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut()>::new(move || {
            app.borrow_mut().tick();
        });
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        )?;
        closure.forget();
        Ok(())
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let input = match event.key().as_str() {
                    "ArrowLeft" => Some(InputEvent::MoveLeft),
                    "ArrowRight" => Some(InputEvent::MoveRight),
                    " " => Some(InputEvent::TogglePause),
                    _ => None,
                };
                if let Some(input) = input {
                    app.borrow_mut().input(input);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch: left half of the play-field moves left, right half right
        if let Some(area) = document.get_element_by_id("game-area") {
            for event_name in ["touchstart", "touchmove"] {
                let app = app.clone();
                let area_el: HtmlElement = area.clone().dyn_into()?;
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let Some(touch) = event.touches().get(0) else {
                        return;
                    };
                    let rect = area_el.get_bounding_client_rect();
                    let relative_x = touch.client_x() as f64 - rect.left();
                    let input = if relative_x < rect.width() / 2.0 {
                        InputEvent::MoveLeft
                    } else {
                        InputEvent::MoveRight
                    };
                    app.borrow_mut().input(input);
                });
                area.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }

        // Pause button
        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().input(InputEvent::TogglePause);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_settings_panel(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let document = web_sys::window().expect("no window").document().expect("no document");

        // Open / close
        if let Some(btn) = document.get_element_by_id("settings-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().set_settings_open(true);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        if let Some(btn) = document.get_element_by_id("close-settings-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().set_settings_open(false);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Theme toggle
        if let Some(btn) = document.get_element_by_id("theme-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                {
                    let mut a = app.borrow_mut();
                    a.settings.theme = a.settings.theme.toggled();
                    a.settings.save();
                    a.render();
                }
                sync_settings_controls(&app);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Ball color picker
        if let Some(input) = document.get_element_by_id("ball-color") {
            let app = app.clone();
            let input_el: HtmlInputElement = input.clone().dyn_into()?;
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                a.settings.ball_color = input_el.value();
                a.settings.save();
                a.render();
            });
            input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Auto-pause when the tab is hidden; never auto-resumes
    fn setup_auto_pause(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let document = web_sys::window().expect("no window").document().expect("no document");
        let document_clone = document.clone();
        let app_vis = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut a = app_vis.borrow_mut();
                a.session.set_paused(true);
                a.render();
                log::info!("Auto-paused (tab hidden)");
            }
        });
        document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
        closure.forget();

        // Window blur (click outside)
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut a = app.borrow_mut();
            a.session.set_paused(true);
            a.render();
            log::info!("Auto-paused (window blur)");
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Push current preference values into the overlay controls
    fn sync_settings_controls(app: &Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let a = app.borrow();
        if let Some(btn) = document.get_element_by_id("theme-btn") {
            btn.set_text_content(Some(&format!(
                "Switch to {} Theme",
                a.settings.theme.toggled().as_str()
            )));
        }
        if let Some(input) = document.get_element_by_id("ball-color") {
            if let Ok(input) = input.dyn_into::<HtmlInputElement>() {
                input.set_value(&a.settings.ball_color);
            }
        }
    }

    fn show_element(id: &str, visible: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id(id) {
            let class = if visible { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("startup failed: {e:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_dodge::highscore::MemoryHighScore;
    use lane_dodge::sim::{GameConfig, GameEvent};
    use lane_dodge::Session;

    env_logger::init();
    log::info!("Lane Dodge (native) starting headless run...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut session = Session::new(GameConfig::default(), seed, Box::new(MemoryHighScore::new()));
    let mut runs_ended = 0u32;
    for _ in 0..600 {
        if let Some(input) = steer(session.state()) {
            session.handle_input(input);
        }
        for event in session.tick() {
            if let GameEvent::GameOver { score, .. } = event {
                log::info!("run ended at score {score}");
                runs_ended += 1;
            }
        }
    }

    let state = session.state();
    println!(
        "headless run done: score {}, best {}, runs ended {}",
        state.score, state.high_score, runs_ended
    );
}

/// Step toward an open lane when the lowest descending row blocks ours
#[cfg(not(target_arch = "wasm32"))]
fn steer(state: &lane_dodge::sim::GameState) -> Option<lane_dodge::sim::InputEvent> {
    use lane_dodge::consts::{BALL_BOTTOM_MARGIN, BALL_SIZE};
    use lane_dodge::sim::InputEvent;

    let ball_top = state.config.field_height - BALL_BOTTOM_MARGIN - BALL_SIZE;
    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.y < ball_top)
        .max_by(|a, b| a.y.total_cmp(&b.y))?;
    let row_y = threat.y;
    let blocked: Vec<u32> = state
        .obstacles
        .iter()
        .filter(|o| o.y == row_y)
        .map(|o| o.lane)
        .collect();
    if !blocked.contains(&state.lane) {
        return None;
    }
    let open = (0..state.config.lane_count).find(|l| !blocked.contains(l))?;
    if open < state.lane {
        Some(InputEvent::MoveLeft)
    } else {
        Some(InputEvent::MoveRight)
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
