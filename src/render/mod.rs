//! DOM renderer (WASM only)
//!
//! Consumes a state snapshot and produces pixel layout from it; no game
//! logic lives here, and no game logic reaches back into the DOM. The shield
//! glow is derived from `shield_active` on every frame rather than toggled
//! imperatively.

use wasm_bindgen::JsValue;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::consts::{BALL_BOTTOM_MARGIN, BALL_SIZE, OBSTACLE_SIZE, POWER_UP_SIZE};
use crate::settings::Settings;
use crate::sim::{GameState, PowerUpKind};

pub struct DomRenderer {
    document: Document,
    game_area: HtmlElement,
    ball: HtmlElement,
    /// Entity divs from the previous frame, torn down on each render
    entity_els: Vec<Element>,
}

impl DomRenderer {
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let game_area: HtmlElement = document
            .get_element_by_id("game-area")
            .ok_or_else(|| JsValue::from_str("missing #game-area"))?
            .dyn_into()?;

        let ball: HtmlElement = document.create_element("div")?.dyn_into()?;
        ball.set_class_name("ball");
        game_area.append_child(&ball)?;

        Ok(Self {
            document: document.clone(),
            game_area,
            ball,
            entity_els: Vec::new(),
        })
    }

    pub fn render(&mut self, state: &GameState, settings: &Settings) -> Result<(), JsValue> {
        let theme = settings.theme;
        let area_style = self.game_area.style();
        area_style.set_property("background", theme.background())?;
        area_style.set_property("color", theme.foreground())?;

        self.render_ball(state, settings)?;
        self.render_entities(state)?;
        self.render_hud(state);
        Ok(())
    }

    fn render_ball(&self, state: &GameState, settings: &Settings) -> Result<(), JsValue> {
        let lane_w = state.config.lane_width();
        let x = state.lane as f32 * lane_w + (lane_w - BALL_SIZE) / 2.0;

        let style = self.ball.style();
        style.set_property("left", &format!("{x}px"))?;
        style.set_property("bottom", &format!("{BALL_BOTTOM_MARGIN}px"))?;
        style.set_property("width", &format!("{BALL_SIZE}px"))?;
        style.set_property("height", &format!("{BALL_SIZE}px"))?;
        style.set_property("background-color", &settings.ball_color)?;
        // Glow is pure derived visual state
        let glow = if state.shield_active() {
            "0 0 15px 10px green"
        } else {
            "none"
        };
        style.set_property("box-shadow", glow)?;
        Ok(())
    }

    fn render_entities(&mut self, state: &GameState) -> Result<(), JsValue> {
        for el in self.entity_els.drain(..) {
            el.remove();
        }

        let lane_w = state.config.lane_width();
        for obstacle in &state.obstacles {
            let x = obstacle.lane as f32 * lane_w + (lane_w - OBSTACLE_SIZE) / 2.0;
            let el = self.spawn_div("obstacle", x, obstacle.y, OBSTACLE_SIZE)?;
            self.entity_els.push(el);
        }
        for power_up in &state.power_ups {
            let class = match power_up.kind {
                PowerUpKind::Shield => "power-up shield",
                PowerUpKind::Life => "power-up life",
            };
            let x = power_up.lane as f32 * lane_w + (lane_w - POWER_UP_SIZE) / 2.0;
            let el = self.spawn_div(class, x, power_up.y, POWER_UP_SIZE)?;
            self.entity_els.push(el);
        }
        Ok(())
    }

    fn spawn_div(&self, class: &str, x: f32, y: f32, size: f32) -> Result<Element, JsValue> {
        let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        el.set_class_name(class);
        let style = el.style();
        style.set_property("left", &format!("{x}px"))?;
        style.set_property("top", &format!("{y}px"))?;
        style.set_property("width", &format!("{size}px"))?;
        style.set_property("height", &format!("{size}px"))?;
        self.game_area.append_child(&el)?;
        Ok(el.into())
    }

    fn render_hud(&self, state: &GameState) {
        self.set_text("hud-score", &state.score.to_string());
        self.set_text("hud-lives", &state.lives.to_string());
        self.set_text("hud-best", &state.high_score.to_string());
        let label = if state.paused() { "\u{25B6}" } else { "\u{23F8}" };
        self.set_text("pause-btn", label);
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}
