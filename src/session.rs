//! Game session
//!
//! Owns the sim state plus the injected high-score store, calling the store
//! at the two defined lifecycle points: load at init, save on the game-over
//! transition. Everything else passes straight through to the sim.

use crate::highscore::HighScoreStore;
use crate::sim::{self, GameConfig, GameEvent, GameState, InputEvent};

pub struct Session {
    state: GameState,
    store: Box<dyn HighScoreStore>,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64, store: Box<dyn HighScoreStore>) -> Self {
        let high_score = store.load();
        log::info!("session start, seed {seed}, stored best {high_score}");
        Self {
            state: GameState::new(config, seed, high_score),
            store,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Deliver a discrete input event (synchronous, between ticks)
    pub fn handle_input(&mut self, event: InputEvent) {
        self.state.handle_input(event);
    }

    /// Force-pause/resume, used by the settings overlay
    pub fn set_paused(&mut self, paused: bool) {
        self.state.set_paused(paused);
    }

    /// Advance one tick and persist the best score whenever a run ends
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let events = sim::tick(&mut self.state);
        for event in &events {
            if let GameEvent::GameOver { high_score, .. } = event {
                self.store.save(*high_score);
            }
        }
        events
    }
}
