//! Game state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::config::GameConfig;

/// A falling obstacle; destroyed off-screen or on an unshielded hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub lane: u32,
    /// Distance in pixels from the top of the play-field
    pub y: f32,
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Shield,
    Life,
}

/// A falling power-up; destroyed off-screen or on pickup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUp {
    pub lane: u32,
    pub y: f32,
    pub kind: PowerUpKind,
}

/// Externally observable phase of the session
///
/// Game over is not a phase: it is an instantaneous transition that resets
/// the run and lands back in `Playing` (reported via [`GameEvent::GameOver`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    Paused,
}

/// Discrete input events delivered by the input source
///
/// Debouncing and origin (keyboard vs. touch) are the input source's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    TogglePause,
}

/// Events emitted by a tick, for the UI layer to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An unshielded obstacle hit cost a life
    LifeLost { lives: u8 },
    /// A Life power-up was collected (lives already capped stays put)
    LifeGained { lives: u8 },
    /// A Shield power-up (re)started the invulnerability window
    ShieldStarted,
    /// Lives would have dropped below 1; the run was reset
    GameOver { score: u32, high_score: u32 },
}

/// Complete session state, owned exclusively by one logical session and
/// mutated only from the tick handler or an input handler
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Lane the ball occupies, always < `config.lane_count`
    pub lane: u32,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    /// Monotonic counter, +1 per tick
    pub score: u32,
    /// Fall speed in pixels per tick
    pub speed: f32,
    /// In [1, max_lives] while the session is alive
    pub lives: u8,
    pub phase: GamePhase,
    /// Remaining shield window in ticks; 0 means no shield
    pub shield_ticks: u32,
    /// Best score seen so far, seeded from storage at init
    pub high_score: u32,
    /// Run seed, for log correlation
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh session. `high_score` comes from the persistence shim
    /// (0 when nothing is stored).
    pub fn new(config: GameConfig, seed: u64, high_score: u32) -> Self {
        let lane = config.center_lane();
        let speed = config.base_speed;
        let lives = config.starting_lives;
        Self {
            config,
            lane,
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            speed,
            lives,
            phase: GamePhase::Playing,
            shield_ticks: 0,
            high_score,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn shield_active(&self) -> bool {
        self.shield_ticks > 0
    }

    /// Apply a discrete input event, synchronously between ticks.
    /// Out-of-range lane moves are silently ignored.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveLeft => {
                if self.lane > 0 {
                    self.lane -= 1;
                }
            }
            InputEvent::MoveRight => {
                if self.lane + 1 < self.config.lane_count {
                    self.lane += 1;
                }
            }
            InputEvent::TogglePause => {
                self.phase = match self.phase {
                    GamePhase::Playing => GamePhase::Paused,
                    GamePhase::Paused => GamePhase::Playing,
                };
            }
        }
    }

    /// Force the pause state (the settings overlay pauses on open and
    /// resumes on close, regardless of prior phase)
    pub fn set_paused(&mut self, paused: bool) {
        self.phase = if paused {
            GamePhase::Paused
        } else {
            GamePhase::Playing
        };
    }

    /// (Re)start the shield window at full duration, last-write-wins
    pub fn start_shield(&mut self) {
        self.shield_ticks = self.config.shield_duration_ticks();
    }

    /// The game-over transition's reset half: back to initial run values.
    /// The RNG keeps its stream so consecutive runs differ.
    pub(crate) fn reset_run(&mut self) {
        self.obstacles.clear();
        self.power_ups.clear();
        self.lane = self.config.center_lane();
        self.score = 0;
        self.speed = self.config.base_speed;
        self.lives = self.config.starting_lives;
        self.shield_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_moves_clamp_at_edges() {
        let mut state = GameState::new(GameConfig::default(), 1, 0);
        assert_eq!(state.lane, 1);

        state.handle_input(InputEvent::MoveLeft);
        assert_eq!(state.lane, 0);
        // Ignored at the left edge
        state.handle_input(InputEvent::MoveLeft);
        assert_eq!(state.lane, 0);

        state.handle_input(InputEvent::MoveRight);
        state.handle_input(InputEvent::MoveRight);
        assert_eq!(state.lane, 2);
        // Ignored at the right edge
        state.handle_input(InputEvent::MoveRight);
        assert_eq!(state.lane, 2);
    }

    #[test]
    fn test_pause_toggles() {
        let mut state = GameState::new(GameConfig::default(), 1, 0);
        assert_eq!(state.phase, GamePhase::Playing);

        state.handle_input(InputEvent::TogglePause);
        assert_eq!(state.phase, GamePhase::Paused);
        state.handle_input(InputEvent::TogglePause);
        assert_eq!(state.phase, GamePhase::Playing);

        // set_paused is idempotent
        state.set_paused(true);
        state.set_paused(true);
        assert!(state.paused());
        state.set_paused(false);
        assert!(!state.paused());
    }

    #[test]
    fn test_start_shield_restarts_full_window() {
        let mut state = GameState::new(GameConfig::default(), 1, 0);
        state.shield_ticks = 3;
        state.start_shield();
        assert_eq!(state.shield_ticks, state.config.shield_duration_ticks());
    }

    #[test]
    fn test_reset_run_restores_initial_values() {
        let mut state = GameState::new(GameConfig::default(), 7, 42);
        state.lane = 0;
        state.score = 123;
        state.speed = 99.0;
        state.lives = 1;
        state.shield_ticks = 10;
        state.obstacles.push(Obstacle { lane: 0, y: 100.0 });
        state.power_ups.push(PowerUp {
            lane: 2,
            y: 50.0,
            kind: PowerUpKind::Life,
        });

        state.reset_run();

        assert_eq!(state.lane, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, state.config.base_speed);
        assert_eq!(state.lives, state.config.starting_lives);
        assert_eq!(state.shield_ticks, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.power_ups.is_empty());
        // The persisted best survives the reset
        assert_eq!(state.high_score, 42);
    }
}
