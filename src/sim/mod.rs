//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod config;
pub mod state;
pub mod tick;

pub use collision::{Aabb, ball_box, obstacle_box, power_up_box};
pub use config::GameConfig;
pub use state::{
    GameEvent, GamePhase, GameState, InputEvent, Obstacle, PowerUp, PowerUpKind,
};
pub use tick::tick;
