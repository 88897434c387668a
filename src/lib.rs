//! Lane Dodge - a three-lane dodge-ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tick loop, spawning, collisions)
//! - `session`: Game session wiring sim state to a high-score store
//! - `render`: DOM renderer (wasm only)
//! - `highscore`: High score persistence
//! - `settings`: Theme and ball color preferences

pub mod highscore;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{Settings, Theme};

/// Fixed entity geometry, in play-field pixels
///
/// Runtime tunables live in [`crate::sim::GameConfig`]; these are the rendered box
/// sizes the collision math is defined against.
pub mod consts {
    /// Obstacle bounding box (square)
    pub const OBSTACLE_SIZE: f32 = 50.0;
    /// Power-up bounding box (square)
    pub const POWER_UP_SIZE: f32 = 30.0;
    /// Ball bounding box (square)
    pub const BALL_SIZE: f32 = 50.0;
    /// Gap between the ball's bottom edge and the field floor
    pub const BALL_BOTTOM_MARGIN: f32 = 20.0;
    /// Horizontal inset of the ball within its lane. The renderer centers
    /// every entity in its lane; collision boxes for obstacles and power-ups
    /// stay anchored at the lane origin (see `sim::collision`).
    pub const BALL_LANE_INSET: f32 = 25.0;
}
