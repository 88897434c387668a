//! Axis-aligned box placement and hit tests
//!
//! Every entity occupies exactly one lane, so the x axis only ever separates
//! different lanes; the y axis decides whether a falling entity has reached
//! the ball. Obstacle and power-up boxes are anchored at the lane origin
//! while the ball carries its rendered inset - a quirk of the original
//! collision math that keeps same-lane overlap windows correct and
//! cross-lane overlap impossible.

use glam::Vec2;

use crate::consts::{BALL_BOTTOM_MARGIN, BALL_LANE_INSET, BALL_SIZE, OBSTACLE_SIZE, POWER_UP_SIZE};

use super::config::GameConfig;
use super::state::{Obstacle, PowerUp};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square box from its top-left corner
    pub fn from_pos_size(pos: Vec2, size: f32) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::splat(size),
        }
    }

    /// Strict overlap test; boxes that merely touch do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Rendered bounding box of the ball for a given lane
pub fn ball_box(config: &GameConfig, lane: u32) -> Aabb {
    let x = lane as f32 * config.lane_width() + BALL_LANE_INSET;
    let y = config.field_height - BALL_BOTTOM_MARGIN - BALL_SIZE;
    Aabb::from_pos_size(Vec2::new(x, y), BALL_SIZE)
}

/// Collision box of an obstacle
pub fn obstacle_box(config: &GameConfig, obstacle: &Obstacle) -> Aabb {
    let x = obstacle.lane as f32 * config.lane_width();
    Aabb::from_pos_size(Vec2::new(x, obstacle.y), OBSTACLE_SIZE)
}

/// Collision box of a power-up
pub fn power_up_box(config: &GameConfig, power_up: &PowerUp) -> Aabb {
    let x = power_up.lane as f32 * config.lane_width();
    Aabb::from_pos_size(Vec2::new(x, power_up.y), POWER_UP_SIZE)
}
