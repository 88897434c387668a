//! Runtime tunables for the simulation
//!
//! The renderer and input layer never read these directly; they are handed to
//! the sim at construction so the core carries no hardcoded pixel knowledge
//! beyond the entity boxes in [`crate::consts`].

/// Simulation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Simulation clock period in milliseconds
    pub tick_interval_ms: u32,
    /// Play-field width in pixels
    pub field_width: f32,
    /// Play-field height in pixels; entities are pruned at this y
    pub field_height: f32,
    /// Number of horizontal lanes
    pub lane_count: u32,
    /// Fall speed in pixels per tick
    pub base_speed: f32,
    /// Lives at the start of a run
    pub starting_lives: u8,
    /// Hard cap on lives
    pub max_lives: u8,
    /// Shield invulnerability window in milliseconds
    pub shield_duration_ms: u32,
    /// Per-tick chance of spawning an obstacle row (gap permitting)
    pub obstacle_spawn_chance: f64,
    /// Per-tick chance of spawning a power-up
    pub power_up_spawn_chance: f64,
    /// Chance a spawned power-up is a Shield (otherwise a Life)
    pub shield_power_up_ratio: f64,
    /// Candidate minimum-gap thresholds for row spawning, one chosen
    /// uniformly per check
    pub row_gap_options: [f32; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            field_width: 300.0,
            field_height: 600.0,
            lane_count: 3,
            base_speed: 10.0,
            starting_lives: 3,
            max_lives: 5,
            shield_duration_ms: 7000,
            obstacle_spawn_chance: 0.10,
            power_up_spawn_chance: 0.01,
            shield_power_up_ratio: 0.8,
            row_gap_options: [200.0, 300.0],
        }
    }
}

impl GameConfig {
    /// Width of one lane in pixels
    pub fn lane_width(&self) -> f32 {
        self.field_width / self.lane_count as f32
    }

    /// Shield window expressed in whole ticks, rounded up
    pub fn shield_duration_ticks(&self) -> u32 {
        self.shield_duration_ms.div_ceil(self.tick_interval_ms)
    }

    /// Center lane, where the ball starts and respawns
    pub fn center_lane(&self) -> u32 {
        self.lane_count / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lane_width() {
        let config = GameConfig::default();
        assert_eq!(config.lane_width(), 100.0);
    }

    #[test]
    fn test_shield_duration_ticks() {
        let config = GameConfig::default();
        assert_eq!(config.shield_duration_ticks(), 70);

        // A period that doesn't divide evenly rounds up
        let config = GameConfig {
            tick_interval_ms: 300,
            ..Default::default()
        };
        assert_eq!(config.shield_duration_ticks(), 24);
    }

    #[test]
    fn test_center_lane() {
        assert_eq!(GameConfig::default().center_lane(), 1);
    }
}
