use serde::{Deserialize, Serialize};

use super::state::Position;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Start cell of the snake; the grid centre when unset
    pub start: Option<Position>,

    // Rewards (for RL)
    /// Reward for eating food
    pub food_reward: f64,
    /// Reward for a move that eats nothing (a small living cost)
    pub step_penalty: f64,
    /// Penalty for dying, by collision or starvation
    pub death_penalty: f64,
    /// An episode starves once `steps > starvation_factor * (len + 1)`
    pub starvation_factor: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            start: None,
            food_reward: 10.0,
            step_penalty: -0.1,
            death_penalty: -10.0,
            starvation_factor: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    /// Total number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// The cell a fresh snake starts on
    pub fn start_position(&self) -> Position {
        self.start.unwrap_or_else(|| {
            Position::new((self.grid_width / 2) as i32, (self.grid_height / 2) as i32)
        })
    }

    /// Validate grid dimensions and start cell
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(format!(
                "grid must be at least 2x2, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            return Err("grid dimensions must fit in i32".to_string());
        }

        let start = self.start_position();
        if start.x < 0
            || start.y < 0
            || start.x >= self.grid_width as i32
            || start.y >= self.grid_height as i32
        {
            return Err(format!(
                "start position ({}, {}) is outside the {}x{} grid",
                start.x, start.y, self.grid_width, self.grid_height
            ));
        }

        if self.starvation_factor == 0 {
            return Err("starvation_factor must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.start_position(), Position::new(10, 10));
        assert_eq!(config.food_reward, 10.0);
        assert_eq!(config.step_penalty, -0.1);
        assert_eq!(config.death_penalty, -10.0);
        assert_eq!(config.starvation_factor, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.cell_count(), 225);
    }

    #[test]
    fn test_explicit_start() {
        let config = GameConfig {
            start: Some(Position::new(2, 3)),
            ..GameConfig::small()
        };
        assert_eq!(config.start_position(), Position::new(2, 3));
    }

    #[test]
    fn test_validation_rejects_start_outside_grid() {
        let config = GameConfig {
            start: Some(Position::new(10, 0)),
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_tiny_grid() {
        assert!(GameConfig::new(1, 20).validate().is_err());
        assert!(GameConfig::new(20, 0).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"grid_width": 12}"#).unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.starvation_factor, 100);
    }
}
