//! Q-learning hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Initial hyperparameters for the tabular Q-learning agent
///
/// The agent copies these into plain mutable fields at construction; nothing
/// here changes during training.
///
/// # Example
///
/// ```rust
/// use q_snake::rl::AgentConfig;
///
/// let config = AgentConfig {
///     alpha: 0.2,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Exploration rate: probability of a uniformly random action
    ///
    /// Must lie in [0, 1].
    ///
    /// Default: 1.0
    pub epsilon: f64,

    /// Learning rate (alpha)
    ///
    /// Step size of the value update. Must lie in (0, 1].
    ///
    /// Default: 0.1
    pub alpha: f64,

    /// Discount factor for future rewards (gamma)
    ///
    /// Must lie in [0, 1).
    ///
    /// Default: 0.9
    pub gamma: f64,
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    ///
    /// # Example
    ///
    /// ```rust
    /// use q_snake::rl::AgentConfig;
    ///
    /// let mut config = AgentConfig::default();
    /// config.gamma = 1.0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(format!("epsilon must be in [0, 1], got {}", self.epsilon));
        }

        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(format!("alpha must be in (0, 1], got {}", self.alpha));
        }

        if !(0.0..1.0).contains(&self.gamma) {
            return Err(format!("gamma must be in [0, 1), got {}", self.gamma));
        }

        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            alpha: 0.1,
            gamma: 0.9,
        }
    }
}

/// Per-episode exploration schedule applied by a training driver
///
/// Multiplicative decay with a floor. The agent itself never touches epsilon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpsilonSchedule {
    /// Factor epsilon is multiplied by after each episode
    ///
    /// Default: 0.995
    pub decay: f64,

    /// Epsilon never decays below this value
    ///
    /// Default: 0.01
    pub min_epsilon: f64,
}

impl EpsilonSchedule {
    /// Epsilon for the next episode
    ///
    /// Values already at or below the floor are returned unchanged.
    pub fn apply(&self, epsilon: f64) -> f64 {
        if epsilon > self.min_epsilon {
            (epsilon * self.decay).max(self.min_epsilon)
        } else {
            epsilon
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(format!("decay must be in (0, 1], got {}", self.decay));
        }

        if !(0.0..=1.0).contains(&self.min_epsilon) {
            return Err(format!(
                "min_epsilon must be in [0, 1], got {}",
                self.min_epsilon
            ));
        }

        Ok(())
    }
}

impl Default for EpsilonSchedule {
    fn default() -> Self {
        Self {
            decay: 0.995,
            min_epsilon: 0.01,
        }
    }
}
