//! Headless training mode for the Q-learning agent
//!
//! Runs episodes back to back as fast as the engine can be ticked. After every
//! episode the driver records statistics and applies its epsilon schedule to
//! the agent.
//!
//! # Example
//!
//! ```rust
//! use q_snake::modes::{TrainConfig, TrainMode};
//!
//! let mut config = TrainConfig::new(50);
//! config.seed = 7;
//!
//! let mut train_mode = TrainMode::new(config);
//! train_mode.run().unwrap();
//! assert_eq!(train_mode.stats().total_episodes(), 50);
//! ```

use anyhow::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine, GameError, StepResult};
use crate::metrics::TrainingStats;
use crate::rl::{encode, AgentConfig, EpsilonSchedule, QLearningAgent};

/// Mixed into the run seed so the agent's stream differs from the engine's
const AGENT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Configuration for training mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Number of episodes to train
    pub num_episodes: usize,

    /// Log training progress every N episodes
    pub log_frequency: usize,

    /// Seed for food placement and the agent's exploration
    pub seed: u64,

    /// Game configuration (grid size, rewards)
    pub game: GameConfig,

    /// Initial agent hyperparameters
    pub agent: AgentConfig,

    /// Per-episode epsilon decay
    pub schedule: EpsilonSchedule,
}

impl TrainConfig {
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.agent.validate()?;
        self.schedule.validate()?;
        if self.log_frequency == 0 {
            return Err("log_frequency must be at least 1".to_string());
        }
        Ok(())
    }

    /// Seed used for the agent's generator
    pub fn agent_seed(&self) -> u64 {
        self.seed ^ AGENT_SEED_SALT
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            num_episodes: 5000,
            log_frequency: 100,
            seed: 0,
            game: GameConfig::default(),
            agent: AgentConfig::default(),
            schedule: EpsilonSchedule::default(),
        }
    }
}

/// What the agent does on each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPolicy {
    /// Apply the Q-learning update after the step
    pub learn: bool,
    /// Use epsilon-greedy selection instead of pure exploitation
    pub explore: bool,
}

impl TickPolicy {
    pub const TRAIN: TickPolicy = TickPolicy {
        learn: true,
        explore: true,
    };
}

/// One observe→act→learn cycle
///
/// Encodes the current state, picks an action, steps the engine and, if the
/// policy asks for it, updates the agent from the resulting transition.
pub fn run_tick<RE: Rng, RA: Rng>(
    engine: &mut GameEngine<RE>,
    agent: &mut QLearningAgent<RA>,
    policy: TickPolicy,
) -> Result<StepResult, GameError> {
    let key = encode(engine.state());
    let action = if policy.explore {
        agent.choose_action(key)
    } else {
        agent.greedy_action(key)
    };

    let result = engine.step(action)?;

    if policy.learn {
        let next_key = encode(engine.state());
        agent.learn(key, action, result.reward, next_key, result.done);
    }

    Ok(result)
}

/// Totals for a finished episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    pub reward: f64,
    pub steps: usize,
    pub score: u32,
}

/// Training mode for the Q-learning agent
pub struct TrainMode {
    engine: GameEngine,
    agent: QLearningAgent,
    stats: TrainingStats,
    config: TrainConfig,
}

impl TrainMode {
    pub fn new(config: TrainConfig) -> Self {
        let engine = GameEngine::seeded(config.game.clone(), config.seed);
        let agent = QLearningAgent::seeded(&config.agent, config.agent_seed());

        Self {
            engine,
            agent,
            // 100-episode rolling window
            stats: TrainingStats::new(100),
            config,
        }
    }

    /// Train for the configured number of episodes
    pub fn run(&mut self) -> Result<()> {
        self.log_header();

        for episode in 0..self.config.num_episodes {
            self.run_episode()?;

            if (episode + 1) % self.config.log_frequency == 0 {
                info!(
                    "[Episode {}/{}] {}",
                    episode + 1,
                    self.config.num_episodes,
                    self.stats.format_summary()
                );
            }
        }

        info!("Training complete: {}", self.stats.format_summary());

        Ok(())
    }

    /// Play one full episode with learning on, then record it and decay epsilon
    pub fn run_episode(&mut self) -> Result<EpisodeSummary> {
        self.engine.reset();
        let mut summary = EpisodeSummary {
            reward: 0.0,
            steps: 0,
            score: 0,
        };

        loop {
            let result = run_tick(&mut self.engine, &mut self.agent, TickPolicy::TRAIN)?;
            summary.reward += result.reward;
            summary.steps += 1;
            summary.score = result.score;

            if result.done {
                debug!(
                    score = result.score,
                    steps = summary.steps,
                    starved = result.info.starved,
                    collision = ?result.info.collision_type,
                    "episode finished"
                );
                break;
            }
        }

        self.finish_episode(&summary);
        Ok(summary)
    }

    fn finish_episode(&mut self, summary: &EpisodeSummary) {
        self.stats
            .record_episode(summary.reward, summary.steps, summary.score);
        self.agent.epsilon = self.config.schedule.apply(self.agent.epsilon);
        self.stats
            .record_exploration(self.agent.epsilon, self.agent.states_seen());
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    /// Hand the trained agent and engine over to another driver
    pub fn into_parts(self) -> (GameEngine, QLearningAgent, TrainingStats) {
        (self.engine, self.agent, self.stats)
    }

    fn log_header(&self) {
        info!("Q-learning training - {} episodes", self.config.num_episodes);
        info!(
            "Grid: {}x{} | seed: {}",
            self.config.game.grid_width, self.config.game.grid_height, self.config.seed
        );
        info!(
            "Agent: epsilon={} alpha={} gamma={}",
            self.agent.epsilon, self.agent.alpha, self.agent.gamma
        );
        info!(
            "Schedule: decay={} min_epsilon={}",
            self.config.schedule.decay, self.config.schedule.min_epsilon
        );
        info!("Logging: every {} episodes", self.config.log_frequency);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(episodes: usize, seed: u64) -> TrainConfig {
        TrainConfig {
            num_episodes: episodes,
            log_frequency: 10,
            seed,
            game: GameConfig::small(),
            ..Default::default()
        }
    }

    #[test]
    fn test_train_config_creation() {
        let config = TrainConfig::new(1000);
        assert_eq!(config.num_episodes, 1000);
        assert_eq!(config.log_frequency, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_nested_config_is_rejected() {
        let mut config = TrainConfig::new(10);
        config.agent.gamma = 1.0;
        assert!(config.validate().is_err());

        let mut config = TrainConfig::new(10);
        config.log_frequency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_run_single_episode() {
        let mut train_mode = TrainMode::new(small_config(1, 3));

        let summary = train_mode.run_episode().unwrap();

        assert!(summary.steps > 0);
        assert_eq!(train_mode.stats().total_episodes(), 1);
        assert_eq!(train_mode.stats().total_steps(), summary.steps);
        assert!(train_mode.agent().states_seen() > 0);
    }

    #[test]
    fn test_epsilon_decays_once_per_episode() {
        let mut train_mode = TrainMode::new(small_config(3, 1));
        train_mode.run().unwrap();

        let expected = 0.995f64.powi(3);
        assert!((train_mode.agent().epsilon - expected).abs() < 1e-12);
        assert!((train_mode.stats().epsilon() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_reproduces_run() {
        let mut a = TrainMode::new(small_config(40, 21));
        let mut b = TrainMode::new(small_config(40, 21));
        a.run().unwrap();
        b.run().unwrap();

        assert_eq!(a.stats().total_steps(), b.stats().total_steps());
        assert_eq!(a.stats().high_score(), b.stats().high_score());
        assert_eq!(a.agent().states_seen(), b.agent().states_seen());
        for (key, values) in a.agent().table().iter() {
            assert_eq!(b.agent().table().get(*key), Some(values));
        }
    }

    #[test]
    fn test_run_tick_without_learning_leaves_values() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 5);
        let mut agent = QLearningAgent::seeded(&AgentConfig::default(), 5);
        let key = encode(engine.state());

        let policy = TickPolicy {
            learn: false,
            explore: false,
        };
        run_tick(&mut engine, &mut agent, policy).unwrap();

        assert_eq!(agent.q_values(key), [0.0; 4]);
        assert_eq!(engine.state().steps, 1);
    }

    #[test]
    fn test_run_tick_on_finished_episode_fails() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 5);
        let mut agent = QLearningAgent::seeded(&AgentConfig::default(), 5);

        while !run_tick(&mut engine, &mut agent, TickPolicy::TRAIN).unwrap().done {}

        assert_eq!(
            run_tick(&mut engine, &mut agent, TickPolicy::TRAIN),
            Err(GameError::InvalidState)
        );
    }
}
