//! File-based configuration for the `q_snake` binary
//!
//! A JSON document with optional `game`, `agent` and `schedule` sections plus
//! run settings. Missing fields fall back to their defaults.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "episodes": 2000,
//!   "game": { "grid_width": 15, "grid_height": 15 },
//!   "agent": { "alpha": 0.2 },
//!   "schedule": { "decay": 0.99 }
//! }
//! ```

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::game::GameConfig;
use crate::modes::{PlaybackSpeed, TrainConfig, WatchConfig};
use crate::rl::{AgentConfig, EpsilonSchedule};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    pub episodes: usize,
    pub log_frequency: usize,
    pub warmup_episodes: usize,
    /// Watch-mode tick interval in milliseconds
    pub tick_ms: u64,
    pub game: GameConfig,
    pub agent: AgentConfig,
    pub schedule: EpsilonSchedule,
}

impl Default for AppConfig {
    fn default() -> Self {
        let train = TrainConfig::default();
        Self {
            seed: train.seed,
            episodes: train.num_episodes,
            log_frequency: train.log_frequency,
            warmup_episodes: 0,
            tick_ms: PlaybackSpeed::Normal.tick_interval().as_millis() as u64,
            game: train.game,
            agent: train.agent,
            schedule: train.schedule,
        }
    }
}

impl AppConfig {
    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse config JSON")
    }

    pub fn validate(&self) -> Result<()> {
        self.train_config().validate().map_err(|e| anyhow!(e))
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            num_episodes: self.episodes,
            log_frequency: self.log_frequency,
            seed: self.seed,
            game: self.game.clone(),
            agent: self.agent.clone(),
            schedule: self.schedule.clone(),
        }
    }

    pub fn watch_config(&self) -> WatchConfig {
        WatchConfig {
            train: self.train_config(),
            warmup_episodes: self.warmup_episodes,
            speed: PlaybackSpeed::from_millis(self.tick_ms),
        }
    }
}
