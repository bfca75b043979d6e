//! Reinforcement learning for the Snake game
//!
//! Provides:
//! - A 7-bit state abstraction of the game (danger + food direction)
//! - A lazily populated Q-table
//! - An epsilon-greedy tabular Q-learning agent
//! - Agent hyperparameters and the driver-side epsilon schedule

pub mod agent;
pub mod config;
pub mod encoder;
pub mod q_table;

pub use agent::QLearningAgent;
pub use config::{AgentConfig, EpsilonSchedule};
pub use encoder::{encode, StateKey};
pub use q_table::{QTable, QValues};
