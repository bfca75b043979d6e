//! Q Snake - A Snake game with a tabular Q-learning agent
//!
//! This library provides:
//! - Core game logic (game module)
//! - State encoding and the Q-learning agent (rl module)
//! - Training statistics (metrics module)
//! - TUI rendering and keyboard input (render, input modules)
//! - Execution modes: headless training, watching the agent, human play (modes module)

pub mod config;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
