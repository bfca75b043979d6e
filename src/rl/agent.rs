//! Tabular Q-learning agent
//!
//! One-step Q-learning over [`StateKey`]s with epsilon-greedy action selection.
//! Ties between equally valued actions are broken uniformly at random, so an
//! untrained agent does not always pick `Up`.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::AgentConfig;
use super::encoder::StateKey;
use super::q_table::{max_value, QTable, QValues};
use crate::game::Direction;

/// Epsilon-greedy tabular Q-learning agent
///
/// `epsilon`, `alpha` and `gamma` are plain fields; decay schedules belong to
/// whoever drives training.
pub struct QLearningAgent<R = ChaCha8Rng> {
    /// Exploration rate
    pub epsilon: f64,
    /// Learning rate
    pub alpha: f64,
    /// Discount factor
    pub gamma: f64,
    table: QTable,
    rng: R,
}

impl QLearningAgent<ChaCha8Rng> {
    /// Create an agent whose exploration and tie-breaks use a seeded ChaCha8 stream
    pub fn seeded(config: &AgentConfig, seed: u64) -> Self {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> QLearningAgent<R> {
    pub fn new(config: &AgentConfig, rng: R) -> Self {
        Self {
            epsilon: config.epsilon,
            alpha: config.alpha,
            gamma: config.gamma,
            table: QTable::new(),
            rng,
        }
    }

    /// Action values for `key`, zero-initialised on first access
    pub fn q_values(&mut self, key: StateKey) -> QValues {
        *self.table.get_or_insert(key)
    }

    /// Epsilon-greedy action selection
    pub fn choose_action(&mut self, key: StateKey) -> Direction {
        if self.rng.gen::<f64>() < self.epsilon {
            Direction::ALL[self.rng.gen_range(0..Direction::COUNT)]
        } else {
            self.greedy_action(key)
        }
    }

    /// A best-valued action for `key`, chosen uniformly among ties
    pub fn greedy_action(&mut self, key: StateKey) -> Direction {
        let values = self.q_values(key);
        let best = max_value(&values);

        let candidates: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|dir| values[dir.index()] == best)
            .collect();

        // A row always has a maximum, so candidates is never empty
        candidates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Direction::Up)
    }

    /// One-step Q-learning update
    ///
    /// `Q(s,a) += alpha * (reward + gamma * max Q(s') - Q(s,a))`, where the
    /// bootstrap term is zero when `done`.
    pub fn learn(
        &mut self,
        state: StateKey,
        action: Direction,
        reward: f64,
        next_state: StateKey,
        done: bool,
    ) {
        let current = self.q_values(state)[action.index()];
        let next_max = if done {
            0.0
        } else {
            max_value(&self.q_values(next_state))
        };

        let updated = current + self.alpha * (reward + self.gamma * next_max - current);
        self.table.get_or_insert(state)[action.index()] = updated;
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Number of distinct state keys visited
    pub fn states_seen(&self) -> usize {
        self.table.len()
    }
}
