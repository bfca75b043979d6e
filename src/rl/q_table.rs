use std::collections::HashMap;

use super::encoder::StateKey;
use crate::game::Direction;

/// Action-value estimates for one state, indexed by [`Direction::index`]
pub type QValues = [f64; Direction::COUNT];

/// Lazily populated table of action values
///
/// Rows are created as zeros on first access through [`QTable::get_or_insert`]
/// and are never removed.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    rows: HashMap<StateKey, QValues>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row for `key`, inserting a zero row if it has never been seen
    pub fn get_or_insert(&mut self, key: StateKey) -> &mut QValues {
        self.rows.entry(key).or_insert([0.0; Direction::COUNT])
    }

    /// Row for `key` without creating it
    pub fn get(&self, key: StateKey) -> Option<&QValues> {
        self.rows.get(&key)
    }

    /// Number of distinct states seen so far
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &QValues)> {
        self.rows.iter()
    }
}

/// Largest value in a row
pub fn max_value(values: &QValues) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
