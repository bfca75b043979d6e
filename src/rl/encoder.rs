use std::fmt;

use crate::game::GameState;

/// Compact 7-bit abstraction of a game state
///
/// Bit order, most significant first:
/// `[danger_straight, danger_right, danger_left, food_left, food_right, food_up, food_down]`.
/// Many game states share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(u8);

impl StateKey {
    /// Number of binary features in a key
    pub const BITS: usize = 7;

    /// Build a key from its features in canonical order
    pub fn from_bits(bits: [bool; Self::BITS]) -> Self {
        let value = bits
            .iter()
            .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit));
        Self(value)
    }

    /// The features in canonical order
    pub fn bits(self) -> [bool; Self::BITS] {
        let mut bits = [false; Self::BITS];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = (self.0 >> (Self::BITS - 1 - i)) & 1 == 1;
        }
        bits
    }

    pub fn as_u8(self) -> u8 {
        self.0
    }

    pub fn danger_straight(self) -> bool {
        self.bits()[0]
    }

    pub fn danger_right(self) -> bool {
        self.bits()[1]
    }

    pub fn danger_left(self) -> bool {
        self.bits()[2]
    }
}

/// Renders as seven `0`/`1` digits, e.g. `1000100`
impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Encode a game state into its [`StateKey`]
///
/// Danger is judged for the cells straight ahead, after a right turn and after
/// a left turn, relative to the current direction. Food bits compare the food
/// position with the head on each axis independently.
pub fn encode(state: &GameState) -> StateKey {
    let head = state.snake.head();
    let food = state.food;
    let direction = state.direction;

    let danger_straight = state.is_danger(head.moved_in_direction(direction));
    let danger_right = state.is_danger(head.moved_in_direction(direction.turn_right()));
    let danger_left = state.is_danger(head.moved_in_direction(direction.turn_left()));

    StateKey::from_bits([
        danger_straight,
        danger_right,
        danger_left,
        food.x < head.x,
        food.x > head.x,
        food.y < head.y,
        food.y > head.y,
    ])
}
