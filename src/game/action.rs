use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Direction the snake can move, doubling as the agent's action space
///
/// Discriminants are the action indices 0..=3, in clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// All directions in action-index order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Number of distinct actions
    pub const COUNT: usize = 4;

    /// Action index of this direction (0..=3)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn opposite(self) -> Direction {
        Self::ALL[(self.index() + 2) % Self::COUNT]
    }

    /// Heading after a 90-degree clockwise turn
    pub fn turn_right(self) -> Direction {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    /// Heading after a 90-degree counter-clockwise turn
    pub fn turn_left(self) -> Direction {
        Self::ALL[(self.index() + 3) % Self::COUNT]
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

impl TryFrom<usize> for Direction {
    type Error = GameError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(GameError::InvalidAction(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_rotation_order() {
        assert_eq!(Direction::Up.turn_right(), Direction::Right);
        assert_eq!(Direction::Right.turn_right(), Direction::Down);
        assert_eq!(Direction::Down.turn_right(), Direction::Left);
        assert_eq!(Direction::Left.turn_right(), Direction::Up);

        assert_eq!(Direction::Up.turn_left(), Direction::Left);
        assert_eq!(Direction::Left.turn_left(), Direction::Down);

        for dir in Direction::ALL {
            assert_eq!(dir.turn_right().turn_left(), dir);
        }
    }

    #[test]
    fn test_index_round_trip() {
        assert_eq!(Direction::Up.index(), 0);
        assert_eq!(Direction::Right.index(), 1);
        assert_eq!(Direction::Down.index(), 2);
        assert_eq!(Direction::Left.index(), 3);
        assert_eq!(Direction::try_from(2), Ok(Direction::Down));
    }

    #[test]
    fn test_invalid_index() {
        assert_eq!(Direction::try_from(4), Err(GameError::InvalidAction(4)));
        assert_eq!(
            Direction::try_from(usize::MAX),
            Err(GameError::InvalidAction(usize::MAX))
        );
    }
}
