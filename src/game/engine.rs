use super::{
    action::Direction,
    config::GameConfig,
    error::GameError,
    state::{CollisionType, GameState, Position, Snake},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether the starvation guard ended the episode
    pub starved: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for RL training)
    pub reward: f64,
    /// Whether the episode has terminated
    pub done: bool,
    /// Score after this step
    pub score: u32,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
///
/// The engine owns the episode state and the random generator used for food
/// placement. Seeding the generator makes every episode reproducible.
pub struct GameEngine<R = ChaCha8Rng> {
    config: GameConfig,
    state: GameState,
    rng: R,
}

impl GameEngine<ChaCha8Rng> {
    /// Create an engine whose food placement is driven by a seeded ChaCha8 stream
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create a new game engine with a freshly reset episode
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let state = initial_state(&config, &mut rng);
        Self { config, state, rng }
    }

    /// Create an engine around an existing episode state
    ///
    /// The grid dimensions of `state` are taken from `config`.
    pub fn with_state(config: GameConfig, mut state: GameState, rng: R) -> Self {
        state.grid_width = config.grid_width;
        state.grid_height = config.grid_height;
        Self { config, state, rng }
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> &GameState {
        self.state = initial_state(&self.config, &mut self.rng);
        &self.state
    }

    /// Read-only view of the current episode
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Step using a raw action index (0=Up, 1=Right, 2=Down, 3=Left)
    pub fn step_index(&mut self, index: usize) -> Result<StepResult, GameError> {
        let action = Direction::try_from(index)?;
        self.step(action)
    }

    /// Execute one tick of the game
    ///
    /// A 180-degree reversal is replaced by the current direction. Stepping a
    /// finished episode fails with [`GameError::InvalidState`].
    pub fn step(&mut self, action: Direction) -> Result<StepResult, GameError> {
        if self.state.done {
            return Err(GameError::InvalidState);
        }

        let state = &mut self.state;
        state.steps += 1;

        if !state.direction.is_opposite(action) {
            state.direction = action;
        }

        let new_head = state.snake.head().moved_in_direction(state.direction);

        if let Some(collision_type) = check_collision(state, new_head) {
            state.done = true;

            return Ok(StepResult {
                reward: self.config.death_penalty,
                done: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                    starved: false,
                },
            });
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);

        let mut reward = self.config.step_penalty;

        if ate_food {
            state.score += 1;
            reward = self.config.food_reward;

            match spawn_food(&self.config, &state.snake, &mut self.rng) {
                Some(food) => state.food = food,
                // Board is full: nowhere left to place food
                None => state.done = true,
            }
        }

        // Evaluated last so it overrides a same-tick food reward
        let limit = u64::from(self.config.starvation_factor) * (state.snake.len() as u64 + 1);
        let starved = u64::from(state.steps) > limit;
        if starved {
            state.done = true;
            reward = self.config.death_penalty;
        }

        Ok(StepResult {
            reward,
            done: state.done,
            score: state.score,
            info: StepInfo {
                ate_food,
                collision_type: None,
                starved,
            },
        })
    }
}

fn initial_state<R: Rng>(config: &GameConfig, rng: &mut R) -> GameState {
    let snake = Snake::new(config.start_position());

    // A length-1 snake leaves at least one free cell on any valid grid
    let food = spawn_food(config, &snake, rng).unwrap_or_else(|| snake.head());

    GameState::new(
        snake,
        food,
        Direction::Right,
        config.grid_width,
        config.grid_height,
    )
}

/// Check if the new head position causes a collision
fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
    if !state.is_in_bounds(pos) {
        return Some(CollisionType::Wall);
    }

    if state.snake.contains(pos) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

/// Spawn food uniformly over the free cells by rejection sampling
///
/// Returns `None` when the snake covers the whole grid.
fn spawn_food<R: Rng>(config: &GameConfig, snake: &Snake, rng: &mut R) -> Option<Position> {
    if snake.len() >= config.cell_count() {
        return None;
    }

    loop {
        let x = rng.gen_range(0..config.grid_width) as i32;
        let y = rng.gen_range(0..config.grid_height) as i32;
        let pos = Position::new(x, y);

        if !snake.contains(pos) {
            return Some(pos);
        }
    }
}
