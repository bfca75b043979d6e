use thiserror::Error;

/// Caller errors reported by the game engine
///
/// Both variants are programming errors at the call site; the engine never
/// retries or recovers internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// Action index outside 0..=3
    #[error("invalid action index {0}, expected 0..=3")]
    InvalidAction(usize),

    /// `step` called after the episode ended
    #[error("episode is over, call reset() before stepping again")]
    InvalidState,
}
