//! Terminal rendering of the game grid and status lines

pub mod renderer;

pub use renderer::{Renderer, WatchStatus};
