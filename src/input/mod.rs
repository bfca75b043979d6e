//! Keyboard input mapping for the terminal modes

pub mod handler;

pub use handler::{InputHandler, KeyAction};
