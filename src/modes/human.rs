use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;
use tracing::debug;

use super::terminal::{Tui, restore_terminal, setup_terminal};
use crate::game::{Direction, GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            engine: GameEngine::seeded(config, seed),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.run_game_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks at 8 Hz (125ms per tick)
        let mut tick_timer = interval(Duration::from_millis(125));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if self.engine.state().is_alive() {
                        self.update_game()?;
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render_human(frame, self.engine.state(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Move(dir) => self.pending_direction = Some(dir),
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                _ => {}
            }
        }
    }

    fn update_game(&mut self) -> Result<()> {
        let action = self
            .pending_direction
            .take()
            .unwrap_or(self.engine.state().direction);

        let result = self.engine.step(action)?;

        if result.done {
            self.metrics.on_episode_end(result.score);
            debug!(score = result.score, "game over");
        }

        Ok(())
    }

    fn reset_game(&mut self) {
        self.engine.reset();
        self.metrics.on_episode_start();
        self.pending_direction = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), 0);
        assert!(mode.engine.state().is_alive());
        assert_eq!(mode.engine.state().score, 0);
    }

    #[test]
    fn test_pending_direction_is_consumed() {
        let mut mode = HumanMode::new(GameConfig::default(), 0);
        mode.pending_direction = Some(Direction::Down);

        mode.update_game().unwrap();

        assert_eq!(mode.engine.state().direction, Direction::Down);
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_game_over_and_reset() {
        let mut mode = HumanMode::new(GameConfig::small(), 0);

        // Keep heading right until the wall ends the game
        while mode.engine.state().is_alive() {
            mode.update_game().unwrap();
        }
        assert_eq!(mode.metrics.episodes, 1);

        mode.reset_game();
        assert!(mode.engine.state().is_alive());
        assert_eq!(mode.engine.state().steps, 0);
    }
}
