//! Watch mode: the agent plays in the terminal at a chosen pace
//!
//! The agent keeps learning while it is watched unless learning is switched
//! off. An optional headless warm-up trains it before the first frame.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Reset episode
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - L: Toggle learning
//! - E: Toggle exploration (off = always greedy)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use super::terminal::{Tui, restore_terminal, setup_terminal};
use super::train::{TickPolicy, TrainConfig, TrainMode, run_tick};
use crate::game::GameEngine;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::TrainingStats;
use crate::render::{Renderer, WatchStatus};
use crate::rl::QLearningAgent;

/// Playback speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSpeed {
    /// Slow: 2 Hz (500ms per step)
    Slow,
    /// Normal: 8 Hz (125ms per step), same as human mode
    Normal,
    /// Fast: 20 Hz (50ms per step)
    Fast,
    /// Very Fast: 60 Hz (16ms per step)
    VeryFast,
    /// Caller-chosen interval
    Custom(Duration),
}

impl PlaybackSpeed {
    /// Shortest interval the tick timer accepts
    const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Speed for an interval given in milliseconds
    pub fn from_millis(ms: u64) -> Self {
        match ms {
            500 => Self::Slow,
            125 => Self::Normal,
            50 => Self::Fast,
            16 => Self::VeryFast,
            _ => Self::Custom(Duration::from_millis(ms)),
        }
    }

    /// Get the tick interval for this speed
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
            Self::Custom(interval) => (*interval).max(Self::MIN_INTERVAL),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
            Self::Custom(_) => "Custom",
        }
    }
}

/// Configuration for watch mode
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Game, agent, schedule and seed shared with headless training
    pub train: TrainConfig,

    /// Episodes trained headlessly before the first frame
    pub warmup_episodes: usize,

    /// Initial playback speed
    pub speed: PlaybackSpeed,
}

impl WatchConfig {
    pub fn new(train: TrainConfig) -> Self {
        Self {
            train,
            warmup_episodes: 0,
            speed: PlaybackSpeed::Normal,
        }
    }
}

/// Watch mode for the Q-learning agent
pub struct WatchMode {
    engine: GameEngine,
    agent: QLearningAgent,
    stats: TrainingStats,
    config: WatchConfig,
    renderer: Renderer,
    input_handler: InputHandler,

    should_quit: bool,
    paused: bool,
    learning: bool,
    exploring: bool,
    speed: PlaybackSpeed,

    episode_reward: f64,
    episode_steps: usize,
}

impl WatchMode {
    /// Create the mode, running the configured warm-up first
    pub fn new(config: WatchConfig) -> Result<Self> {
        let mut warmup = TrainMode::new(TrainConfig {
            num_episodes: config.warmup_episodes,
            ..config.train.clone()
        });

        if config.warmup_episodes > 0 {
            info!("Warming up for {} episodes", config.warmup_episodes);
            warmup.run().context("Warm-up training failed")?;
        }

        let (mut engine, agent, stats) = warmup.into_parts();
        engine.reset();

        Ok(Self {
            engine,
            agent,
            stats,
            speed: config.speed,
            config,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            paused: false,
            learning: true,
            exploring: true,
            episode_reward: 0.0,
            episode_steps: 0,
        })
    }

    /// Run the watch loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.run_watch_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        info!("Watch session ended: {}", self.stats.format_summary());

        result
    }

    async fn run_watch_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.speed.tick_interval());

        // Render at 30 FPS
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if let Some(speed) = self.handle_event(event) {
                            tick_timer = interval(speed.tick_interval());
                        }
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.advance()?;
                    }
                }

                _ = render_timer.tick() => {
                    let status = self.status();
                    terminal.draw(|frame| {
                        self.renderer.render_watch(frame, self.engine.state(), &status);
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

    /// Returns the new speed when the tick interval has to change
    fn handle_event(&mut self, event: Event) -> Option<PlaybackSpeed> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = self.input_handler.handle_key_event(key);
                self.apply_key(action)
            }
            _ => None,
        }
    }

    fn apply_key(&mut self, action: KeyAction) -> Option<PlaybackSpeed> {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::TogglePause => self.paused = !self.paused,
            KeyAction::ToggleLearning => self.learning = !self.learning,
            KeyAction::ToggleExploration => self.exploring = !self.exploring,
            KeyAction::Restart => self.start_episode(),
            KeyAction::SetSpeed(speed) => {
                self.speed = speed;
                return Some(speed);
            }
            KeyAction::Move(_) | KeyAction::None => {}
        }
        None
    }

    /// One playback tick
    ///
    /// A finished episode stays on screen for one tick before the reset.
    fn advance(&mut self) -> Result<()> {
        if self.engine.state().done {
            self.start_episode();
            return Ok(());
        }

        let policy = TickPolicy {
            learn: self.learning,
            explore: self.exploring,
        };
        let result = run_tick(&mut self.engine, &mut self.agent, policy)?;
        self.episode_reward += result.reward;
        self.episode_steps += 1;

        if result.done {
            self.finish_episode(result.score);
        }

        Ok(())
    }

    fn finish_episode(&mut self, score: u32) {
        self.stats
            .record_episode(self.episode_reward, self.episode_steps, score);

        if self.learning {
            self.agent.epsilon = self.config.train.schedule.apply(self.agent.epsilon);
        }
        self.stats
            .record_exploration(self.agent.epsilon, self.agent.states_seen());

        debug!(
            episode = self.stats.total_episodes(),
            score,
            steps = self.episode_steps,
            epsilon = self.agent.epsilon,
            "watched episode finished"
        );
    }

    fn start_episode(&mut self) {
        self.engine.reset();
        self.episode_reward = 0.0;
        self.episode_steps = 0;
    }

    fn status(&self) -> WatchStatus {
        WatchStatus {
            episode: self.stats.total_episodes() as u32 + 1,
            high_score: self.stats.high_score(),
            epsilon: self.agent.epsilon,
            states_seen: self.agent.states_seen(),
            speed: self.speed.as_str(),
            paused: self.paused,
            learning: self.learning,
            exploring: self.exploring,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    fn watch_config(warmup: usize) -> WatchConfig {
        let mut train = TrainConfig::new(0);
        train.game = GameConfig::small();
        train.seed = 9;
        WatchConfig {
            warmup_episodes: warmup,
            ..WatchConfig::new(train)
        }
    }

    #[test]
    fn test_playback_speed() {
        assert_eq!(PlaybackSpeed::Slow.tick_interval(), Duration::from_millis(500));
        assert_eq!(PlaybackSpeed::Normal.tick_interval(), Duration::from_millis(125));
        assert_eq!(PlaybackSpeed::Fast.tick_interval(), Duration::from_millis(50));
        assert_eq!(PlaybackSpeed::VeryFast.tick_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_speed_from_millis() {
        assert_eq!(PlaybackSpeed::from_millis(50), PlaybackSpeed::Fast);
        assert_eq!(
            PlaybackSpeed::from_millis(80).tick_interval(),
            Duration::from_millis(80)
        );
        // A zero interval would stall the timer
        assert_eq!(
            PlaybackSpeed::from_millis(0).tick_interval(),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn test_watch_mode_creation() {
        let mode = WatchMode::new(watch_config(0)).unwrap();
        assert!(!mode.paused);
        assert!(mode.learning);
        assert!(mode.exploring);
        assert_eq!(mode.speed, PlaybackSpeed::Normal);
        assert_eq!(mode.status().episode, 1);
        assert!(!mode.engine.state().done);
    }

    #[test]
    fn test_warmup_trains_before_watching() {
        let mode = WatchMode::new(watch_config(20)).unwrap();
        assert_eq!(mode.stats.total_episodes(), 20);
        assert!(mode.agent.epsilon < 1.0);
        assert!(mode.agent.states_seen() > 0);
        assert_eq!(mode.engine.state().steps, 0);
    }

    #[test]
    fn test_key_toggles() {
        let mut mode = WatchMode::new(watch_config(0)).unwrap();

        assert_eq!(mode.apply_key(KeyAction::TogglePause), None);
        assert!(mode.paused);
        mode.apply_key(KeyAction::ToggleLearning);
        assert!(!mode.learning);
        mode.apply_key(KeyAction::ToggleExploration);
        assert!(!mode.exploring);

        assert_eq!(
            mode.apply_key(KeyAction::SetSpeed(PlaybackSpeed::Fast)),
            Some(PlaybackSpeed::Fast)
        );
        assert_eq!(mode.status().speed, "Fast");

        mode.apply_key(KeyAction::Quit);
        assert!(mode.should_quit);
    }

    #[test]
    fn test_advance_plays_through_episodes() {
        let mut mode = WatchMode::new(watch_config(0)).unwrap();

        // Starvation caps an episode on a 10x10 grid well below this
        for _ in 0..5_000 {
            mode.advance().unwrap();
        }

        assert!(mode.stats.total_episodes() >= 1);
        assert!(mode.agent.epsilon < 1.0);
    }

    #[test]
    fn test_no_decay_while_not_learning() {
        let mut mode = WatchMode::new(watch_config(0)).unwrap();
        mode.apply_key(KeyAction::ToggleLearning);

        while mode.stats.total_episodes() == 0 {
            mode.advance().unwrap();
        }

        assert_eq!(mode.agent.epsilon, 1.0);
    }
}
