use anyhow::Result;
use clap::{Parser, ValueEnum};
use q_snake::config::AppConfig;
use q_snake::modes::{HumanMode, TrainMode, WatchMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "q_snake")]
#[command(version, about = "Snake game with a tabular Q-learning agent")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "train")]
    mode: Mode,

    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Seed for food placement and agent exploration
    #[arg(long)]
    seed: Option<u64>,

    /// Number of training episodes (train mode)
    #[arg(long)]
    episodes: Option<usize>,

    /// Log progress every N episodes (train mode)
    #[arg(long)]
    log_frequency: Option<usize>,

    /// Initial exploration rate
    #[arg(long)]
    epsilon: Option<f64>,

    /// Learning rate
    #[arg(long)]
    alpha: Option<f64>,

    /// Discount factor
    #[arg(long)]
    gamma: Option<f64>,

    /// Per-episode epsilon decay factor
    #[arg(long)]
    epsilon_decay: Option<f64>,

    /// Floor for epsilon decay
    #[arg(long)]
    epsilon_min: Option<f64>,

    /// Headless training episodes before watching (watch mode)
    #[arg(long)]
    warmup_episodes: Option<usize>,

    /// Tick interval in milliseconds (watch mode)
    #[arg(long)]
    tick_ms: Option<u64>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Train the agent headlessly as fast as possible
    Train,
    /// Watch the agent play (and keep learning) in the terminal
    Watch,
    /// Play snake with keyboard controls
    Human,
}

impl Cli {
    fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(width) = self.width {
            config.game.grid_width = width;
        }
        if let Some(height) = self.height {
            config.game.grid_height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(episodes) = self.episodes {
            config.episodes = episodes;
        }
        if let Some(log_frequency) = self.log_frequency {
            config.log_frequency = log_frequency;
        }
        if let Some(epsilon) = self.epsilon {
            config.agent.epsilon = epsilon;
        }
        if let Some(alpha) = self.alpha {
            config.agent.alpha = alpha;
        }
        if let Some(gamma) = self.gamma {
            config.agent.gamma = gamma;
        }
        if let Some(decay) = self.epsilon_decay {
            config.schedule.decay = decay;
        }
        if let Some(min_epsilon) = self.epsilon_min {
            config.schedule.min_epsilon = min_epsilon;
        }
        if let Some(warmup) = self.warmup_episodes {
            config.warmup_episodes = warmup;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.app_config()?;

    match cli.mode {
        Mode::Train => {
            let mut train_mode = TrainMode::new(config.train_config());
            train_mode.run()?;
        }
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(config.watch_config())?;
            watch_mode.run().await?;
        }
        Mode::Human => {
            let mut human_mode = HumanMode::new(config.game.clone(), config.seed);
            human_mode.run().await?;
        }
    }

    Ok(())
}
