pub mod human;
pub mod terminal;
pub mod train;
pub mod watch;

pub use human::HumanMode;
pub use train::{run_tick, EpisodeSummary, TickPolicy, TrainConfig, TrainMode};
pub use watch::{PlaybackSpeed, WatchConfig, WatchMode};
