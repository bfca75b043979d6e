use std::time::{Duration, Instant};

/// Session counters shown in the TUI header
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub episodes: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            episodes: 0,
        }
    }

    /// Refresh the elapsed time of the current episode
    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_episode_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_episode_end(&mut self, final_score: u32) {
        self.episodes += 1;
        self.high_score = self.high_score.max(final_score);
    }

    /// Elapsed time as `MM:SS`
    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_episode_end(10);
        metrics.on_episode_end(5);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.episodes, 2);

        metrics.on_episode_end(15);
        assert_eq!(metrics.high_score, 15);
    }

    #[test]
    fn test_episode_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(30);

        metrics.on_episode_start();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
        assert_eq!(metrics.format_time(), "00:00");
    }
}
