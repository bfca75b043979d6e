//! Training statistics tracking for the Q-learning driver
//!
//! Rolling windows of per-episode reward, length and score, plus lifetime
//! totals, the best score so far and the latest exploration rate.

use std::collections::VecDeque;

/// Training statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use q_snake::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
/// stats.record_episode(15.5, 150, 5);
/// stats.record_exploration(0.42, 37);
///
/// assert_eq!(stats.high_score(), 5);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f64>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Episode scores (food eaten) (rolling window)
    episode_scores: VecDeque<u32>,

    /// Total number of episodes completed
    total_episodes: usize,

    /// Total number of environment steps taken
    total_steps: usize,

    /// Best score of any episode
    high_score: u32,

    /// Most recent exploration rate reported by the driver
    epsilon: f64,

    /// Number of distinct states in the agent's table
    states_seen: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// Create a new tracker keeping the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            high_score: 0,
            epsilon: 0.0,
            states_seen: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    ///
    /// # Arguments
    ///
    /// * `reward` - Total reward accumulated during the episode
    /// * `length` - Number of steps taken in the episode
    /// * `score` - Final score (food eaten)
    pub fn record_episode(&mut self, reward: f64, length: usize, score: u32) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        self.high_score = self.high_score.max(score);
    }

    /// Record the agent's current exploration rate and table size
    pub fn record_exploration(&mut self, epsilon: f64, states_seen: usize) {
        self.epsilon = epsilon;
        self.states_seen = states_seen;
    }

    /// Mean episode reward over the rolling window, 0.0 when empty
    pub fn mean_episode_reward(&self) -> f64 {
        if self.episode_rewards.is_empty() {
            0.0
        } else {
            self.episode_rewards.iter().sum::<f64>() / self.episode_rewards.len() as f64
        }
    }

    /// Mean episode length over the rolling window
    pub fn mean_episode_length(&self) -> f64 {
        let sum: usize = self.episode_lengths.iter().sum();
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            sum as f64 / self.episode_lengths.len() as f64
        }
    }

    /// Mean episode score over the rolling window
    pub fn mean_episode_score(&self) -> f64 {
        let sum: u32 = self.episode_scores.iter().sum();
        if self.episode_scores.is_empty() {
            0.0
        } else {
            f64::from(sum) / self.episode_scores.len() as f64
        }
    }

    /// Score of the most recent episode
    pub fn last_score(&self) -> Option<u32> {
        self.episode_scores.back().copied()
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn states_seen(&self) -> usize {
        self.states_seen
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Format a one-line summary of the current statistics
    ///
    /// ```text
    /// Episodes: 1 | Steps: 150 | Reward: 15.50 | Score: 5.00 | Len: 150.0 | High: 5 | Eps: 0.4200 | States: 37
    /// ```
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Score: {:.2} | Len: {:.1} | High: {} | Eps: {:.4} | States: {}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_reward(),
            self.mean_episode_score(),
            self.mean_episode_length(),
            self.high_score,
            self.epsilon,
            self.states_seen,
        )
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
