//! Drives the simulate→observe→learn loop through the public API only

use q_snake::game::{GameConfig, GameEngine, GameError};
use q_snake::rl::{encode, AgentConfig, EpsilonSchedule, QLearningAgent};

struct RunSummary {
    scores: Vec<u32>,
    steps: Vec<u32>,
    states_seen: usize,
    final_epsilon: f64,
}

fn self_play(seed: u64, episodes: usize) -> RunSummary {
    let mut engine = GameEngine::seeded(GameConfig::default(), seed);
    let mut agent = QLearningAgent::seeded(&AgentConfig::default(), seed + 1);
    let schedule = EpsilonSchedule::default();

    let mut scores = Vec::with_capacity(episodes);
    let mut steps = Vec::with_capacity(episodes);

    for _ in 0..episodes {
        engine.reset();

        loop {
            let key = encode(engine.state());
            let action = agent.choose_action(key);
            let result = engine.step(action).unwrap();
            let next_key = encode(engine.state());
            agent.learn(key, action, result.reward, next_key, result.done);

            let state = engine.state();
            assert_eq!(state.snake.len() as u32, state.score + 1);
            assert!(
                result.reward == 10.0 || result.reward == -0.1 || result.reward == -10.0,
                "unexpected reward {}",
                result.reward
            );

            if result.done {
                assert_eq!(result.reward, -10.0);
                assert_eq!(engine.step(action), Err(GameError::InvalidState));
                break;
            }

            assert!(!state.snake.contains(state.food));
        }

        scores.push(engine.state().score);
        steps.push(engine.state().steps);
        agent.epsilon = schedule.apply(agent.epsilon);
    }

    RunSummary {
        scores,
        steps,
        states_seen: agent.states_seen(),
        final_epsilon: agent.epsilon,
    }
}

#[test]
fn test_self_play_invariants_hold() {
    let run = self_play(2024, 150);

    assert_eq!(run.scores.len(), 150);
    assert!(run.states_seen > 1);
    // 7 binary features bound the key space
    assert!(run.states_seen <= 128);
}

#[test]
fn test_episode_length_is_capped_by_starvation() {
    let run = self_play(8, 100);

    for (score, steps) in run.scores.iter().zip(&run.steps) {
        // Starvation triggers on the first tick past 100 * (len + 1)
        assert!(*steps <= 100 * (score + 2) + 1);
    }
}

#[test]
fn test_seeded_runs_are_identical() {
    let a = self_play(77, 60);
    let b = self_play(77, 60);

    assert_eq!(a.scores, b.scores);
    assert_eq!(a.steps, b.steps);
    assert_eq!(a.states_seen, b.states_seen);
    assert_eq!(a.final_epsilon, b.final_epsilon);
}

#[test]
fn test_epsilon_follows_driver_schedule() {
    let run = self_play(1, 10);
    assert!((run.final_epsilon - 0.995f64.powi(10)).abs() < 1e-12);
}
