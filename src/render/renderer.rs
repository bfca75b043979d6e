use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameState, Position};
use crate::metrics::GameMetrics;

/// Agent-side status shown above the grid in watch mode
#[derive(Debug, Clone, PartialEq)]
pub struct WatchStatus {
    pub episode: u32,
    pub high_score: u32,
    pub epsilon: f64,
    pub states_seen: usize,
    pub speed: &'static str,
    pub paused: bool,
    pub learning: bool,
    pub exploring: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Human play: score, steps and elapsed time
    pub fn render_human(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let header = Line::from(vec![
            label("Score: "),
            value_bold(state.score.to_string()),
            Span::raw("    "),
            label("Steps: "),
            value(state.steps.to_string()),
            Span::raw("    "),
            label("High: "),
            value(metrics.high_score.to_string()),
            Span::raw("    "),
            label("Time: "),
            value(metrics.format_time()),
        ]);

        let controls = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        self.render_layout(frame, state, vec![header], controls, " Snake ");
    }

    /// Agent playback: episode counters, exploration rate and playback state
    pub fn render_watch(&self, frame: &mut Frame, state: &GameState, status: &WatchStatus) {
        let counters = Line::from(vec![
            label("Episode: "),
            value_bold(status.episode.to_string()),
            Span::raw("    "),
            label("Score: "),
            value_bold(state.score.to_string()),
            Span::raw("    "),
            label("High: "),
            value(status.high_score.to_string()),
            Span::raw("    "),
            label("Epsilon: "),
            value(format!("{:.4}", status.epsilon)),
            Span::raw("    "),
            label("States: "),
            value(status.states_seen.to_string()),
        ]);

        let playback = Line::from(vec![
            label("Speed: "),
            value(status.speed.to_string()),
            Span::raw("    "),
            flag("PAUSED", status.paused, Color::Red),
            Span::raw("  "),
            flag("LEARNING", status.learning, Color::Green),
            Span::raw("  "),
            flag("EXPLORING", status.exploring, Color::Magenta),
        ]);

        let controls = Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("1-4", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("L", Style::default().fg(Color::Cyan)),
            Span::raw(" learning | "),
            Span::styled("E", Style::default().fg(Color::Cyan)),
            Span::raw(" exploration | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]);

        self.render_layout(frame, state, vec![counters, playback], controls, " Q-Learning Snake ");
    }

    fn render_layout(
        &self,
        frame: &mut Frame,
        state: &GameState,
        header: Vec<Line<'static>>,
        controls: Line<'static>,
        title: &'static str,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header.len() as u16 + 1), // Header
                Constraint::Min(0),                          // Game area
                Constraint::Length(3),                       // Footer
            ])
            .split(frame.area());

        frame.render_widget(Paragraph::new(header).alignment(Alignment::Center), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.is_alive() {
            frame.render_widget(self.render_grid(state, title), game_area);
        } else {
            frame.render_widget(self.render_game_over(state), game_area);
        }

        frame.render_widget(Paragraph::new(controls).alignment(Alignment::Center), chunks[2]);
    }

    fn render_grid(&self, state: &GameState, title: &'static str) -> Paragraph<'static> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let spans: Vec<Span<'static>> = (0..state.grid_width)
                .map(|x| {
                    let pos = Position::new(x as i32, y as i32);
                    if pos == head {
                        Span::styled(
                            "■ ",
                            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                        )
                    } else if state.snake.contains(pos) {
                        Span::styled("□ ", Style::default().fg(Color::Green))
                    } else if pos == state.food {
                        Span::styled(
                            "O ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled(". ", Style::default().fg(Color::DarkGray))
                    }
                })
                .collect();

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![label("Final Score: "), value_bold(state.score.to_string())]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::Yellow))
}

fn value(text: String) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::White))
}

fn value_bold(text: String) -> Span<'static> {
    Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )
}

/// Indicator that is lit when `on` and dimmed otherwise
fn flag(text: &'static str, on: bool, color: Color) -> Span<'static> {
    if on {
        Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(text, Style::default().fg(Color::DarkGray))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn sample_state() -> GameState {
        GameState::new(
            Snake::straight(Position::new(3, 2), Direction::Right, 2),
            Position::new(0, 0),
            Direction::Right,
            5,
            5,
        )
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_watch_frame_shows_status() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let status = WatchStatus {
            episode: 12,
            high_score: 4,
            epsilon: 0.5,
            states_seen: 30,
            speed: "Fast",
            paused: true,
            learning: true,
            exploring: false,
        };

        terminal
            .draw(|frame| Renderer::new().render_watch(frame, &sample_state(), &status))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Episode: 12"));
        assert!(text.contains("Epsilon: 0.5000"));
        assert!(text.contains("PAUSED"));
        assert!(text.contains("■"));
        assert!(text.contains("O"));
    }

    #[test]
    fn test_human_game_over_panel() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut state = sample_state();
        state.done = true;
        state.score = 7;

        terminal
            .draw(|frame| Renderer::new().render_human(frame, &state, &GameMetrics::new()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 7"));
    }
}
