use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameSnapshot, Position};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &GameSnapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if snapshot.is_game_over() {
            frame.render_widget(self.render_game_over(snapshot, metrics), game_area);
        } else {
            frame.render_widget(self.render_grid(snapshot), game_area);
        }

        let controls = self.render_controls(snapshot);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let head = snapshot.head();
        let body: HashSet<Position> = snapshot.snake.iter().copied().collect();
        let obstacles: HashSet<Position> = snapshot.obstacles.iter().copied().collect();
        let power_ups: HashSet<Position> = snapshot.power_ups.iter().copied().collect();

        let mut lines = Vec::with_capacity(snapshot.grid_height);

        for y in 0..snapshot.grid_height {
            let mut spans = Vec::with_capacity(snapshot.grid_width);

            for x in 0..snapshot.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if Some(pos) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if obstacles.contains(&pos) {
                    Span::styled(
                        "X ",
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if pos == snapshot.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if power_ups.contains(&pos) {
                    Span::styled("+ ", Style::default().fg(Color::Magenta))
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = if snapshot.is_paused() {
            " Snake - PAUSED "
        } else {
            " Snake "
        };
        let border_color = if snapshot.is_paused() {
            Color::Yellow
        } else {
            Color::White
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(snapshot.level.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", snapshot.tick_interval.as_millis()), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ];

        if snapshot.power_up_ticks_remaining > 0 {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                format!("Power: {}", snapshot.power_up_ticks_remaining),
                Style::default().fg(Color::Magenta),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let reason = snapshot
            .game_over_reason
            .map(|reason| reason.describe())
            .unwrap_or_default();

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![Span::styled(reason, Style::default().fg(Color::Gray))]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Level: ", Style::default().fg(Color::Yellow)),
                Span::styled(snapshot.level.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Session best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw(format!(" over {} games", metrics.games_played)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
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

    fn render_controls(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let pause_hint = if snapshot.is_paused() {
            " to resume | "
        } else {
            " to pause | "
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(pause_hint),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
