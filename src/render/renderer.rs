use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::collections::HashSet;
use std::time::Instant;

use crate::game::{Game, Position};
use crate::metrics::SessionStats;
use crate::metrics::session::format_round_time;

/// What occupies a grid cell, for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    PrimaryHead,
    PrimaryBody,
    SecondaryHead,
    SecondaryBody,
    Food,
    Empty,
}

/// Read-only view of the bodies, built once per frame
struct Occupancy {
    primary_head: Position,
    primary: HashSet<Position>,
    secondary_head: Option<Position>,
    secondary: HashSet<Position>,
    food: Position,
}

impl Occupancy {
    fn of(game: &Game) -> Self {
        Self {
            primary_head: game.primary().head(),
            primary: game.primary().body().collect(),
            secondary_head: game.secondary().map(|s| s.head()),
            secondary: game
                .secondary()
                .map(|s| s.body().collect())
                .unwrap_or_default(),
            food: game.food().position(),
        }
    }

    fn kind(&self, pos: Position) -> CellKind {
        if pos == self.primary_head {
            CellKind::PrimaryHead
        } else if Some(pos) == self.secondary_head {
            CellKind::SecondaryHead
        } else if self.primary.contains(&pos) {
            CellKind::PrimaryBody
        } else if self.secondary.contains(&pos) {
            CellKind::SecondaryBody
        } else if pos == self.food {
            CellKind::Food
        } else {
            CellKind::Empty
        }
    }
}

/// Classify a single cell of the playing field
pub fn cell_kind(game: &Game, pos: Position) -> CellKind {
    Occupancy::of(game).kind(pos)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        game: &Game,
        stats: &SessionStats,
        now: Instant,
        show_grid: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(game, stats, now), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if game.is_running() {
            frame.render_widget(self.render_grid(game, show_grid), game_area);
        } else {
            frame.render_widget(self.render_game_over(stats), game_area);
        }

        frame.render_widget(self.render_controls(game), chunks[2]);
    }

    fn render_grid(&self, game: &Game, show_grid: bool) -> Paragraph<'_> {
        let occupancy = Occupancy::of(game);
        let size = game.grid().size() as i32;
        let empty = if show_grid { ". " } else { "  " };

        let lines: Vec<Line> = (0..size)
            .map(|y| {
                let spans: Vec<Span> = (0..size)
                    .map(|x| match occupancy.kind(Position::new(x, y)) {
                        CellKind::PrimaryHead => Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        ),
                        CellKind::PrimaryBody => {
                            Span::styled("□ ", Style::default().fg(Color::White))
                        }
                        CellKind::SecondaryHead => Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Blue)
                                .add_modifier(Modifier::BOLD),
                        ),
                        CellKind::SecondaryBody => {
                            Span::styled("□ ", Style::default().fg(Color::Blue))
                        }
                        CellKind::Food => Span::styled(
                            "O ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        CellKind::Empty => Span::styled(empty, Style::default().fg(Color::DarkGray)),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake Game "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, game: &Game, stats: &SessionStats, now: Instant) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                game.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(stats.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format_round_time(stats.round_time(now)),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, stats: &SessionStats) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    stats.last_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "any key",
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

    fn render_controls(&self, game: &Game) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::White)),
            Span::raw(" move"),
        ];
        if game.secondary().is_some() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("WASD", Style::default().fg(Color::Blue)));
            spans.push(Span::raw(" second snake"));
        }
        spans.extend([
            Span::raw(" | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" grid | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn seeded() -> Game {
        Game::new(GameConfig {
            seed: Some(3),
            ..Default::default()
        })
    }

    fn screen_text(game: &Game, stats: &SessionStats, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, game, stats, now, true))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_cell_kinds() {
        let game = seeded();

        assert_eq!(cell_kind(&game, Position::new(6, 9)), CellKind::PrimaryHead);
        assert_eq!(cell_kind(&game, Position::new(4, 9)), CellKind::PrimaryBody);
        assert_eq!(cell_kind(&game, game.food().position()), CellKind::Food);
    }

    #[test]
    fn test_running_screen_shows_title_and_score() {
        let now = Instant::now();
        let text = screen_text(&seeded(), &SessionStats::new(now), now);
        assert!(text.contains("Snake Game"));
        assert!(text.contains("Score:"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_screen() {
        let mut game = seeded();
        // Drive the snake right into the wall
        while game.is_running() {
            game.tick();
        }

        let start = Instant::now();
        let mut stats = SessionStats::new(start);
        stats.end_round(4, start + Duration::from_secs(75));

        // Long after the crash the clock still shows the round length
        let text = screen_text(&game, &stats, start + Duration::from_secs(600));
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("any key"));
        assert!(text.contains("01:15"));
    }
}
