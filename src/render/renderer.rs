use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::grid::CELLS_PER_SIDE;
use crate::game::{GameVariant, Scoring, SessionSnapshot, SessionState, Tint};
use crate::metrics::GameMetrics;

/// What occupies one board cell in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Food,
    Head(Tint),
    Body(Tint),
}

/// Rasterise a snapshot into rows of cells. Hidden snakes are left out so
/// the end sequence flashes; the food stays visible.
pub fn board_cells(snapshot: &SessionSnapshot) -> Vec<Vec<CellKind>> {
    let mut cells = vec![vec![CellKind::Empty; CELLS_PER_SIDE]; CELLS_PER_SIDE];

    let (food_col, food_row) = snapshot.food.cell_index();
    if let Some(cell) = cells.get_mut(food_row).and_then(|row| row.get_mut(food_col)) {
        *cell = CellKind::Food;
    }

    if snapshot.snakes_hidden {
        return cells;
    }

    for snake in &snapshot.snakes {
        let head = snake.head();
        for segment in &snake.segments {
            let (col, row) = segment.cell_index();
            if let Some(cell) = cells.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = if Some(*segment) == head {
                    CellKind::Head(snake.tint)
                } else {
                    CellKind::Body(snake.tint)
                };
            }
        }
    }

    cells
}

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Green => Color::Green,
        Tint::Purple => Color::Magenta,
        Tint::Blue => Color::Blue,
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Mode-selection screen: single-player modes left, two-player right
    pub fn render_menu(&self, frame: &mut Frame, selected: usize, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Options
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let title = Paragraph::new(Line::from(Span::styled(
            "Game Options (Select)",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let column_specs = [
            (Scoring::Solo, "Single-Player (Arrow Keys)", columns[0]),
            (Scoring::Versus, "Two-Player (WASD)", columns[1]),
        ];

        for (scoring, header, area) in column_specs {
            let mut lines = vec![Line::from("")];
            for (index, variant) in GameVariant::ALL.iter().enumerate() {
                if variant.scoring != scoring {
                    continue;
                }
                let style = if index == selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                lines.push(Line::from(Span::styled(
                    format!(" {}. {} ", index + 1, variant.title),
                    style,
                )));
                lines.push(Line::from(Span::styled(
                    format!("best: {}", metrics.best_score(variant.kind)),
                    Style::default().fg(Color::DarkGray),
                )));
                lines.push(Line::from(""));
            }

            let column = Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(format!(" {} ", header)),
            );
            frame.render_widget(column, area);
        }

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("1-4", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("↑↓ + Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" to start | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[2]);
    }

    /// Board, header and, once the round has ended, the game-over panel
    pub fn render_session(
        &self,
        frame: &mut Frame,
        snapshot: &SessionSnapshot,
        results: Option<&[String]>,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        let board_width = (CELLS_PER_SIDE * 2 + 2) as u16;
        let board_height = (CELLS_PER_SIDE + 2) as u16;
        let board_area = centered(chunks[1], board_width, board_height);
        frame.render_widget(self.render_board(snapshot), board_area);

        if let Some(results) = results {
            let panel_area = centered(board_area, 30, (results.len() + 5) as u16);
            frame.render_widget(Clear, panel_area);
            frame.render_widget(self.render_game_over(results), panel_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_board(&self, snapshot: &SessionSnapshot) -> Paragraph<'_> {
        let lines: Vec<Line> = board_cells(snapshot)
            .into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|cell| match cell {
                            CellKind::Head(tint) => Span::styled(
                                "■ ",
                                Style::default()
                                    .fg(tint_color(tint))
                                    .add_modifier(Modifier::BOLD),
                            ),
                            CellKind::Body(tint) => {
                                Span::styled("□ ", Style::default().fg(tint_color(tint)))
                            }
                            CellKind::Food => Span::styled(
                                "● ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            ),
                            CellKind::Empty => {
                                Span::styled(". ", Style::default().fg(Color::DarkGray))
                            }
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", snapshot.title)),
        )
    }

    fn render_stats(&self, snapshot: &SessionSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let hint = match snapshot.state {
            SessionState::Paused => Span::styled(
                "PAUSED - press Space to resume",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            SessionState::Running => {
                Span::styled("Press Space to pause", Style::default().fg(Color::Gray))
            }
            _ => Span::raw(""),
        };

        let mut spans = vec![hint, Span::raw("    ")];
        for snake in &snapshot.snakes {
            spans.push(Span::styled(
                format!("■ {} ", snake.len()),
                Style::default().fg(tint_color(snake.tint)),
            ));
        }
        spans.push(Span::raw("   "));
        spans.push(Span::styled("Time: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            metrics.format_time(),
            Style::default().fg(Color::White),
        ));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, results: &[String]) -> Paragraph<'_> {
        let mut text: Vec<Line> = results
            .iter()
            .map(|line| {
                Line::from(Span::styled(
                    line.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled(
                "[M] MENU",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                "[R] RESTART",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        text.push(Line::from(Span::styled(
            "Press 'R' to restart",
            Style::default().fg(Color::Gray),
        )));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" player 1 | "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" player 2 | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
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

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
