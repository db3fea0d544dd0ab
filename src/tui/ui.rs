//! Stateless UI rendering.
//!
//! [`draw`] renders one frame from the app and reports where the clickable
//! parts ended up, so mouse clicks can be mapped back to views.

use super::app::{App, Focus};
use crate::view;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_timeline_core::{GameStatus, Player, Position, Square, Win};

const CELL_WIDTH: u16 = 9;
const CELL_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;

/// Screen areas of the clickable parts of a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hitboxes {
    /// Board cells in index order.
    pub cells: [Rect; 9],
    /// Visible move list entries with their storage index.
    pub moves: Vec<(usize, Rect)>,
    /// The ordering toggle line.
    pub toggle: Rect,
}

/// Renders the game and returns its hitboxes.
pub fn draw(frame: &mut Frame, app: &App) -> Hitboxes {
    let mut hitboxes = Hitboxes::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(BOARD_HEIGHT),
            Constraint::Length(3), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic-Tac-Toe Timeline")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BOARD_WIDTH + 4), Constraint::Min(30)])
        .split(chunks[1]);

    draw_board(frame, body[0], app, &mut hitboxes);
    draw_info(frame, body[1], app, &mut hitboxes);

    let help = Paragraph::new(
        "arrows move · enter/space/click select · 1-9 place · tab switch panel · t toggle order · q quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help, chunks[2]);

    hitboxes
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, hitboxes: &mut Hitboxes) {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);
    let border_style = if app.focus() == Focus::Board {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    let win = app.state().winner();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(CELL_HEIGHT); 3])
        .split(inner);

    for (r, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CELL_WIDTH); 3])
            .split(*row_area);

        for (c, cell_area) in cols.iter().enumerate() {
            let index = r * 3 + c;
            if let Some(pos) = Position::from_index(index) {
                draw_cell(frame, *cell_area, app, pos, win.as_ref());
                hitboxes.cells[index] = *cell_area;
            }
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, pos: Position, win: Option<&Win>) {
    let square = app.state().current().get(pos);

    let (symbol, base_style) = match square {
        Square::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Player::X) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if win.is_some_and(|w| w.contains(pos)) {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if app.focus() == Focus::Board && pos == app.board_cursor() {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .style(style);
    let paragraph = Paragraph::new(Line::from(Span::raw(symbol)))
        .alignment(Alignment::Center)
        .block(block);

    frame.render_widget(paragraph, area);
}

fn draw_info(frame: &mut Frame, area: Rect, app: &App, hitboxes: &mut Hitboxes) {
    let state = app.state();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status
            Constraint::Length(1), // Toggle
            Constraint::Length(1),
            Constraint::Min(3), // Moves
        ])
        .split(area);

    let status_style = match state.status() {
        GameStatus::Won(_) => Style::default().fg(Color::Green),
        GameStatus::Draw => Style::default().fg(Color::Magenta),
        GameStatus::InProgress => Style::default().fg(Color::Yellow),
    };
    let status = Paragraph::new(view::status_line(state))
        .style(status_style.add_modifier(Modifier::BOLD));
    frame.render_widget(status, chunks[0]);

    let toggle = Paragraph::new(Line::from(vec![
        Span::styled(
            "[t] Toggle Ordering",
            Style::default().add_modifier(Modifier::REVERSED),
        ),
        Span::raw("  "),
        Span::raw(view::order_label(state.order())),
    ]));
    frame.render_widget(toggle, chunks[1]);
    hitboxes.toggle = Rect {
        width: chunks[1].width.min(19),
        ..chunks[1]
    };

    let border_style = if app.focus() == Focus::Moves {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title("Moves")
        .borders(Borders::ALL)
        .border_style(border_style);
    let list_area = block.inner(chunks[3]);
    frame.render_widget(block, chunks[3]);

    let entries = view::move_entries(state);
    let visible = usize::from(list_area.height);
    let offset = app.selected().saturating_sub(visible.saturating_sub(1));

    for (line, entry) in entries.iter().skip(offset).take(visible).enumerate() {
        let line_area = Rect {
            y: list_area.y + line as u16,
            height: 1,
            ..list_area
        };

        let mut style = Style::default();
        if *entry.is_current() {
            style = style.add_modifier(Modifier::BOLD);
        }
        if app.focus() == Focus::Moves && *entry.index() == app.selected() {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let mut spans = vec![Span::styled(
            format!("{:>2}. {}", entry.index() + 1, entry.label()),
            style,
        )];
        if app.show_coordinates() && entry.coords().is_some() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                entry.coords_text(),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
        hitboxes.moves.push((*entry.index(), line_area));
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_draw_reports_hitboxes() {
        let app = App::new(&Settings::default());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test backend");

        let mut hitboxes = Hitboxes::default();
        terminal
            .draw(|f| hitboxes = draw(f, &app))
            .expect("draw");

        assert!(hitboxes.cells.iter().all(|r| r.width == CELL_WIDTH && r.height == CELL_HEIGHT));
        assert_eq!(hitboxes.cells[1].x, hitboxes.cells[0].x + CELL_WIDTH);
        assert_eq!(hitboxes.moves.len(), 1);
        assert!(hitboxes.toggle.width > 0);
    }
}
