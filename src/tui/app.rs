//! Application state and event handling.

use super::dispatch::{Action, CellView, Dispatcher, MoveView, ToggleView};
use super::input;
use super::ui::Hitboxes;
use crate::config::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position as ScreenPosition;
use std::sync::mpsc::Receiver;
use tictactoe_timeline_core::{GameState, Position};
use tracing::{debug, info, instrument};

/// Which panel receives arrow keys and Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The board grid.
    #[default]
    Board,
    /// The move list.
    Moves,
}

impl Focus {
    /// Switches to the other panel.
    pub fn toggle(self) -> Self {
        match self {
            Self::Board => Self::Moves,
            Self::Moves => Self::Board,
        }
    }
}

/// Main application state.
///
/// The app is the only owner of the [`GameState`]. Input turns into actions
/// through the views; [`App::process_actions`] applies them.
pub struct App {
    state: GameState,
    board_cursor: Position,
    selected: usize,
    focus: Focus,
    show_coordinates: bool,
    dispatcher: Dispatcher,
    actions: Receiver<Action>,
    cells: Vec<CellView>,
    toggle: ToggleView,
    hitboxes: Hitboxes,
    should_quit: bool,
}

impl App {
    /// Creates a new application with a fresh game.
    #[instrument(skip(settings))]
    pub fn new(settings: &Settings) -> Self {
        let (dispatcher, actions) = Dispatcher::channel();
        let cells = Position::ALL
            .into_iter()
            .map(|pos| CellView::new(pos, dispatcher.clone()))
            .collect();

        Self {
            state: GameState::with_order(*settings.order()),
            board_cursor: Position::Center,
            selected: 0,
            focus: Focus::default(),
            show_coordinates: *settings.show_coordinates(),
            toggle: ToggleView::new(dispatcher.clone()),
            dispatcher,
            actions,
            cells,
            hitboxes: Hitboxes::default(),
            should_quit: false,
        }
    }

    /// The game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Highlighted board cell.
    pub fn board_cursor(&self) -> Position {
        self.board_cursor
    }

    /// Highlighted move list entry.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Panel with keyboard focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Whether move coordinates are shown.
    pub fn show_coordinates(&self) -> bool {
        self.show_coordinates
    }

    /// Whether the run loop should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The view of a board cell.
    pub fn cell(&self, pos: Position) -> &CellView {
        &self.cells[pos.to_index()]
    }

    /// The view of the move list entry at storage `index`.
    pub fn move_view(&self, index: usize) -> MoveView {
        MoveView::new(index, self.dispatcher.clone())
    }

    /// The ordering toggle view.
    pub fn toggle(&self) -> &ToggleView {
        &self.toggle
    }

    /// Stores the clickable areas of the last drawn frame.
    pub fn set_hitboxes(&mut self, hitboxes: Hitboxes) {
        self.hitboxes = hitboxes;
    }

    /// Translates a key press into view clicks or local UI changes.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.dispatcher.dispatch(Action::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.dispatcher.dispatch(Action::Quit)
            }
            KeyCode::Char('t') => self.toggle.click(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                debug!(focus = ?self.focus, "Focus switched");
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(pos) = input::digit_position(c) {
                    self.board_cursor = pos;
                    self.cell(pos).click();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                Focus::Board => self.cell(self.board_cursor).click(),
                Focus::Moves => self.move_view(self.selected).click(),
            },
            code => match self.focus {
                Focus::Board => self.board_cursor = input::move_cursor(self.board_cursor, code),
                Focus::Moves => {
                    self.selected = input::move_selection(self.selected, self.state.len(), code)
                }
            },
        }
    }

    /// Hit-tests a left click against the last frame.
    #[instrument(skip(self), fields(column = mouse.column, row = mouse.row))]
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let point = ScreenPosition::new(mouse.column, mouse.row);

        if let Some(i) = self.hitboxes.cells.iter().position(|r| r.contains(point)) {
            if let Some(pos) = Position::from_index(i) {
                self.focus = Focus::Board;
                self.board_cursor = pos;
                self.cell(pos).click();
            }
        } else if let Some(index) = self
            .hitboxes
            .moves
            .iter()
            .find(|(_, r)| r.contains(point))
            .map(|(index, _)| *index)
        {
            self.focus = Focus::Moves;
            self.selected = index;
            self.move_view(index).click();
        } else if self.hitboxes.toggle.contains(point) {
            self.toggle.click();
        }
    }

    /// Applies every queued action in order.
    pub fn process_actions(&mut self) {
        while let Ok(action) = self.actions.try_recv() {
            self.apply(action);
        }
    }

    /// Applies one action as a single state transition.
    #[instrument(skip(self))]
    pub fn apply(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = match action {
            Action::PlaceMark(pos) => state.place_mark(pos),
            Action::JumpTo(index) => state.jump_to(index),
            Action::ToggleOrder => state.toggle_order(),
            Action::Quit => {
                info!("User quit");
                self.should_quit = true;
                state
            }
        };
        self.selected = self.state.cursor();
    }
}
