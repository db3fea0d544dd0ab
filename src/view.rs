//! Presentation model: the text a frontend shows for a game state.
//!
//! Everything here is derived from a [`GameState`] on demand; nothing is
//! cached between transitions.

use derive_getters::Getters;
use serde::Serialize;
use tictactoe_timeline_core::{Coords, GameState, GameStatus, HistoryOrder};
use tracing::instrument;

/// One line of the move list.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, derive_new::new)]
pub struct MoveEntry {
    /// Storage index, the argument for [`GameState::jump_to`].
    index: usize,
    /// Absolute move number.
    ply: usize,
    /// Button text.
    label: String,
    /// Where the move went; `None` for the game start.
    coords: Option<Coords>,
    /// Whether this entry is the displayed snapshot.
    is_current: bool,
}

impl MoveEntry {
    /// Coordinates as shown next to the label, empty for the game start.
    pub fn coords_text(&self) -> String {
        self.coords.map(|c| c.to_string()).unwrap_or_default()
    }
}

/// Status line: the winner, a draw, or whose turn it is.
#[instrument(skip(state))]
pub fn status_line(state: &GameState) -> String {
    match state.status() {
        GameStatus::Won(win) => format!("Winner: {}", win.player()),
        GameStatus::Draw => "Draw".to_string(),
        GameStatus::InProgress => format!("Next player: {}", state.active_player()),
    }
}

/// Describes the list direction next to the toggle control.
pub fn order_label(order: HistoryOrder) -> &'static str {
    match order {
        HistoryOrder::Descending => "Oldest to Newest",
        HistoryOrder::Ascending => "Newest to Oldest",
    }
}

/// Move list entries in storage order.
#[instrument(skip(state), fields(len = state.len(), order = %state.order()))]
pub fn move_entries(state: &GameState) -> Vec<MoveEntry> {
    (0..state.len())
        .filter_map(|index| {
            let ply = state.ply_at(index)?;
            let label = match ply {
                0 => "Go to game start".to_string(),
                n => format!("Go to move #{}", n),
            };
            Some(MoveEntry::new(
                index,
                ply,
                label,
                state.last_move_at(index),
                index == state.cursor(),
            ))
        })
        .collect()
}
