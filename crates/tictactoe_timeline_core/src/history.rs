//! Time-travelling game history.
//!
//! [`GameState`] owns every snapshot of the game, the cursor of the displayed
//! snapshot, and the order in which snapshots are stored. Transitions take the
//! state by value and return the next one, so whoever holds the state sees
//! either the old value or the new one, never a half-applied update.
//!
//! Storage order matters to callers: indices handed to [`GameState::jump_to`]
//! and returned by [`GameState::cursor`] are positions in the stored sequence,
//! which is oldest-first in [`HistoryOrder::Descending`] and newest-first in
//! [`HistoryOrder::Ascending`]. The absolute move number of an index is its
//! ply, see [`GameState::ply_at`].

use super::error::PlaceError;
use super::geometry::{Coords, last_move_coords};
use super::invariants::{InvariantSet, InvariantViolation, TimelineInvariants, assert_invariants};
use super::rules::{self, Win};
use super::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Storage and display direction of the history.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HistoryOrder {
    /// Newest snapshot first; new moves are inserted at the head.
    #[strum(to_string = "ascending", serialize = "asc")]
    Ascending,
    /// Oldest snapshot first; new moves are appended at the tail.
    #[default]
    #[strum(to_string = "descending", serialize = "desc")]
    Descending,
}

impl HistoryOrder {
    /// Returns the other order.
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Outcome of the displayed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No line and empty squares left.
    InProgress,
    /// Someone completed a line.
    Won(Win),
    /// Board full without a line.
    Draw,
}

/// The game history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    history: Vec<Board>,
    cursor: usize,
    order: HistoryOrder,
}

impl GameState {
    /// Creates a new game: one empty snapshot, descending order.
    #[instrument]
    pub fn new() -> Self {
        Self::with_order(HistoryOrder::default())
    }

    /// Creates a new game stored in the given order.
    #[instrument]
    pub fn with_order(order: HistoryOrder) -> Self {
        Self {
            history: vec![Board::new()],
            cursor: 0,
            order,
        }
    }

    /// All snapshots in storage order.
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    /// Storage index of the displayed snapshot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current storage order.
    pub fn order(&self) -> HistoryOrder {
        self.order
    }

    /// Number of snapshots, the empty start board included.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Always false: the start snapshot is never removed.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The displayed snapshot.
    pub fn current(&self) -> &Board {
        &self.history[self.cursor]
    }

    /// Absolute move number of the snapshot stored at `index`.
    ///
    /// `None` for an index past the end.
    pub fn ply_at(&self, index: usize) -> Option<usize> {
        (index < self.len()).then(|| self.mirror(index))
    }

    /// Maps a storage index to a ply and back. Requires `i < len`.
    fn mirror(&self, i: usize) -> usize {
        match self.order {
            HistoryOrder::Descending => i,
            HistoryOrder::Ascending => self.len() - 1 - i,
        }
    }

    /// Storage index of the snapshot with the given ply, if it exists.
    pub fn index_of_ply(&self, ply: usize) -> Option<usize> {
        (ply < self.len()).then(|| self.mirror(ply))
    }

    /// Ply of the displayed snapshot.
    pub fn current_ply(&self) -> usize {
        self.mirror(self.cursor)
    }

    /// Player who moves next from the displayed snapshot.
    pub fn active_player(&self) -> Player {
        Player::for_ply(self.current_ply())
    }

    /// Winner of the displayed snapshot.
    pub fn winner(&self) -> Option<Win> {
        rules::evaluate_winner(self.current())
    }

    /// Whether the displayed snapshot is full.
    pub fn is_draw(&self) -> bool {
        rules::is_draw(self.current())
    }

    /// Winner first, then draw, otherwise in progress.
    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(win) => GameStatus::Won(win),
            None if self.is_draw() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    /// The snapshot one ply before the one at `index`.
    ///
    /// `None` for the game-start snapshot or an index past the end.
    pub fn previous_of(&self, index: usize) -> Option<&Board> {
        let ply = self.ply_at(index)?.checked_sub(1)?;
        self.index_of_ply(ply).map(|i| &self.history[i])
    }

    /// Coordinates of the move that produced the snapshot at `index`.
    pub fn last_move_at(&self, index: usize) -> Option<Coords> {
        let current = self.history.get(index)?;
        last_move_coords(self.previous_of(index), current)
    }

    /// Runs every history invariant, collecting violations.
    ///
    /// Transitions preserve the invariants; this is for states built some
    /// other way, such as deserialization.
    pub fn check(&self) -> Result<(), Vec<InvariantViolation>> {
        TimelineInvariants::check_all(self)
    }

    /// Places the active player's mark, or returns the state unchanged.
    ///
    /// Refused when the displayed snapshot already has a winner or the square
    /// is taken. Use [`GameState::try_place_mark`] to learn why.
    #[instrument(skip(self), fields(cursor = self.cursor, order = %self.order))]
    pub fn place_mark(self, pos: Position) -> Self {
        match self.try_place_mark(pos) {
            Ok(next) => next,
            Err(e) => {
                debug!(error = %e, "Placement ignored");
                self
            }
        }
    }

    /// Places the active player's mark at `pos`.
    ///
    /// Snapshots newer than the cursor are discarded first: a move made after
    /// jumping back replaces the moves that had followed.
    ///
    /// # Errors
    ///
    /// [`PlaceError::GameOver`] if the displayed snapshot has a winner,
    /// [`PlaceError::SquareOccupied`] if `pos` is taken.
    #[instrument(skip(self), fields(cursor = self.cursor, order = %self.order))]
    pub fn try_place_mark(&self, pos: Position) -> Result<Self, PlaceError> {
        let current = self.current();
        if let Some(win) = rules::evaluate_winner(current) {
            return Err(PlaceError::GameOver(win.player()));
        }
        if !current.is_empty(pos) {
            return Err(PlaceError::SquareOccupied(pos));
        }

        let player = self.active_player();
        let mut board = current.clone();
        board.set(pos, Square::Occupied(player));

        let next = match self.order {
            HistoryOrder::Descending => self.append_newest_last(board),
            HistoryOrder::Ascending => self.insert_newest_first(board),
        };
        debug!(%player, %pos, ply = next.current_ply(), "Mark placed");

        assert_invariants(&next);
        Ok(next)
    }

    /// Oldest-first storage: keep `[0..=cursor]`, push at the tail.
    fn append_newest_last(&self, board: Board) -> Self {
        let mut history = Vec::with_capacity(self.cursor + 2);
        history.extend_from_slice(&self.history[..=self.cursor]);
        history.push(board);
        Self {
            cursor: history.len() - 1,
            history,
            order: self.order,
        }
    }

    /// Newest-first storage: keep `[cursor..]`, insert at the head.
    fn insert_newest_first(&self, board: Board) -> Self {
        let mut history = Vec::with_capacity(self.len() - self.cursor + 1);
        history.push(board);
        history.extend_from_slice(&self.history[self.cursor..]);
        Self {
            history,
            cursor: 0,
            order: self.order,
        }
    }

    /// Displays the snapshot stored at `index`.
    ///
    /// Out-of-range indices are clamped to the last stored snapshot.
    #[instrument(skip(self), fields(len = self.len()))]
    pub fn jump_to(mut self, index: usize) -> Self {
        let last = self.len() - 1;
        if index > last {
            warn!(index, last, "Jump target out of range, clamping");
        }
        self.cursor = index.min(last);
        debug!(cursor = self.cursor, ply = self.current_ply(), "Jumped");
        assert_invariants(&self);
        self
    }

    /// Displays the snapshot with the given absolute move number.
    ///
    /// Unknown plies clamp to the newest snapshot.
    #[instrument(skip(self), fields(len = self.len()))]
    pub fn jump_to_ply(self, ply: usize) -> Self {
        let index = match self.index_of_ply(ply) {
            Some(index) => index,
            None => {
                warn!(ply, "Ply out of range, clamping to newest");
                self.index_of_newest()
            }
        };
        self.jump_to(index)
    }

    fn index_of_newest(&self) -> usize {
        match self.order {
            HistoryOrder::Descending => self.len() - 1,
            HistoryOrder::Ascending => 0,
        }
    }

    /// Reverses storage order and flips the ordering flag.
    ///
    /// The cursor follows its snapshot to the mirrored index, so the same
    /// board stays displayed and toggling twice restores the original state.
    #[instrument(skip(self), fields(from = %self.order))]
    pub fn toggle_order(mut self) -> Self {
        self.history.reverse();
        self.cursor = self.len() - 1 - self.cursor;
        self.order = self.order.toggle();
        debug!(to = %self.order, cursor = self.cursor, "Order toggled");
        assert_invariants(&self);
        self
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(state: GameState, moves: &[Position]) -> GameState {
        moves.iter().fold(state, |s, &pos| s.place_mark(pos))
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new();
        assert_eq!(state.len(), 1);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.order(), HistoryOrder::Descending);
        assert_eq!(state.active_player(), Player::X);
        assert_eq!(state.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_center_opening() {
        let state = GameState::new().place_mark(Position::Center);
        assert_eq!(state.active_player(), Player::O);
        assert_eq!(state.current().get(Position::Center), Square::Occupied(Player::X));
        assert_eq!(state.len(), 2);
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn test_descending_redo_truncates_tail() {
        let state = play(
            GameState::new(),
            &[Position::Center, Position::TopLeft, Position::TopRight],
        );
        assert_eq!(state.len(), 4);

        let state = state.jump_to(1).place_mark(Position::BottomRight);
        assert_eq!(state.len(), 3);
        assert_eq!(state.cursor(), 2);
        assert_eq!(state.current().get(Position::BottomRight), Square::Occupied(Player::O));
        assert!(state.current().is_empty(Position::TopLeft));
        assert_eq!(state.active_player(), Player::X);
    }

    #[test]
    fn test_ascending_places_at_head() {
        let state = play(
            GameState::with_order(HistoryOrder::Ascending),
            &[Position::Center, Position::TopLeft],
        );
        assert_eq!(state.len(), 3);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.current().marks(), 2);
        assert_eq!(state.history()[2], Board::new());
        assert_eq!(state.active_player(), Player::X);
    }

    #[test]
    fn test_ascending_redo_drops_head() {
        let state = play(
            GameState::with_order(HistoryOrder::Ascending),
            &[Position::Center, Position::TopLeft, Position::TopRight],
        );
        // Index 2 is ply 1: only the center mark.
        let state = state.jump_to(2);
        assert_eq!(state.current_ply(), 1);
        assert_eq!(state.active_player(), Player::O);

        let state = state.place_mark(Position::BottomLeft);
        assert_eq!(state.len(), 3);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.current().marks(), 2);
        assert_eq!(state.current().get(Position::BottomLeft), Square::Occupied(Player::O));
        assert_eq!(state.history()[2], Board::new());
    }

    #[test]
    fn test_toggle_keeps_displayed_snapshot() {
        let state = play(
            GameState::new(),
            &[Position::Center, Position::TopLeft, Position::TopRight],
        )
        .jump_to(1);
        let shown = state.current().clone();

        let toggled = state.clone().toggle_order();
        assert_eq!(toggled.order(), HistoryOrder::Ascending);
        assert_eq!(toggled.cursor(), 2);
        assert_eq!(toggled.current(), &shown);
        assert_eq!(toggled.active_player(), state.active_player());

        assert_eq!(toggled.toggle_order(), state);
    }

    #[test]
    fn test_jump_clamps() {
        let state = GameState::new().place_mark(Position::Center).jump_to(7);
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn test_jump_to_ply_in_both_orders() {
        let state = play(GameState::new(), &[Position::Center, Position::TopLeft]);
        let asc = state.clone().toggle_order().jump_to_ply(1);
        assert_eq!(asc.cursor(), 1);
        assert_eq!(asc.current(), &state.history()[1]);

        let desc = state.jump_to_ply(0);
        assert_eq!(desc.cursor(), 0);
        assert_eq!(desc.active_player(), Player::X);
    }

    #[test]
    fn test_jump_to_ply_out_of_range_goes_to_newest() {
        let state = play(GameState::new(), &[Position::Center, Position::TopLeft]).jump_to(0);
        assert_eq!(state.clone().jump_to_ply(9).cursor(), 2);
        assert_eq!(state.toggle_order().jump_to_ply(9).cursor(), 0);
    }

    #[test]
    fn test_previous_of_follows_ply() {
        let state = play(GameState::new(), &[Position::Center]).toggle_order();
        assert_eq!(state.previous_of(0), Some(&Board::new()));
        assert_eq!(state.previous_of(1), None);
        assert_eq!(state.last_move_at(0), Some(Coords::new(2, 2)));
        assert_eq!(state.last_move_at(1), None);
    }

    #[test]
    fn test_ply_at_past_the_end() {
        let asc = GameState::with_order(HistoryOrder::Ascending).place_mark(Position::Center);
        assert_eq!(asc.ply_at(0), Some(1));
        assert_eq!(asc.ply_at(1), Some(0));
        assert_eq!(asc.ply_at(2), None);
        assert_eq!(asc.ply_at(5), None);

        let desc = asc.toggle_order();
        assert_eq!(desc.ply_at(1), Some(1));
        assert_eq!(desc.ply_at(2), None);
        assert_eq!(desc.previous_of(5), None);
    }

    #[test]
    fn test_order_parses() {
        assert_eq!("asc".parse::<HistoryOrder>().ok(), Some(HistoryOrder::Ascending));
        assert_eq!("Descending".parse::<HistoryOrder>().ok(), Some(HistoryOrder::Descending));
        assert_eq!(HistoryOrder::Ascending.to_string(), "ascending");
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new().place_mark(Position::Center);
        let json = serde_json::to_string(&state).expect("serialize");
        assert!(json.contains("\"order\":\"descending\""));
    }
}
