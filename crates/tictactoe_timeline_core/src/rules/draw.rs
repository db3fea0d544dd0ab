//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Square};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// Checks if the board is drawn.
///
/// This only looks at occupancy: a full board that also holds a line is
/// still "drawn" here, so callers check [`super::evaluate_winner`] first.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board)
}
