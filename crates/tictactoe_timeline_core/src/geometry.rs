//! Where the last mark went.

use super::{Board, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 1-based board coordinates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new, derive_more::Display,
)]
#[display("(column {column}, row {row})")]
pub struct Coords {
    /// Column, 1 to 3 left to right.
    pub column: usize,
    /// Row, 1 to 3 top to bottom.
    pub row: usize,
}

impl From<Position> for Coords {
    fn from(pos: Position) -> Self {
        Self::new(pos.column(), pos.row())
    }
}

/// Returns the coordinates of the cell that changed between two snapshots.
///
/// `previous` is `None` for the game-start snapshot, which has no last move.
/// Identical snapshots also yield `None`. Snapshots are expected to differ in
/// exactly one cell; if more differ, the lowest index is reported.
#[instrument(skip_all)]
pub fn last_move_coords(previous: Option<&Board>, current: &Board) -> Option<Coords> {
    let previous = previous?;
    Position::ALL
        .into_iter()
        .find(|pos| previous.get(*pos) != current.get(*pos))
        .map(Coords::from)
}
