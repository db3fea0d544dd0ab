//! Errors reported by history transitions.

use super::{Player, Position};

/// Why a placement was refused.
///
/// [`crate::GameState::place_mark`] treats these as silent no-ops;
/// [`crate::GameState::try_place_mark`] hands them back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    /// The square at the position is already occupied.
    #[display("Square {_0} is already occupied")]
    SquareOccupied(#[error(not(source))] Position),

    /// The displayed snapshot already has a winner.
    #[display("Game is already over: {_0} won")]
    GameOver(#[error(not(source))] Player),
}
