//! Turn parity invariant: X moves first and players alternate.

use super::super::{GameState, Player};
use super::Invariant;

/// Invariant: every snapshot has as many X marks as O marks, or one more.
///
/// The snapshot at ply `p` also holds exactly `p` marks.
pub struct TurnParityInvariant;

impl Invariant<GameState> for TurnParityInvariant {
    fn holds(state: &GameState) -> bool {
        state.history().iter().enumerate().all(|(index, board)| {
            let x = board.count(Player::X);
            let o = board.count(Player::O);
            (x == o || x == o + 1) && state.ply_at(index) == Some(board.marks())
        })
    }

    fn description() -> &'static str {
        "Marks alternate starting with X (X count equals O count or O count + 1)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_holds_for_played_game() {
        let state = GameState::new()
            .place_mark(Position::TopLeft)
            .place_mark(Position::Center)
            .place_mark(Position::TopRight);
        assert!(TurnParityInvariant::holds(&state));
    }

    #[test]
    fn test_detects_o_first() {
        let json = r#"{"history":[{"squares":["Empty","Empty","Empty","Empty","Empty","Empty","Empty","Empty","Empty"]},{"squares":[{"Occupied":"O"},"Empty","Empty","Empty","Empty","Empty","Empty","Empty","Empty"]}],"cursor":1,"order":"descending"}"#;
        let state: GameState = serde_json::from_str(json).expect("valid json");
        assert!(!TurnParityInvariant::holds(&state));
    }
}
