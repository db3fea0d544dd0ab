//! History consistency invariant: each ply adds exactly one mark.

use super::super::{Board, GameState, Player, Position, Square};
use super::Invariant;

/// Invariant: ply 0 is the empty board and each later ply differs from the
/// previous one in a single, previously empty square holding the mark of the
/// player whose turn it was.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let by_ply: Vec<&Board> = (0..state.len())
            .filter_map(|ply| state.index_of_ply(ply))
            .filter_map(|index| state.history().get(index))
            .collect();

        let Some(start) = by_ply.first() else {
            return false;
        };
        if **start != Board::new() {
            return false;
        }

        by_ply.windows(2).enumerate().all(|(ply, pair)| {
            let [before, after] = pair else {
                return false;
            };
            let changed: Vec<Position> = Position::ALL
                .into_iter()
                .filter(|pos| before.get(*pos) != after.get(*pos))
                .collect();

            matches!(changed.as_slice(), [pos]
                if before.is_empty(*pos)
                    && after.get(*pos) == Square::Occupied(Player::for_ply(ply)))
        })
    }

    fn description() -> &'static str {
        "Each ply adds exactly one mark for the player to move"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HistoryOrder;

    #[test]
    fn test_holds_in_both_orders() {
        let state = GameState::new()
            .place_mark(Position::Center)
            .place_mark(Position::BottomLeft);
        assert!(HistoryConsistentInvariant::holds(&state));
        assert!(HistoryConsistentInvariant::holds(&state.toggle_order()));

        let state = GameState::with_order(HistoryOrder::Ascending)
            .place_mark(Position::Center)
            .place_mark(Position::BottomLeft);
        assert!(HistoryConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_detects_skipped_ply() {
        let json = r#"{"history":[{"squares":["Empty","Empty","Empty","Empty","Empty","Empty","Empty","Empty","Empty"]},{"squares":[{"Occupied":"X"},{"Occupied":"O"},"Empty","Empty","Empty","Empty","Empty","Empty","Empty"]}],"cursor":1,"order":"descending"}"#;
        let state: GameState = serde_json::from_str(json).expect("valid json");
        assert!(!HistoryConsistentInvariant::holds(&state));
    }
}
