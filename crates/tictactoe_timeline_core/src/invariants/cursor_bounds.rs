//! Cursor bounds invariant: the cursor names a stored snapshot.

use super::super::GameState;
use super::Invariant;

/// Invariant: history is non-empty and `cursor < len`.
pub struct CursorInBoundsInvariant;

impl Invariant<GameState> for CursorInBoundsInvariant {
    fn holds(state: &GameState) -> bool {
        !state.history().is_empty() && state.cursor() < state.history().len()
    }

    fn description() -> &'static str {
        "Cursor points at a stored snapshot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_holds_after_clamped_jump() {
        let state = GameState::new().place_mark(Position::Center).jump_to(42);
        assert!(CursorInBoundsInvariant::holds(&state));
    }

    #[test]
    fn test_detects_dangling_cursor() {
        let json = r#"{"history":[{"squares":["Empty","Empty","Empty","Empty","Empty","Empty","Empty","Empty","Empty"]}],"cursor":1,"order":"ascending"}"#;
        let state: GameState = serde_json::from_str(json).expect("valid json");
        assert!(!CursorInBoundsInvariant::holds(&state));
    }
}
