//! Non-interactive replay of a move sequence.

use crate::view::{self, MoveEntry};
use derive_more::{Display, Error};
use serde::Serialize;
use std::fmt;
use tictactoe_timeline_core::{GameState, HistoryOrder, Position};
use tracing::{debug, info, instrument};

/// Output format for a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TranscriptFormat {
    /// Board grid, status and move list.
    #[default]
    Text,
    /// The serialized game state with its derived views.
    Json,
}

/// A move the store refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Refusal {
    /// Ply the move would have been.
    pub ply: usize,
    /// Where it was aimed.
    pub position: Position,
    /// Why it was refused.
    pub reason: String,
}

/// Result of replaying a move sequence.
#[derive(Debug, Clone, Serialize)]
pub struct Replay {
    /// Final state.
    pub state: GameState,
    /// Moves that were ignored, in input order.
    pub refused: Vec<Refusal>,
}

/// Replay input errors.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ReplayError {
    /// A token is neither an index nor a position label.
    #[display("Unknown move {_0:?}: expected 0-8 or a label such as top-left")]
    UnknownMove(#[error(not(source))] String),
}

/// Plays `moves` from a fresh game, then optionally jumps to a ply.
///
/// Refused placements leave the state unchanged and are reported, matching
/// what a click on an occupied cell does in the interactive UI.
#[instrument(skip(moves), fields(count = moves.len()))]
pub fn replay(
    order: HistoryOrder,
    moves: &[String],
    jump: Option<usize>,
) -> Result<Replay, ReplayError> {
    let positions = moves
        .iter()
        .map(|token| {
            Position::from_label_or_number(token)
                .ok_or_else(|| ReplayError::UnknownMove(token.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut state = GameState::with_order(order);
    let mut refused = Vec::new();
    for position in positions {
        match state.try_place_mark(position) {
            Ok(next) => state = next,
            Err(e) => {
                debug!(%position, error = %e, "Replay move refused");
                refused.push(Refusal {
                    ply: state.current_ply() + 1,
                    position,
                    reason: e.to_string(),
                });
            }
        }
    }

    if let Some(ply) = jump {
        state = state.jump_to_ply(ply);
    }

    info!(plies = state.len() - 1, refused = refused.len(), "Replay finished");
    Ok(Replay { state, refused })
}

/// Renders a replay as plain text.
pub fn render_text(replay: &Replay, show_coordinates: bool) -> String {
    TextTranscript {
        replay,
        show_coordinates,
    }
    .to_string()
}

struct TextTranscript<'a> {
    replay: &'a Replay,
    show_coordinates: bool,
}

impl fmt::Display for TextTranscript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = &self.replay.state;

        writeln!(f, "{}", state.current().display())?;
        writeln!(f)?;
        writeln!(f, "{}", view::status_line(state))?;
        writeln!(f, "Order: {}", view::order_label(state.order()))?;
        writeln!(f)?;

        for entry in view::move_entries(state) {
            let marker = if *entry.is_current() { '>' } else { ' ' };
            write!(f, "{} {:>2}. {}", marker, entry.index() + 1, entry.label())?;
            if self.show_coordinates && entry.coords().is_some() {
                write!(f, "  {}", entry.coords_text())?;
            }
            writeln!(f)?;
        }

        for refusal in &self.replay.refused {
            writeln!(
                f,
                "ignored move #{} at {}: {}",
                refusal.ply, refusal.position, refusal.reason
            )?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: String,
    order_label: &'static str,
    moves: Vec<MoveEntry>,
    #[serde(flatten)]
    replay: &'a Replay,
}

/// Renders a replay as pretty-printed JSON.
pub fn render_json(replay: &Replay) -> serde_json::Result<String> {
    let report = JsonReport {
        status: view::status_line(&replay.state),
        order_label: view::order_label(replay.state.order()),
        moves: view::move_entries(&replay.state),
        replay,
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(moves: &[&str]) -> Vec<String> {
        moves.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_unknown_token_is_an_error() {
        let err = replay(HistoryOrder::Descending, &tokens(&["4", "nowhere"]), None)
            .expect_err("bad token");
        assert_eq!(err, ReplayError::UnknownMove("nowhere".to_string()));
    }

    #[test]
    fn test_refused_moves_are_reported() {
        let result = replay(HistoryOrder::Descending, &tokens(&["center", "4", "0"]), None)
            .expect("valid tokens");
        assert_eq!(result.state.len(), 3);
        assert_eq!(result.refused.len(), 1);
        assert_eq!(result.refused[0].position, Position::Center);
        assert_eq!(result.refused[0].ply, 2);
    }

    #[test]
    fn test_text_marks_current_entry() {
        let result = replay(HistoryOrder::Descending, &tokens(&["4", "0"]), Some(1))
            .expect("valid tokens");
        let text = render_text(&result, true);
        assert!(text.contains("Next player: O"));
        assert!(text.contains(">  2. Go to move #1  (column 2, row 2)"));
        assert!(text.contains("Order: Oldest to Newest"));
    }

    #[test]
    fn test_text_layout() {
        let result = replay(HistoryOrder::Descending, &tokens(&["4", "4"]), None)
            .expect("valid tokens");
        let expected = "\
1|2|3
-+-+-
4|X|6
-+-+-
7|8|9

Next player: O
Order: Oldest to Newest

   1. Go to game start
>  2. Go to move #1
ignored move #2 at Center: Square Center is already occupied
";
        assert_eq!(render_text(&result, false), expected);
    }

    #[test]
    fn test_json_includes_state_and_views() {
        let result = replay(HistoryOrder::Ascending, &tokens(&["4"]), None).expect("valid");
        let json = render_json(&result).expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["state"]["order"], "ascending");
        assert_eq!(value["status"], "Next player: O");
        assert_eq!(value["moves"][0]["label"], "Go to move #1");
    }
}
