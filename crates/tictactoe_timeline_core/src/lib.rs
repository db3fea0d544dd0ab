//! Tic-tac-toe with a time-travelling move history.
//!
//! The crate is pure game logic: no I/O, no rendering.
//!
//! - [`rules`]: win and draw evaluation of a single board
//! - [`geometry`]: coordinates of the move between two snapshots
//! - [`GameState`]: the history store with `place_mark`, `jump_to` and
//!   `toggle_order`
//! - [`invariants`]: properties every history satisfies
//!
//! ```
//! use tictactoe_timeline_core::{GameState, Player, Position};
//!
//! let state = GameState::new().place_mark(Position::Center);
//! assert_eq!(state.active_player(), Player::O);
//! assert_eq!(state.len(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod geometry;
mod history;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use error::PlaceError;
pub use geometry::{Coords, last_move_coords};
pub use history::{GameState, GameStatus, HistoryOrder};
pub use invariants::{InvariantViolation, assert_invariants};
pub use position::Position;
pub use rules::{Win, evaluate_winner, is_draw};
pub use types::{Board, Player, Square};
