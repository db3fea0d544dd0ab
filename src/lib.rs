//! Tic-tac-toe with a time-travelling move history.
//!
//! The game logic lives in [`tictactoe_timeline_core`]; this crate adds the
//! surfaces around it.
//!
//! # Architecture
//!
//! - **Config**: TOML settings ([`Settings`])
//! - **View**: status line, ordering label and move list derived from a state
//! - **Transcript**: non-interactive replay of a move sequence
//! - **TUI**: ratatui frontend dispatching clicks and keys as [`tui::Action`]s
//!
//! # Example
//!
//! ```
//! use tictactoe_timeline::{GameState, Position, view};
//!
//! let state = GameState::new()
//!     .place_mark(Position::Center)
//!     .place_mark(Position::TopLeft);
//! assert_eq!(view::status_line(&state), "Next player: X");
//! assert_eq!(view::move_entries(&state)[2].label(), "Go to move #2");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
pub mod transcript;
pub mod tui;
pub mod view;

pub use config::{ConfigError, DEFAULT_CONFIG_PATH, Settings};

pub use tictactoe_timeline_core::{
    Board, Coords, GameState, GameStatus, HistoryOrder, InvariantViolation, PlaceError, Player,
    Position, Square, Win, evaluate_winner, is_draw, last_move_coords,
};
