//! Command-line interface for tictactoe_timeline.

use crate::transcript::TranscriptFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_timeline_core::HistoryOrder;

/// Tic-tac-toe with a time-travelling move history
#[derive(Parser, Debug)]
#[command(name = "tictactoe_timeline")]
#[command(about = "Tic-tac-toe with move history, time travel and reversible ordering", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to ./tictactoe_timeline.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// History order for the new game: ascending or descending
    #[arg(long, global = true)]
    pub order: Option<HistoryOrder>,

    /// Subcommand to run (defaults to play)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Log file (overrides the settings file)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Replay a move sequence and print the result
    Replay {
        /// Moves as board indices 0-8 or labels such as top-left
        #[arg(required = true)]
        moves: Vec<String>,

        /// Display this ply after replaying (0 is the game start)
        #[arg(long)]
        jump: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: TranscriptFormat,
    },
}
