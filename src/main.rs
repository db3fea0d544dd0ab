//! tictactoe_timeline - terminal tic-tac-toe with time travel.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tictactoe_timeline::cli::{Cli, Command};
use tictactoe_timeline::transcript::{self, TranscriptFormat};
use tictactoe_timeline::{Settings, tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(order) = cli.order {
        settings = settings.with_order(order);
    }

    match cli.command.unwrap_or(Command::Play { log_file: None }) {
        Command::Play { log_file } => {
            if let Some(log_file) = log_file {
                settings = settings.with_log_file(log_file);
            }
            run_play(&settings)
        }
        Command::Replay {
            moves,
            jump,
            format,
        } => run_replay(&settings, &moves, jump, format),
    }
}

/// `RUST_LOG` wins over the configured filter.
fn env_filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(settings.log_filter()))
}

/// Run the interactive terminal UI
fn run_play(settings: &Settings) -> Result<()> {
    // Log to a file so output never lands on the alternate screen
    let log_file = std::fs::File::create(settings.log_file()).with_context(|| {
        format!("Failed to create log file {}", settings.log_file().display())
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(settings))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    info!(order = %settings.order(), "Starting tictactoe_timeline");
    tui::run(settings)
}

/// Replay moves and print a transcript
fn run_replay(
    settings: &Settings,
    moves: &[String],
    jump: Option<usize>,
    format: TranscriptFormat,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(settings))
        .with_writer(std::io::stderr)
        .init();

    let replay = transcript::replay(*settings.order(), moves, jump)?;
    let output = match format {
        TranscriptFormat::Text => transcript::render_text(&replay, *settings.show_coordinates()),
        TranscriptFormat::Json => {
            transcript::render_json(&replay).context("Failed to serialize replay")?
        }
    };
    print!("{}", output);
    Ok(())
}
