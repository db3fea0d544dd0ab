//! Terminal UI.

mod app;
mod dispatch;
mod input;
mod ui;

pub use app::{App, Focus};
pub use dispatch::{Action, CellView, Dispatcher, MoveView, ToggleView};
pub use ui::{Hitboxes, draw};

use crate::config::Settings;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use tracing::{error, info, instrument, warn};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Runs the interactive game until the user quits.
///
/// The terminal is restored on every exit path, including errors from the
/// event loop and a failed setup.
#[instrument(skip(settings))]
pub fn run(settings: &Settings) -> Result<()> {
    info!("Starting terminal UI");

    let mut terminal = setup_terminal()?;
    let mut app = App::new(settings);
    let res = run_loop(&mut terminal, &mut app);
    let restored = reset_terminal().context("Failed to restore terminal");

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(plies = app.state().len() - 1, "Terminal UI closed");
    res.and(restored)
}

/// Raw mode, alternate screen, mouse capture. Undone on failure.
fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let terminal = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")
        .and_then(|()| {
            Terminal::new(CrosstermBackend::new(io::stdout()))
                .context("Failed to create terminal")
        });

    if terminal.is_err() {
        if let Err(e) = reset_terminal() {
            warn!(error = %e, "Terminal reset after failed setup also failed");
        }
    }
    terminal
}

/// Undoes [`setup_terminal`]. Every step runs even when an earlier one fails.
fn reset_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    );
    raw.and(screen)
}

/// Draw, wait for one input event, apply the resulting actions.
fn run_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    loop {
        let mut hitboxes = Hitboxes::default();
        terminal.draw(|f| hitboxes = draw(f, app))?;
        app.set_hitboxes(hitboxes);

        if app.should_quit() {
            return Ok(());
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
        app.process_actions();
    }
}
