// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, animation ticks, hydration)
// - Rendering the UI

pub mod app;
pub mod clipboard;
pub mod ui;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::store::DataStore;
use anyhow::{Context, Result};
use app::{App, View};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Animation frame cadence (~30 FPS)
const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and cleans up when done.
/// The loop handles keyboard input, animation ticks, and the one-shot
/// hydration message from the loader task.
pub async fn run_tui(
    mut store_rx: mpsc::Receiver<DataStore>,
    log_buffer: LogBuffer,
    config: Config,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(&config, log_buffer);

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut store_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// tokio::select! waits on keyboard input, the animation tick, and the
/// hydration channel, responding to whichever completes first. Input
/// sanitization and field echo happen synchronously within the
/// keystroke; recomputation is deferred through the debouncer and
/// surfaces on a later tick.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store_rx: &mut mpsc::Receiver<DataStore>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(TICK_INTERVAL);

    loop {
        // Draw the UI
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Animation tick: debounced recomputation + interpolation
            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }

            // One-shot hydration from the loader task
            Some(store) = store_rx.recv() => {
                tracing::info!("Reference data loaded ({} constants)", store.len());
                app.hydrate(store);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
///
/// Digits and Backspace edit the amount (auto-repeat counts as typing);
/// everything else is a single-shot action.
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return;
    }

    let now = Instant::now();
    match key_event.code {
        KeyCode::Char(c) if c.is_ascii_digit() => app.push_input(c, now),
        KeyCode::Backspace | KeyCode::Delete => app.pop_input(now),
        KeyCode::Esc => {
            // In help, Esc goes back; in the main view it clears the field
            if app.view == View::Help {
                app.view = View::Main;
            } else {
                app.clear_input(now);
            }
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.view = if app.view == View::Help {
                View::Main
            } else {
                View::Help
            };
        }
        // Copy a plain-text summary of the current display
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if clipboard::copy_to_clipboard(&app.summary()).is_ok() {
                app.show_toast("✓ Copied to clipboard", now);
            } else {
                app.show_toast("✗ Failed to copy", now);
            }
        }
        _ => {}
    }
}
