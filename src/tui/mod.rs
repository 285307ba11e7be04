//! TUI module
//!
//! Terminal front end over the engine: a pod tree on the left, an output
//! pane on the right. Built with ratatui.

pub mod app;
pub mod constants;
pub mod keybindings;
pub mod picker;
mod theme;
pub mod views;

pub use app::*;
pub use theme::*;

use crate::events::EventReceiver;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

/// Run the TUI application until the operator quits
pub async fn run_tui(mut app: App, mut event_rx: EventReceiver) -> Result<()> {
    tracing::debug!("Initializing TUI");

    let enable_mouse = app.config.ui.enable_mouse;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if enable_mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::debug!("TUI initialized, entering main loop");
    let result = main_loop(&mut terminal, &mut app, &mut event_rx);

    tracing::debug!("TUI shutting down");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if enable_mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut EventReceiver,
) -> Result<()> {
    let poll = Duration::from_millis(constants::INPUT_POLL_MS);
    loop {
        terminal.draw(|f| app.render(f))?;
        app.process_requests();

        // Handle input events (non-blocking)
        if event::poll(poll)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    return Ok(());
                }
            }
        }

        // Apply results of background work in send order
        while let Ok(event) = event_rx.try_recv() {
            app.handle_engine_event(event);
        }

        app.check_status_message_timeout();
    }
}
