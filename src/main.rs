//! `slashpad` - terminal note editor with a slash-command palette
//!
//! Entry point for the application.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};

use slashpad::app::App;
use slashpad::cli::Args;
use slashpad::fs::SlashpadPaths;
use slashpad::logging;
use slashpad::tui::TerminalEventGuard;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let paths = match &args.dir {
        Some(dir) => SlashpadPaths::new(dir),
        None => SlashpadPaths::from_cwd()?,
    };

    // The editor works without a log file
    if let Err(e) = logging::init(&paths) {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let app = App::new(paths, &args);

    // Initialize the terminal with crossterm backend
    let mut terminal = ratatui::init();

    // Run the application
    let result = run_app(&mut terminal, app);

    // Restore the terminal
    ratatui::restore();

    result
}

fn run_app(terminal: &mut ratatui::DefaultTerminal, mut app: App) -> Result<()> {
    // Must come after ratatui::init, which can reset terminal flags.
    // The guard disables the modes again even if the app panics.
    let _event_guard = TerminalEventGuard::new();

    info!(trigger = %app.palette().trigger(), "slashpad started");

    loop {
        // Layout is computed inside the draw closure so it uses the same
        // area as rendering
        terminal.draw(|frame| {
            app.update_layout(frame.area());
            app.render(frame);
        })?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Paste(text) => app.handle_paste(&text),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::FocusLost => app.handle_focus_lost(),
                _ => {}
            }
        }

        // Apply answers from the background provider
        app.process_events();

        // Autosave after a pause in typing
        app.tick();

        if app.should_quit() {
            break;
        }
    }

    if let Err(e) = app.flush_autosave() {
        warn!(error = %e, "failed to write autosave on exit");
    }
    info!("slashpad exiting");

    Ok(())
}
