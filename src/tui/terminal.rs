//! Terminal setup and teardown
//!
//! Raw mode and the alternate screen are restored on exit and from the
//! panic hook.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::config::paths::HubPaths;
use crate::config::settings::Settings;
use crate::storage::Storage;

use super::app::App;
use super::event::{Event, EventHandler};
use super::handler::handle_key_event;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI until the user quits
pub fn run_tui(storage: &Storage, settings: &Settings, paths: &HubPaths) -> Result<()> {
    let mut terminal = init_terminal()?;
    let mut app = App::new(storage, settings, paths);
    let events = EventHandler::default();

    tracing::info!("TUI started");

    let result = (|| -> Result<()> {
        while !app.should_quit {
            terminal.draw(|frame| super::views::render(frame, &mut app))?;

            match events.next()? {
                Event::Key(key) => handle_key_event(&mut app, key),
                Event::Resize(_, _) => {}
                Event::Tick => app.notifications.remove_expired(),
            }
        }
        Ok(())
    })();

    restore_terminal()?;
    tracing::info!("TUI stopped");
    result
}
