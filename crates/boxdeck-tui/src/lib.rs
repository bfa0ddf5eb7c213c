//! TUI dashboard for boxdeck
//!
//! Built with Ratatui. The dashboard lists distrobox sessions and hands the
//! terminal to `distrobox enter` when a session is entered.

pub mod app;
mod event;
pub mod theme;
pub mod ui;

pub use app::{App, AppError, AppResult, Column, Field, Severity, StatusMessage, ViewConfig};
pub use event::{Event, EventHandler};
pub use theme::Theme;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, Stdout};

/// The real terminal, in raw mode on the alternate screen
pub struct Tui {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
}

/// Terminal control needed to lend the screen to a foreground process
pub trait Handoff {
    /// Give the terminal back to the shell
    fn suspend(&mut self) -> AppResult<()>;

    /// Take the terminal back after [`suspend`](Handoff::suspend) and
    /// repaint from scratch
    fn resume(&mut self) -> AppResult<()>;
}

impl Tui {
    /// Take over the terminal
    pub fn enter() -> AppResult<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Handoff for Tui {
    fn suspend(&mut self) -> AppResult<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn resume(&mut self) -> AppResult<()> {
        enable_raw_mode()?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        self.terminal.clear()?;
        Ok(())
    }
}

/// Run the dashboard until the user quits
pub async fn run(mut app: App) -> AppResult<()> {
    let mut tui = Tui::enter()?;
    let res = app.run(&mut tui).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(tui.terminal.backend_mut(), LeaveAlternateScreen)?;
    tui.terminal.show_cursor()?;

    res
}
