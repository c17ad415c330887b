/// Common terminal utilities
use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, IsTerminal};

/// Clear the screen before a run, but only when stdout is an interactive
/// terminal. Redirected output is left untouched.
pub fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    if !stdout.is_terminal() {
        return Ok(());
    }
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)).context("Failed to clear the terminal")
}
