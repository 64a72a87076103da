//! TerminalRenderer: owns the terminal session and flushes frames.
//!
//! The drawing API is intentionally small: the table is tiny, so every frame
//! is a full redraw. What matters is the enter/exit contract - raw mode and
//! the alternate screen are always restored, even when the game loop exits
//! through an error path.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{cursor, terminal, QueueableCommand};

pub struct TerminalRenderer {
    stdout: io::Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Full-frame redraw from a pre-rendered string.
    pub fn draw(&mut self, frame: &str) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        for (row, line) in frame.lines().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, row as u16))?;
            self.stdout.queue(crossterm::style::Print(line))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
