//! In-place frame redrawing for the report slot.
//!
//! A slot is the block of terminal rows written by the last `update`. Until
//! `commit` is called the slot may be rewritten freely; afterwards it becomes
//! scrollback and the next `update` starts a new slot below it.

use crate::e_fmt::terminal_rows;
use crossterm::{
    cursor, queue,
    terminal::{self, Clear, ClearType},
};
use log::trace;
use std::io::{self, Write};

/// A redrawable region of the terminal.
pub trait Redraw {
    /// Replaces the frame currently shown in the slot with `frame`.
    fn update(&mut self, frame: &str) -> io::Result<()>;
    /// Finalizes the slot; the next `update` writes below it.
    fn commit(&mut self) -> io::Result<()>;
    /// Erases the slot without finalizing it.
    fn clear(&mut self) -> io::Result<()>;
}

/// [`Redraw`] over any writer that understands ANSI cursor sequences.
pub struct TerminalRedraw<W: Write> {
    out: W,
    previous_rows: usize,
    columns: Option<u16>,
    manage_cursor: bool,
    cursor_hidden: bool,
}

impl TerminalRedraw<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalRedraw::new(io::stdout())
    }
}

impl<W: Write> TerminalRedraw<W> {
    pub fn new(out: W) -> Self {
        TerminalRedraw {
            out,
            previous_rows: 0,
            columns: None,
            manage_cursor: true,
            cursor_hidden: false,
        }
    }

    /// Uses a fixed terminal width instead of querying the terminal.
    pub fn with_columns(mut self, columns: u16) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Controls whether the cursor is hidden while a slot is live.
    pub fn with_cursor_management(mut self, manage_cursor: bool) -> Self {
        self.manage_cursor = manage_cursor;
        self
    }

    /// Rows occupied by the live slot.
    pub fn rows(&self) -> usize {
        self.previous_rows
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn columns(&self) -> usize {
        match self.columns {
            Some(columns) => usize::from(columns),
            None => terminal::size()
                .map(|(columns, _)| usize::from(columns))
                .unwrap_or(80),
        }
    }

    /// Erases `rows` rows ending at the cursor and leaves the cursor at the
    /// start of the topmost one.
    fn erase_rows(&mut self, rows: usize) -> io::Result<()> {
        for row in 0..rows {
            queue!(self.out, Clear(ClearType::CurrentLine))?;
            if row + 1 < rows {
                queue!(self.out, cursor::MoveUp(1))?;
            }
        }
        if rows > 0 {
            queue!(self.out, cursor::MoveToColumn(0))?;
        }
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        if self.cursor_hidden {
            queue!(self.out, cursor::Show)?;
            self.cursor_hidden = false;
        }
        Ok(())
    }
}

impl<W: Write> Redraw for TerminalRedraw<W> {
    fn update(&mut self, frame: &str) -> io::Result<()> {
        let previous = self.previous_rows;
        self.erase_rows(previous)?;
        // the spinner shows the cursor when it stops, so hide it on every frame
        if self.manage_cursor {
            queue!(self.out, cursor::Hide)?;
            self.cursor_hidden = true;
        }
        self.out.write_all(frame.as_bytes())?;
        self.previous_rows = terminal_rows(frame, self.columns());
        trace!(
            "redraw: replaced {} rows with {} rows",
            previous,
            self.previous_rows
        );
        self.out.flush()
    }

    fn commit(&mut self) -> io::Result<()> {
        trace!("redraw: committing {} rows", self.previous_rows);
        self.previous_rows = 0;
        self.show_cursor()?;
        self.out.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        let previous = self.previous_rows;
        self.erase_rows(previous)?;
        self.previous_rows = 0;
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalRedraw<W> {
    fn drop(&mut self) {
        let _ = self.show_cursor();
        let _ = self.out.flush();
    }
}
