use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

use crate::colors::ink_color;
use crate::game::port::{Display, Ink, Input, Weight};

/// Crossterm frontend: a back buffer diffed against the last flushed frame
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    front: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

impl Terminal {
    /// Enter raw mode and the alternate screen
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        }

        let buffer = vec![vec![Cell::default(); width as usize]; height as usize];
        // force a full paint on the first flush
        let front = vec![vec![Cell { ch: '\0', ..Cell::default() }; width as usize]; height as usize];

        Ok(Self {
            width,
            height,
            buffer,
            front,
            alternate_screen,
        })
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bold };
        }
    }

    fn write_cell(out: &mut impl Write, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        queue!(out, MoveTo(x, y))?;
        if cell.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        match cell.fg {
            Some(color) => queue!(out, SetForegroundColor(color), Print(cell.ch), ResetColor)?,
            None => queue!(out, Print(cell.ch))?,
        }
        if cell.bold {
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

impl Display for Terminal {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn draw_cell(&mut self, x: i32, y: i32, glyph: char, ink: Ink, weight: Weight) {
        let (fg, bold) = ink_color(ink, weight);
        self.set(x, y, glyph, fg, bold);
    }

    fn clear_region(&mut self, x: i32, y: i32, w: i32, h: i32) {
        for cy in y..y + h {
            for cx in x..x + w {
                self.set(cx, cy, ' ', None, false);
            }
        }
    }

    /// Write only the cells that changed since the previous flush
    fn flush(&mut self) -> io::Result<()> {
        let mut out = stdout().lock();
        for (y, (row, prev)) in self.buffer.iter().zip(self.front.iter_mut()).enumerate() {
            for (x, (cell, old)) in row.iter().zip(prev.iter_mut()).enumerate() {
                if cell != old {
                    Self::write_cell(&mut out, x as u16, y as u16, cell)?;
                    *old = cell.clone();
                }
            }
        }
        out.flush()
    }
}

impl Input for Terminal {
    fn poll_key(&mut self) -> io::Result<Option<KeyCode>> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(key) = read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key.code));
                }
            }
        }
        Ok(None)
    }

    fn wait_key(&mut self) -> io::Result<KeyCode> {
        loop {
            if let Event::Key(key) = read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key.code);
                }
            }
        }
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), ResetColor, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}
