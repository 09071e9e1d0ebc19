//! Seams between the round loop and the terminal

use crate::config::PlayerColor;
use crossterm::event::KeyCode;
use std::io;
use std::time::Duration;

/// Abstract color slot; the terminal decides the concrete color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Trail(PlayerColor),
    Head(PlayerColor),
    Wall,
    Hud,
    Dim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
    Dim,
}

pub trait Display {
    fn size(&self) -> (u16, u16);

    fn draw_cell(&mut self, x: i32, y: i32, glyph: char, ink: Ink, weight: Weight);

    fn draw_str(&mut self, x: i32, y: i32, text: &str, ink: Ink, weight: Weight) {
        for (i, ch) in text.chars().enumerate() {
            self.draw_cell(x + i as i32, y, ch, ink, weight);
        }
    }

    fn clear_region(&mut self, x: i32, y: i32, w: i32, h: i32);

    fn flush(&mut self) -> io::Result<()>;
}

pub trait Input {
    /// Non-blocking; `None` when nothing is pending
    fn poll_key(&mut self) -> io::Result<Option<KeyCode>>;

    /// Blocks until a key arrives
    fn wait_key(&mut self) -> io::Result<KeyCode>;

    /// Yield between ticks and during the countdown
    fn sleep(&mut self, duration: Duration);
}
