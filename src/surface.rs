use crossterm::style::Color;

use crate::Coords;
use crate::error::Result;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Return,
    Backspace,
    Char(char),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
}

/// Where frames are drawn and input comes from. Coordinates are character cells.
pub trait Surface {
    fn size(&self) -> Coords;

    fn clear(&mut self) -> Result<()>;

    fn fill_cell(&mut self, pos: Coords, color: Color) -> Result<()>;

    /// Draws `text` horizontally centered on `center`.
    fn draw_text(&mut self, center: Coords, text: &str, color: Color) -> Result<()>;

    fn present(&mut self) -> Result<()>;

    /// Everything that arrived since the last call. Never blocks for long.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}
