use crate::Coords;
use crate::error::Result;
use crate::surface::{InputEvent, Key, Surface};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, read, poll};

const POLL_TIMEOUT_MS: u64 = 1;
const CELL_CHAR: char = '█';

/// Owns the terminal for the lifetime of the program: raw mode, alternate
/// screen and hidden cursor are set up on creation and undone by `restore`.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout(), active: false })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    fn print_at(&mut self, pos: Coords, text: &str, color: Color) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::SetForegroundColor(color), style::Print(text))?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Surface for TermManager {
    fn size(&self) -> Coords {
        (self.width, self.height)
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    fn fill_cell(&mut self, pos: Coords, color: Color) -> Result<()> {
        let mut buf = [0u8; 4];
        self.print_at(pos, CELL_CHAR.encode_utf8(&mut buf), color)
    }

    fn draw_text(&mut self, center: Coords, text: &str, color: Color) -> Result<()> {
        let half = (text.chars().count() / 2) as u16;
        self.print_at((center.0.saturating_sub(half), center.1), text, color)
    }

    fn present(&mut self) -> Result<()> {
        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(POLL_TIMEOUT_MS))? {
            match read()? {
                Event::Key(ev) => {
                    if let Some(input) = translate_key(&ev) {
                        events.push(input);
                    }
                }
                Event::Resize(w, h) => {
                    self.width = w;
                    self.height = h;
                }
                _ => {}
            }
        }

        Ok(events)
    }
}

fn translate_key(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    let key = match ev.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Return,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) if !c.is_control() => Key::Char(c),
        _ => return None,
    };
    Some(InputEvent::KeyDown(key))
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
