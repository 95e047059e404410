//! Crossterm implementation of the editor's drawing surface.
//!
//! Cells are staged in a [`CellGrid`] and flushed on `present`, rewriting
//! only the screen rows that changed since the last flush. The terminal is
//! put in raw mode on the alternate screen for the lifetime of the surface
//! and restored on drop.

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{self, Color as TermColor, Print, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute, QueueableCommand};
use term_pad_core::{Cell, CellGrid, Color, InputEvent, Key, Surface};

/// Highlight modes use the eight basic ANSI colors.
const MIN_COLORS: u16 = 8;

/// A full-screen terminal surface.
pub struct CrosstermSurface {
    out: Stdout,
    /// Cells staged for the next present.
    grid: CellGrid,
    /// Cells currently on the terminal.
    shown: CellGrid,
    cursor: (usize, usize),
}

impl CrosstermSurface {
    /// Enters raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal lacks color support or cannot be
    /// configured or measured.
    pub fn new() -> Result<Self> {
        if style::available_color_count() < MIN_COLORS {
            anyhow::bail!("terminal does not support colors");
        }
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, terminal::Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(e).context("failed to enter alternate screen");
        }
        let (width, height) = match terminal::size() {
            Ok(size) => size,
            Err(e) => {
                restore(&mut out);
                return Err(e).context("failed to read terminal size");
            }
        };
        tracing::info!(width, height, "terminal ready");

        let (width, height) = (width as usize, height as usize);
        Ok(Self {
            out,
            grid: CellGrid::new(width, height),
            shown: CellGrid::new(width, height),
            cursor: (0, 0),
        })
    }

    fn flush_rows(&mut self) -> Result<()> {
        for y in 0..self.grid.height() {
            let row = self.grid.row(y);
            if row == self.shown.row(y) {
                continue;
            }
            self.out.queue(cursor::MoveTo(0, y as u16))?;
            let mut color = None;
            for cell in row {
                if color != Some(cell.color) {
                    self.out.queue(SetForegroundColor(term_color(cell.color)))?;
                    color = Some(cell.color);
                }
                self.out.queue(Print(cell.ch))?;
            }
        }
        self.out.queue(SetForegroundColor(TermColor::Reset))?;
        self.shown = self.grid.clone();

        let (x, y) = self.cursor;
        self.out.queue(cursor::MoveTo(x as u16, y as u16))?;
        self.out.flush().context("failed to flush terminal output")
    }
}

impl Surface for CrosstermSurface {
    fn width(&self) -> usize {
        self.grid.width()
    }

    fn height(&self) -> usize {
        self.grid.height()
    }

    fn get(&self, x: usize, y: usize) -> char {
        self.grid.get(x, y).map(|c| c.ch).unwrap_or(' ')
    }

    fn set(&mut self, x: usize, y: usize, ch: char, color: Color) {
        self.grid.set(x, y, Cell { ch, color });
    }

    fn set_cursor(&mut self, x: usize, y: usize) {
        self.cursor = (x, y);
    }

    fn clear(&mut self) {
        self.grid.clear();
    }

    fn present(&mut self) -> Result<()> {
        self.flush_rows()
    }

    fn present_after_resize(&mut self) -> Result<()> {
        self.out.queue(terminal::Clear(ClearType::All))?;
        // Forget what was shown so every row is rewritten
        self.shown = CellGrid::new(0, 0);
        self.flush_rows()
    }

    fn get_input(&mut self) -> Result<InputEvent> {
        loop {
            match event::read().context("failed to read terminal event")? {
                Event::Key(key_event) => {
                    if let Some(key) = map_key_event(&key_event) {
                        return Ok(InputEvent::Key(key));
                    }
                    tracing::trace!(?key_event, "ignored key");
                }
                Event::Resize(width, height) => {
                    let (width, height) = (width as usize, height as usize);
                    self.grid.resize(width, height);
                    return Ok(InputEvent::Resize { width, height });
                }
                _ => {}
            }
        }
    }
}

impl Drop for CrosstermSurface {
    fn drop(&mut self) {
        restore(&mut self.out);
    }
}

fn restore(out: &mut Stdout) {
    let _ = execute!(out, SetForegroundColor(TermColor::Reset), LeaveAlternateScreen, cursor::Show);
    let _ = disable_raw_mode();
}

/// Maps a crossterm key event to an editor key. Releases and keys the
/// editor has no binding for map to `None`.
pub fn map_key_event(event: &KeyEvent) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let key = match event.code {
        KeyCode::Char(ch) if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Key::Ctrl(ch.to_ascii_lowercase())
        }
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        _ => return None,
    };
    Some(key)
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Red => TermColor::Red,
        Color::Green => TermColor::Green,
        Color::Yellow => TermColor::Yellow,
        Color::Blue => TermColor::Blue,
        Color::Magenta => TermColor::Magenta,
        Color::Cyan => TermColor::Cyan,
        Color::White => TermColor::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_map_plain_chars() {
        let ev = press(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(map_key_event(&ev), Some(Key::Char('a')));
        let ev = press(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(map_key_event(&ev), Some(Key::Char('A')));
    }

    #[test]
    fn test_map_control_chords() {
        for (ch, expected) in [('c', 'c'), ('s', 's'), ('Z', 'z'), ('y', 'y')] {
            let ev = press(KeyCode::Char(ch), KeyModifiers::CONTROL);
            assert_eq!(map_key_event(&ev), Some(Key::Ctrl(expected)));
        }
    }

    #[test]
    fn test_map_editing_keys() {
        let cases = [
            (KeyCode::Enter, Key::Enter),
            (KeyCode::Tab, Key::Tab),
            (KeyCode::Backspace, Key::Backspace),
            (KeyCode::Left, Key::Left),
            (KeyCode::Right, Key::Right),
            (KeyCode::Up, Key::Up),
            (KeyCode::Down, Key::Down),
        ];
        for (code, expected) in cases {
            assert_eq!(
                map_key_event(&press(code, KeyModifiers::NONE)),
                Some(expected)
            );
        }
    }

    #[test]
    fn test_unbound_and_release_are_skipped() {
        assert_eq!(map_key_event(&press(KeyCode::F(1), KeyModifiers::NONE)), None);
        assert_eq!(map_key_event(&press(KeyCode::Home, KeyModifiers::NONE)), None);

        let mut ev = press(KeyCode::Char('a'), KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;
        assert_eq!(map_key_event(&ev), None);
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(term_color(Color::Default), TermColor::Reset);
        assert_eq!(term_color(Color::Cyan), TermColor::Cyan);
    }
}
