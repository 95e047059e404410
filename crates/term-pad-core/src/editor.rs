//! The editor loop: read one input event, run it to completion, render.
//!
//! Each key is turned into a document operation; the returned [`Redraw`]
//! decides between repainting the whole text area and just moving the
//! cursor. Resize events bypass the edit pipeline entirely.

use std::time::{Duration, Instant};

use anyhow::Result;
use term_pad_config::AppConfig;

use crate::document::{Document, Redraw};
use crate::input::{InputEvent, Key};
use crate::surface::{Color, Highlight, Surface};

/// Whether the loop keeps reading input after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

/// A transient message shown in place of the file summary.
#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    shown_at: Instant,
}

/// Owns the document and drives it from a surface's input queue.
pub struct Editor<S: Surface, H: Highlight> {
    document: Document,
    surface: S,
    highlighter: H,
    status: Option<StatusMessage>,
    config: AppConfig,
}

impl<S: Surface, H: Highlight> Editor<S, H> {
    /// Creates an editor and sizes the document's viewport to the surface.
    pub fn new(document: Document, surface: S, highlighter: H, config: AppConfig) -> Self {
        let mut editor = Self {
            document,
            surface,
            highlighter,
            status: None,
            config,
        };
        let (width, height) = (editor.surface.width(), editor.surface.height());
        let text_height = editor.text_height(height);
        editor.document.resize_viewport(width, text_height);
        editor
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Current status message text, if one is showing.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    /// Paints the initial screen, then processes input until quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface fails to present or deliver input.
    pub fn run(&mut self) -> Result<()> {
        self.repaint()?;
        loop {
            let event = self.surface.get_input()?;
            if self.handle(event)? == Flow::Quit {
                tracing::info!("quit requested");
                return Ok(());
            }
        }
    }

    /// Processes one input event to completion, including rendering.
    pub fn handle(&mut self, event: InputEvent) -> Result<Flow> {
        match event {
            InputEvent::Resize { width, height } => {
                tracing::debug!(width, height, "resize");
                let text_height = self.text_height(height);
                self.document.resize_viewport(width, text_height);
                self.paint();
                self.surface.present_after_resize()?;
                Ok(Flow::Continue)
            }
            InputEvent::Key(key) => self.handle_key(key),
        }
    }

    fn handle_key(&mut self, key: Key) -> Result<Flow> {
        tracing::trace!(?key, "key");
        let redraw = match key {
            Key::Ctrl('c') => return Ok(Flow::Quit),
            Key::Ctrl('s') => self.save(),
            Key::Ctrl('z') => self.document.undo(),
            Key::Ctrl('y') => self.document.redo(),
            Key::Ctrl(_) => Redraw::Nothing,
            Key::Char(ch) => self.document.insert_char(ch),
            Key::Tab => self.document.insert_tab(),
            Key::Enter => self.document.newline(),
            Key::Backspace => self.document.backspace(),
            Key::Left => self.document.move_left(),
            Key::Right => self.document.move_right(),
            Key::Up => self.document.move_up(),
            Key::Down => self.document.move_down(),
        };
        self.render(redraw)?;
        Ok(Flow::Continue)
    }

    /// Saves to disk. Failures become an error status; the buffer is kept.
    fn save(&mut self) -> Redraw {
        match self.document.save() {
            Ok(()) => {
                let text = format!("Saved {}", self.document.title);
                self.set_status(text, StatusKind::Info);
            }
            Err(e) => {
                tracing::warn!("Failed to save: {e:#}");
                self.set_status(format!("Save failed: {e:#}"), StatusKind::Error);
            }
        }
        Redraw::Cursor
    }

    fn set_status(&mut self, text: String, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text,
            kind,
            shown_at: Instant::now(),
        });
    }

    fn render(&mut self, redraw: Redraw) -> Result<()> {
        match redraw {
            Redraw::Nothing => Ok(()),
            Redraw::Cursor => {
                self.draw_status_line();
                self.place_cursor();
                self.surface.present()
            }
            Redraw::Full => self.repaint(),
        }
    }

    fn repaint(&mut self) -> Result<()> {
        self.paint();
        self.surface.present()
    }

    /// Redraws every cell without presenting.
    fn paint(&mut self) {
        self.surface.clear();
        let width = self.surface.width();
        let visible = self.document.viewport.visible_rows(&self.document.buffer);
        let visible_count = visible.len();

        for (y, row_idx) in visible.enumerate() {
            let Ok(row) = self.document.buffer.row(row_idx) else {
                continue;
            };
            for (x, &ch) in row.chars().iter().take(width).enumerate() {
                let ch = if ch.is_control() { ' ' } else { ch };
                self.surface.set(x, y, ch, Color::Default);
            }
        }
        self.highlighter
            .recolor(&mut self.surface, 0, visible_count);

        self.draw_status_line();
        self.place_cursor();
    }

    fn draw_status_line(&mut self) {
        if !self.config.show_status_line || self.surface.height() < 2 {
            return;
        }
        let y = self.surface.height() - 1;
        let width = self.surface.width();

        let ttl = Duration::from_secs(self.config.status_message_secs);
        if self.status.as_ref().is_some_and(|s| s.shown_at.elapsed() >= ttl) {
            self.status = None;
        }

        let (text, color) = match &self.status {
            Some(msg) => {
                let color = match msg.kind {
                    StatusKind::Info => Color::Green,
                    StatusKind::Error => Color::Red,
                };
                (msg.text.clone(), color)
            }
            None => (self.summary(), Color::White),
        };

        for x in 0..width {
            self.surface.set(x, y, ' ', Color::Default);
        }
        for (x, ch) in text.chars().take(width).enumerate() {
            self.surface.set(x, y, ch, color);
        }
    }

    /// File name, modified marker and 1-based cursor position.
    fn summary(&self) -> String {
        let doc = &self.document;
        let modified = if doc.modified { " [+]" } else { "" };
        format!(
            "{}{modified}  {}:{}",
            doc.title,
            doc.cursor.position.row + 1,
            doc.cursor.position.col + 1
        )
    }

    fn place_cursor(&mut self) {
        let cursor = &self.document.cursor;
        let x = cursor.x.min(self.surface.width().saturating_sub(1));
        let y = cursor.y.max(0) as usize;
        self.surface.set_cursor(x, y);
    }

    fn text_height(&self, height: usize) -> usize {
        if self.config.show_status_line {
            height.saturating_sub(1).max(1)
        } else {
            height.max(1)
        }
    }
}
