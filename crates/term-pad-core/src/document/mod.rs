//! Document model combining text buffer, cursor, viewport and history.
//!
//! Every user action is turned into a [`Command`] and run through
//! [`Document::apply`], the single edit pipeline: buffer mutation, cursor
//! fix-up, viewport fix-up. Live input records the command afterwards;
//! undo applies the inverse of the command the log hands back, and redo
//! applies it again. File I/O is in the `io` submodule.

mod io;

pub use io::{read_all, write_all};

use std::path::PathBuf;

use term_pad_config::AppConfig;

use crate::buffer::TextBuffer;
use crate::cursor::{Cursor, Position};
use crate::history::{Command, HistoryConfig, UndoLog};
use crate::viewport::Viewport;

/// What the screen needs after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Nothing changed.
    Nothing,
    /// Only the cursor moved inside the window.
    Cursor,
    /// Text changed or the window scrolled.
    Full,
}

/// The open file with its buffer, cursor, viewport, history, and metadata.
pub struct Document {
    /// The text buffer.
    pub buffer: TextBuffer,
    /// The cursor state.
    pub cursor: Cursor,
    /// The scrolling window.
    pub viewport: Viewport,
    /// Undo/redo history.
    pub history: UndoLog,
    /// File path on disk, if any.
    pub file_path: Option<PathBuf>,
    /// Whether the document has been modified since last save.
    pub modified: bool,
    /// Display name for the status line.
    pub title: String,
    /// Timestamp of the last successful save to disk.
    pub last_saved_at: Option<chrono::DateTime<chrono::Local>>,
    /// Spaces inserted by Tab.
    tab_width: usize,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("cursor", &self.cursor)
            .field("viewport", &self.viewport)
            .field("rows", &self.buffer.len_rows())
            .field("file_path", &self.file_path)
            .field("modified", &self.modified)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a new empty document with default settings.
    pub fn new() -> Self {
        Self::with_config(&AppConfig::default())
    }

    /// Creates a new empty document using the tab width and history knobs of `config`.
    pub fn with_config(config: &AppConfig) -> Self {
        Self::from_buffer(TextBuffer::new(), config)
    }

    /// Wraps an existing buffer, cursor at the top-left.
    pub fn from_buffer(buffer: TextBuffer, config: &AppConfig) -> Self {
        Self {
            buffer,
            cursor: Cursor::new(),
            viewport: Viewport::default(),
            history: UndoLog::new(HistoryConfig::from(config)),
            file_path: None,
            modified: false,
            title: "Untitled".to_string(),
            last_saved_at: None,
            tab_width: config.tab_width.max(1),
        }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Applies new screen dimensions to the viewport.
    pub fn resize_viewport(&mut self, width: usize, height: usize) {
        self.viewport.resize(width, height, &mut self.cursor);
    }

    /// Inserts a typed character at the cursor.
    pub fn insert_char(&mut self, ch: char) -> Redraw {
        if ch == '\n' {
            return self.newline();
        }
        self.execute(Command::Insert(ch.to_string()))
    }

    /// Inserts `tab_width` spaces at the cursor in one step.
    pub fn insert_tab(&mut self) -> Redraw {
        self.execute(Command::Insert(" ".repeat(self.tab_width)))
    }

    /// Splits the current row at the cursor (Enter).
    pub fn newline(&mut self) -> Redraw {
        self.execute(Command::SplitRow)
    }

    /// Backspace.
    ///
    /// Erases the char left of the cursor; at the start of a row, joins the
    /// row onto the previous one. No-op at the start of the buffer.
    pub fn backspace(&mut self) -> Redraw {
        let Position { row, col } = self.cursor.position;
        let command = if col > 0 {
            match self.buffer.row(row).and_then(|r| r.char_at(col - 1)) {
                Ok(ch) => Command::Delete(ch.to_string()),
                Err(_) => return Redraw::Nothing,
            }
        } else if row > 0 {
            Command::JoinRow
        } else {
            return Redraw::Nothing;
        };
        self.execute(command)
    }

    pub fn move_left(&mut self) -> Redraw {
        self.execute(Command::MoveLeft)
    }

    pub fn move_right(&mut self) -> Redraw {
        self.execute(Command::MoveRight)
    }

    pub fn move_up(&mut self) -> Redraw {
        let Position { row, col } = self.cursor.position;
        if row == 0 {
            return Redraw::Nothing;
        }
        let to_col = col.min(self.buffer.row_len(row - 1).unwrap_or(0));
        self.execute(Command::MoveUp {
            from_col: col,
            to_col,
        })
    }

    pub fn move_down(&mut self) -> Redraw {
        let Position { row, col } = self.cursor.position;
        if row + 1 >= self.buffer.len_rows() {
            return Redraw::Nothing;
        }
        let to_col = col.min(self.buffer.row_len(row + 1).unwrap_or(0));
        self.execute(Command::MoveDown {
            from_col: col,
            to_col,
        })
    }

    /// Undoes the most recent step. No-op when there is nothing to undo.
    pub fn undo(&mut self) -> Redraw {
        let Some(command) = self.history.undo() else {
            return Redraw::Nothing;
        };
        let redraw = self.apply(&command.invert());
        if redraw == Redraw::Nothing {
            tracing::warn!(?command, "undo step did not apply");
        }
        redraw
    }

    /// Re-applies the most recently undone step. No-op when there is nothing to redo.
    pub fn redo(&mut self) -> Redraw {
        let Some(command) = self.history.redo() else {
            return Redraw::Nothing;
        };
        let redraw = self.apply(&command);
        if redraw == Redraw::Nothing {
            tracing::warn!(?command, "redo step did not apply");
        }
        redraw
    }

    /// Applies a command and records it if it took effect.
    fn execute(&mut self, command: Command) -> Redraw {
        let redraw = self.apply(&command);
        if redraw != Redraw::Nothing {
            self.history.push(command);
        }
        redraw
    }

    /// Runs a command against the buffer, cursor and viewport.
    ///
    /// Never touches the history. Returns [`Redraw::Nothing`] when the
    /// command does not apply at the current cursor (boundary no-ops).
    pub fn apply(&mut self, command: &Command) -> Redraw {
        let Position { row, col } = self.cursor.position;
        let applied = match command {
            Command::Insert(text) => {
                if self.buffer.insert_str(row, col, text).is_ok() {
                    self.cursor.advance(text.chars().count());
                    true
                } else {
                    false
                }
            }
            Command::Delete(text) => self.erase_left(text.chars().count()),
            Command::SplitRow => {
                if self.buffer.split_row(row, col).is_ok() {
                    self.cursor.go_to_row(row + 1, 0);
                    true
                } else {
                    false
                }
            }
            Command::JoinRow => self.join_with_previous_row(),
            Command::MoveLeft => self.cursor.move_left(&self.buffer),
            Command::MoveRight => self.cursor.move_right(&self.buffer),
            Command::MoveUp { to_col, .. } => self.cursor.move_up_to(*to_col, &self.buffer),
            Command::MoveDown { to_col, .. } => self.cursor.move_down_to(*to_col, &self.buffer),
        };

        if !applied {
            return Redraw::Nothing;
        }
        tracing::debug!(?command, position = ?self.cursor.position, "applied");

        let scrolled = self.viewport.follow(&mut self.cursor, &self.buffer);
        if command.is_edit() {
            self.modified = true;
        }
        if command.is_edit() || scrolled {
            Redraw::Full
        } else {
            Redraw::Cursor
        }
    }

    /// Erases `count` chars left of the cursor on the current row.
    fn erase_left(&mut self, count: usize) -> bool {
        let Position { row, col } = self.cursor.position;
        if count == 0 || count > col {
            return false;
        }
        for _ in 0..count {
            let at = self.cursor.position.col - 1;
            if self.buffer.erase_char(row, at).is_err() {
                return false;
            }
            self.cursor.retreat(1);
        }
        true
    }

    /// Backspace at the start of a row.
    ///
    /// An empty row is removed; a non-empty row is merged onto the previous
    /// one. Either way the cursor lands where the previous row used to end.
    fn join_with_previous_row(&mut self) -> bool {
        let Position { row, col } = self.cursor.position;
        if row == 0 || col != 0 {
            return false;
        }
        let Ok(prev_len) = self.buffer.row_len(row - 1) else {
            return false;
        };
        let joined = if self.buffer.row_len(row).unwrap_or(0) == 0 {
            self.buffer.remove_row(row).is_ok()
        } else {
            self.buffer.merge_row(row - 1, row).is_ok()
        };
        if joined {
            self.cursor.go_to_row(row - 1, prev_len);
        }
        joined
    }
}
