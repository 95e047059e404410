/// Coalescing undo log with a movable read cursor.
///
/// Typed characters and backspaced characters are collected into pending
/// runs; a run is logged as one `Insert`/`Delete` command once it reaches
/// the configured cache size or a different kind of command arrives.
/// Undo and redo move a read cursor over the logged commands; recording a
/// new command while the read cursor is behind the write head discards the
/// redo future.
use std::mem;

use crate::command::Command;
use crate::config::HistoryConfig;

/// Ordered, coalescing record of reversible commands for one document.
pub struct UndoLog {
    /// Logged commands, oldest first.
    events: Vec<Command>,
    /// Read cursor: `events[..head]` can be undone, `events[head..]` redone.
    head: usize,
    /// Pending typing run, not yet logged.
    insert_run: String,
    /// Pending backspace run, in document order, not yet logged.
    delete_run: String,
    config: HistoryConfig,
}

impl std::fmt::Debug for UndoLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoLog")
            .field("events_len", &self.events.len())
            .field("head", &self.head)
            .field("insert_run", &self.insert_run)
            .field("delete_run", &self.delete_run)
            .finish()
    }
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl UndoLog {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            events: Vec::new(),
            head: 0,
            insert_run: String::new(),
            delete_run: String::new(),
            config,
        }
    }

    /// Records a command.
    ///
    /// `Insert` and `Delete` join the matching pending run; anything else
    /// flushes both runs first. Clears the redo future.
    pub fn push(&mut self, command: Command) {
        self.truncate_future();

        match command {
            Command::Insert(text) => {
                self.flush_delete_run();
                self.insert_run.push_str(&text);
                if self.insert_run.chars().count() >= self.config.cache_size {
                    self.flush_insert_run();
                }
            }
            Command::Delete(text) => {
                self.flush_insert_run();
                // Backspacing walks leftwards, so each new char goes in front
                self.delete_run.insert_str(0, &text);
                if self.delete_run.chars().count() >= self.config.cache_size {
                    self.flush_delete_run();
                }
            }
            other => {
                self.flush_runs();
                self.append(other);
            }
        }
    }

    /// Removes and returns the most recent logged command, flushing any
    /// pending run first. The redo future is discarded.
    pub fn pop(&mut self) -> Option<Command> {
        self.flush_runs();
        self.truncate_future();
        let command = self.events.pop();
        self.head = self.events.len();
        command
    }

    /// Steps the read cursor back over the most recent command and returns it.
    ///
    /// The caller applies `command.invert()`. Returns `None` if there's
    /// nothing to undo.
    pub fn undo(&mut self) -> Option<Command> {
        self.flush_runs();
        if self.head == 0 {
            return None;
        }
        self.head -= 1;
        tracing::debug!(head = self.head, "undo step");
        Some(self.events[self.head].clone())
    }

    /// Steps the read cursor forward and returns the command to re-apply.
    ///
    /// Returns `None` if there's nothing to redo.
    pub fn redo(&mut self) -> Option<Command> {
        let command = self.events.get(self.head)?.clone();
        self.head += 1;
        tracing::debug!(head = self.head, "redo step");
        Some(command)
    }

    /// Whether undo is available (logged or pending).
    pub fn can_undo(&self) -> bool {
        self.head > 0 || !self.insert_run.is_empty() || !self.delete_run.is_empty()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        self.head < self.events.len()
    }

    /// Number of logged commands, including the redo side.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.insert_run.is_empty() && self.delete_run.is_empty()
    }

    /// Position of the read cursor.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Logged commands, oldest first.
    pub fn events(&self) -> &[Command] {
        &self.events
    }

    /// Pending typing run that has not been logged yet.
    pub fn pending_insert(&self) -> &str {
        &self.insert_run
    }

    /// Pending backspace run that has not been logged yet.
    pub fn pending_delete(&self) -> &str {
        &self.delete_run
    }

    /// Forces pending runs into the log so the next command starts a new step.
    pub fn force_group_break(&mut self) {
        self.flush_runs();
    }

    /// Clears all history.
    pub fn clear(&mut self) {
        self.events.clear();
        self.head = 0;
        self.insert_run.clear();
        self.delete_run.clear();
    }

    fn flush_runs(&mut self) {
        self.flush_insert_run();
        self.flush_delete_run();
    }

    fn flush_insert_run(&mut self) {
        if self.insert_run.is_empty() {
            return;
        }
        let text = mem::take(&mut self.insert_run);
        self.append(Command::Insert(text));
    }

    fn flush_delete_run(&mut self) {
        if self.delete_run.is_empty() {
            return;
        }
        let text = mem::take(&mut self.delete_run);
        self.append(Command::Delete(text));
    }

    fn truncate_future(&mut self) {
        if self.head < self.events.len() {
            tracing::debug!(
                dropped = self.events.len() - self.head,
                "new edit discards redo history"
            );
            self.events.truncate(self.head);
        }
    }

    fn append(&mut self, command: Command) {
        self.events.push(command);
        self.head = self.events.len();

        if self.events.len() > self.config.max_history_depth {
            let excess = self.events.len() - self.config.max_history_depth;
            self.events.drain(..excess);
            self.head = self.events.len();
        }
    }
}
